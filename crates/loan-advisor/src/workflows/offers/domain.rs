use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Loan products the catalog and the intake conversation agree on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanType {
    Cash,
    Auto,
    Mortgage,
    Refinance,
}

impl LoanType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoanType::Cash => "cash",
            LoanType::Auto => "auto",
            LoanType::Mortgage => "mortgage",
            LoanType::Refinance => "refinance",
        }
    }

    /// Inverse of [`LoanType::as_str`].
    pub fn from_code(code: &str) -> Option<Self> {
        [
            LoanType::Cash,
            LoanType::Auto,
            LoanType::Mortgage,
            LoanType::Refinance,
        ]
        .into_iter()
        .find(|loan_type| loan_type.as_str() == code)
    }

    /// Borrower-facing label used in conversation summaries.
    pub fn label(&self) -> &'static str {
        match self {
            LoanType::Cash => "Наличными",
            LoanType::Auto => "Авто",
            LoanType::Mortgage => "Ипотека",
            LoanType::Refinance => "Рефинанс",
        }
    }
}

/// A single published offer. Every bound is optional; a missing bound is unbounded.
///
/// Rates are annual fractions, so `0.12` reads as 12 % per year. Columns the advisor does not
/// interpret (source links, notes) are kept in `extra` and echoed back to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferRecord {
    pub bank: String,
    pub product: String,
    #[serde(rename = "type")]
    pub loan_type: LoanType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term_min_months: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term_max_months: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_max: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl OfferRecord {
    pub fn title(&self) -> String {
        format!("{} — {}", self.bank, self.product)
    }

    /// Rate used for payment estimates: the lowest published rate, else the only one given.
    pub fn quoted_rate(&self) -> Option<f64> {
        self.rate_min.or(self.rate_max)
    }

    pub fn admits_amount(&self, amount: f64) -> bool {
        within(amount, self.amount_min, self.amount_max)
    }

    pub fn admits_term(&self, months: f64) -> bool {
        within(months, self.term_min_months, self.term_max_months)
    }
}

fn within(value: f64, min: Option<f64>, max: Option<f64>) -> bool {
    min.map_or(true, |min| value >= min) && max.map_or(true, |max| value <= max)
}

/// What the engine needs to know about a borrower to match and price offers.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OfferQuery {
    pub loan_type: Option<LoanType>,
    pub amount: u64,
    pub months: u64,
}

/// Catalog record annotated with figures for one particular query.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedOffer {
    #[serde(flatten)]
    pub record: OfferRecord,
    pub title: String,
    pub annual_rate: Option<f64>,
    pub monthly_payment: Option<f64>,
    pub total_pay: Option<f64>,
    pub overpay: Option<f64>,
}

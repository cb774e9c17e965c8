use crate::workflows::offers::{LoanType, OfferQuery};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::ops::RangeInclusive;

/// Largest whole number that survives a round trip through a JSON client unchanged.
pub const MAX_WHOLE_NUMBER: f64 = 9_007_199_254_740_991.0;

pub const AGE_YEARS: RangeInclusive<f64> = 14.0..=100.0;
pub const INCOME_RUBLES: RangeInclusive<f64> = 5000.0..=MAX_WHOLE_NUMBER;
pub const EMPLOYMENT_MONTHS: RangeInclusive<f64> = 0.0..=MAX_WHOLE_NUMBER;
pub const AMOUNT_RUBLES: RangeInclusive<f64> = 1000.0..=MAX_WHOLE_NUMBER;
pub const TERM_MONTHS: RangeInclusive<f64> = 3.0..=MAX_WHOLE_NUMBER;

/// Self-assessed credit record grades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditHistory {
    Good,
    Avg,
    Bad,
}

/// Position in the fixed question sequence. `OffersShown` is terminal.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(into = "u8", try_from = "u8")]
pub enum IntakeStep {
    #[default]
    LoanType,
    Age,
    Income,
    EmploymentMonths,
    CreditHistory,
    Insurance,
    DesiredAmount,
    DesiredMonths,
    OffersShown,
}

impl IntakeStep {
    pub const QUESTIONS: [IntakeStep; 8] = [
        IntakeStep::LoanType,
        IntakeStep::Age,
        IntakeStep::Income,
        IntakeStep::EmploymentMonths,
        IntakeStep::CreditHistory,
        IntakeStep::Insurance,
        IntakeStep::DesiredAmount,
        IntakeStep::DesiredMonths,
    ];

    pub fn index(self) -> u8 {
        match self {
            IntakeStep::LoanType => 0,
            IntakeStep::Age => 1,
            IntakeStep::Income => 2,
            IntakeStep::EmploymentMonths => 3,
            IntakeStep::CreditHistory => 4,
            IntakeStep::Insurance => 5,
            IntakeStep::DesiredAmount => 6,
            IntakeStep::DesiredMonths => 7,
            IntakeStep::OffersShown => 8,
        }
    }

    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            8 => Some(IntakeStep::OffersShown),
            _ => Self::QUESTIONS.get(usize::from(index)).copied(),
        }
    }

    pub fn next(self) -> Self {
        Self::from_index(self.index() + 1).unwrap_or(IntakeStep::OffersShown)
    }

    pub fn is_terminal(self) -> bool {
        self == IntakeStep::OffersShown
    }
}

impl From<IntakeStep> for u8 {
    fn from(step: IntakeStep) -> Self {
        step.index()
    }
}

impl TryFrom<u8> for IntakeStep {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_index(value).ok_or_else(|| format!("step {value} is outside 0..=8"))
    }
}

/// Borrower answers collected so far, one field per completed step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loan_type: Option<LoanType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub income: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employment_months: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit_history: Option<CreditHistory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insurance: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desired_amount: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desired_months: Option<u64>,
}

impl Profile {
    /// Whether the field collected at `step` has been answered.
    pub fn has_answer(&self, step: IntakeStep) -> bool {
        match step {
            IntakeStep::LoanType => self.loan_type.is_some(),
            IntakeStep::Age => self.age.is_some(),
            IntakeStep::Income => self.income.is_some(),
            IntakeStep::EmploymentMonths => self.employment_months.is_some(),
            IntakeStep::CreditHistory => self.credit_history.is_some(),
            IntakeStep::Insurance => self.insurance.is_some(),
            IntakeStep::DesiredAmount => self.desired_amount.is_some(),
            IntakeStep::DesiredMonths => self.desired_months.is_some(),
            IntakeStep::OffersShown => false,
        }
    }

    /// Exactly the fields before `step` are filled.
    pub fn is_consistent_with(&self, step: IntakeStep) -> bool {
        IntakeStep::QUESTIONS
            .iter()
            .all(|question| self.has_answer(*question) == (*question < step))
    }

    /// First numeric answer outside the range its question accepts.
    pub fn out_of_range_field(&self) -> Option<&'static str> {
        let checks = [
            ("age", self.age.map(f64::from), &AGE_YEARS),
            ("income", self.income.map(|v| v as f64), &INCOME_RUBLES),
            (
                "employmentMonths",
                self.employment_months.map(|v| v as f64),
                &EMPLOYMENT_MONTHS,
            ),
            ("desiredAmount", self.desired_amount.map(|v| v as f64), &AMOUNT_RUBLES),
            ("desiredMonths", self.desired_months.map(|v| v as f64), &TERM_MONTHS),
        ];

        checks
            .into_iter()
            .find(|(_, value, range)| value.is_some_and(|value| !range.contains(&value)))
            .map(|(field, _, _)| field)
    }

    pub fn offer_query(&self) -> OfferQuery {
        OfferQuery {
            loan_type: self.loan_type,
            amount: self.desired_amount.unwrap_or_default(),
            months: self.desired_months.unwrap_or_default(),
        }
    }
}

/// Conversation position plus answers, round-tripped by the caller between requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationState {
    pub step: IntakeStep,
    pub profile: Profile,
}

impl ConversationState {
    pub fn initial() -> Self {
        Self::default()
    }

    /// Validates loosely-typed caller state. A missing or `null` state starts a new
    /// conversation; anything else that does not fit is reported so it can be replaced.
    pub fn restore(raw: Option<Value>) -> Result<Self, MalformedState> {
        let mut fields = match raw {
            None | Some(Value::Null) => return Ok(Self::initial()),
            Some(Value::Object(fields)) => fields,
            Some(_) => return Err(MalformedState::NotAnObject),
        };

        let profile = match fields.remove("profile") {
            Some(Value::Object(profile)) => profile,
            _ => return Err(MalformedState::ProfileNotAnObject),
        };

        let step = match fields.remove("step") {
            None | Some(Value::Null) => IntakeStep::LoanType,
            Some(value) => value
                .as_u64()
                .and_then(|index| u8::try_from(index).ok())
                .and_then(IntakeStep::from_index)
                .ok_or(MalformedState::InvalidStep(value))?,
        };

        let profile: Profile = serde_json::from_value(Value::Object(profile))
            .map_err(|err| MalformedState::InvalidProfile(err.to_string()))?;

        if !profile.is_consistent_with(step) {
            return Err(MalformedState::StepMismatch { step: step.index() });
        }

        if let Some(field) = profile.out_of_range_field() {
            return Err(MalformedState::OutOfRange(field));
        }

        Ok(Self { step, profile })
    }
}

/// Reasons a caller-supplied state is discarded.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MalformedState {
    #[error("state is not an object")]
    NotAnObject,
    #[error("state profile is not an object")]
    ProfileNotAnObject,
    #[error("step {0} is not an integer in 0..=8")]
    InvalidStep(Value),
    #[error("profile has an invalid field: {0}")]
    InvalidProfile(String),
    #[error("profile answers do not match step {step}")]
    StepMismatch { step: u8 },
    #[error("profile field {0} is outside its accepted range")]
    OutOfRange(&'static str),
}

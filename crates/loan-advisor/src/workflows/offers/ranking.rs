use super::catalog::OfferCatalog;
use super::domain::{OfferQuery, OfferRecord, RankedOffer};
use super::payment::amortized_payment;
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::warn;

/// Shortest term for which a payment estimate is quoted.
pub const MIN_PRICED_TERM_MONTHS: u64 = 3;

/// Stateless matcher over a shared catalog.
#[derive(Debug, Clone)]
pub struct OfferEngine {
    catalog: Arc<OfferCatalog>,
}

impl OfferEngine {
    pub fn new(catalog: Arc<OfferCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &OfferCatalog {
        &self.catalog
    }

    /// Offers matching the query, cheapest monthly payment first.
    ///
    /// Offers without an estimate sort after every priced offer; the sort is stable so equal
    /// entries keep catalog order.
    pub fn rank(&self, query: &OfferQuery) -> Vec<RankedOffer> {
        let amount = query.amount as f64;
        let months = query.months as f64;

        let mut ranked: Vec<RankedOffer> = self
            .catalog
            .records()
            .iter()
            .filter(|record| {
                query
                    .loan_type
                    .map_or(true, |loan_type| record.loan_type == loan_type)
            })
            .filter(|record| record.admits_amount(amount))
            .filter(|record| record.admits_term(months))
            .map(|record| annotate(record, query))
            .collect();

        ranked.sort_by(|left, right| by_payment(left.monthly_payment, right.monthly_payment));
        ranked
    }
}

fn annotate(record: &OfferRecord, query: &OfferQuery) -> RankedOffer {
    let annual_rate = record.quoted_rate();
    let priceable = query.amount > 0 && query.months >= MIN_PRICED_TERM_MONTHS;

    let monthly_payment = annual_rate
        .filter(|_| priceable)
        .map(|rate| amortized_payment(query.amount as f64, rate, query.months))
        .filter(|payment| {
            let finite = payment.is_finite();
            if !finite {
                warn!(
                    bank = %record.bank,
                    product = %record.product,
                    ?annual_rate,
                    "payment estimate is not finite, leaving offer unpriced"
                );
            }
            finite
        });
    let total_pay = monthly_payment.map(|payment| payment * query.months as f64);
    let overpay = total_pay.map(|total| total - query.amount as f64);

    RankedOffer {
        record: record.clone(),
        title: record.title(),
        annual_rate,
        monthly_payment,
        total_pay,
        overpay,
    }
}

fn by_payment(left: Option<f64>, right: Option<f64>) -> Ordering {
    match (left, right) {
        (Some(left), Some(right)) => left.total_cmp(&right),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

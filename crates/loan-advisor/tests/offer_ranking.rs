use std::path::PathBuf;
use std::sync::Arc;

use loan_advisor::workflows::offers::{
    amortized_payment, LoanType, OfferCatalog, OfferEngine, OfferQuery,
};

fn engine() -> OfferEngine {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data/bank_offers.json");
    let catalog = OfferCatalog::from_path(path).expect("shipped catalog loads");
    OfferEngine::new(Arc::new(catalog))
}

fn queries() -> Vec<OfferQuery> {
    let mut queries = Vec::new();
    for loan_type in [
        None,
        Some(LoanType::Cash),
        Some(LoanType::Auto),
        Some(LoanType::Mortgage),
        Some(LoanType::Refinance),
    ] {
        for amount in [0, 1_000, 60_000, 500_000, 2_500_000, 50_000_000] {
            for months in [0, 3, 6, 24, 120, 400] {
                queries.push(OfferQuery {
                    loan_type,
                    amount,
                    months,
                });
            }
        }
    }
    queries
}

#[test]
fn ranked_offers_respect_profile_bounds() {
    let engine = engine();

    for query in queries() {
        for offer in engine.rank(&query) {
            let record = &offer.record;
            if let Some(loan_type) = query.loan_type {
                assert_eq!(record.loan_type, loan_type, "query {query:?}");
            }
            assert!(record.admits_amount(query.amount as f64), "query {query:?}");
            assert!(record.admits_term(query.months as f64), "query {query:?}");
        }
    }
}

#[test]
fn ranked_offers_are_sorted_with_unpriced_last() {
    let engine = engine();

    for query in queries() {
        let ranked = engine.rank(&query);
        let payments: Vec<Option<f64>> =
            ranked.iter().map(|offer| offer.monthly_payment).collect();

        let first_unpriced = payments
            .iter()
            .position(Option::is_none)
            .unwrap_or(payments.len());
        assert!(
            payments[first_unpriced..].iter().all(Option::is_none),
            "query {query:?}"
        );

        let priced: Vec<f64> = payments.iter().flatten().copied().collect();
        assert!(
            priced.windows(2).all(|pair| pair[0] <= pair[1]),
            "query {query:?}"
        );
    }
}

#[test]
fn monthly_payment_uses_lowest_published_rate() {
    let engine = engine();
    let query = OfferQuery {
        loan_type: Some(LoanType::Cash),
        amount: 300_000,
        months: 36,
    };

    let ranked = engine.rank(&query);
    let severny = ranked
        .iter()
        .find(|offer| offer.record.bank == "Северный Банк")
        .expect("cash offer present");
    assert_eq!(severny.annual_rate, Some(0.199));
    assert_eq!(
        severny.monthly_payment,
        Some(amortized_payment(300_000.0, 0.199, 36))
    );

    let volga = ranked
        .iter()
        .find(|offer| offer.record.bank == "Волга Кредит")
        .expect("rate-max offer present");
    assert_eq!(volga.annual_rate, Some(0.289));
}

#[test]
fn offers_without_any_rate_stay_listed_but_unpriced() {
    let engine = engine();
    let query = OfferQuery {
        loan_type: Some(LoanType::Auto),
        amount: 1_500_000,
        months: 60,
    };

    let ranked = engine.rank(&query);
    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].record.bank, "Урал Финанс");
    assert_eq!(ranked[1].record.product, "Автокредит с пробегом");
    assert!(ranked[1].annual_rate.is_none());
    assert!(ranked[1].monthly_payment.is_none());
}

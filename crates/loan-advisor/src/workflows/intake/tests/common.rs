use std::sync::Arc;

use axum::response::Response;
use serde_json::{Map, Value};

use crate::workflows::intake::{ConversationState, LoanIntakeService, Vocabulary};
use crate::workflows::offers::{LoanType, OfferCatalog, OfferEngine, OfferRecord};

pub(super) const SCENARIO: [&str; 8] = [
    "ипотека", "30", "90000", "24", "хорошо", "да", "500000", "24",
];

pub(super) fn offer(
    bank: &str,
    loan_type: LoanType,
    rate_min: Option<f64>,
    rate_max: Option<f64>,
) -> OfferRecord {
    OfferRecord {
        bank: bank.to_string(),
        product: format!("{bank} {}", loan_type.as_str()),
        loan_type,
        amount_min: Some(100_000.0),
        amount_max: Some(30_000_000.0),
        term_min_months: Some(12.0),
        term_max_months: Some(360.0),
        rate_min,
        rate_max,
        extra: Map::new(),
    }
}

pub(super) fn catalog() -> OfferCatalog {
    let mut capped = offer("Capped", LoanType::Mortgage, Some(0.07), None);
    capped.amount_max = Some(400_000.0);

    OfferCatalog::new(vec![
        offer("Unpriced", LoanType::Mortgage, None, None),
        offer("Premium", LoanType::Mortgage, Some(0.149), Some(0.2)),
        offer("Budget", LoanType::Mortgage, Some(0.06), None),
        offer("CashBank", LoanType::Cash, Some(0.19), None),
        capped,
        offer("AutoBank", LoanType::Auto, None, Some(0.21)),
    ])
}

pub(super) fn service() -> LoanIntakeService {
    service_with(catalog())
}

pub(super) fn service_with(catalog: OfferCatalog) -> LoanIntakeService {
    LoanIntakeService::new(
        OfferEngine::new(Arc::new(catalog)),
        Arc::new(Vocabulary::russian()),
    )
}

/// Feeds `messages` in order starting from a fresh conversation.
pub(super) fn run_messages(
    service: &LoanIntakeService,
    messages: &[&str],
) -> crate::workflows::intake::ChatTurn {
    let mut state = ConversationState::initial();
    let mut last = None;
    for message in messages {
        let turn = service.respond(message, state);
        state = turn.state.clone();
        last = Some(turn);
    }
    last.expect("at least one message")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

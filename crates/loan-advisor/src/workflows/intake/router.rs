use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};

use super::service::{ChatError, ChatRequest, ChatTurn, LoanIntakeService};

/// Router exposing the conversational intake endpoint.
pub fn chat_router(service: Arc<LoanIntakeService>) -> Router {
    Router::new()
        .route("/api/chat", post(chat_handler))
        .with_state(service)
}

/// Always answers 200 with a reply envelope, including for unreadable bodies.
pub(crate) async fn chat_handler(
    State(service): State<Arc<LoanIntakeService>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Json<ChatTurn> {
    let turn = match payload {
        Ok(Json(request)) => service.handle(request),
        Err(rejection) => service.recover(&ChatError::InvalidRequest(rejection.body_text())),
    };

    Json(turn)
}

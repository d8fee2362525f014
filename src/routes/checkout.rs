use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::HeaderMap,
    routing::{MethodRouter, post},
};

use crate::{
    dto::checkout::{CheckoutRequest, CheckoutResponse},
    error::{AppError, AppResult, ErrorData},
    services::checkout_service,
    state::AppState,
};

/// POST creates a session; every other method gets a 405 body.
pub fn method_router() -> MethodRouter<AppState> {
    post(create_checkout_session).fallback(method_not_allowed)
}

#[utoipa::path(
    post,
    path = "/api/checkout",
    request_body(content = CheckoutRequest, description = "Malformed bodies are treated as empty"),
    responses(
        (status = 200, description = "Hosted checkout session created", body = CheckoutResponse),
        (status = 405, description = "Method not allowed", body = ErrorData),
        (status = 500, description = "Payment provider failure", body = ErrorData),
    ),
    tag = "Checkout"
)]
pub async fn create_checkout_session(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<Json<CheckoutResponse>> {
    let payload = CheckoutRequest::parse_or_default(&body);
    let response = checkout_service::start_checkout(&state, &headers, payload).await?;
    Ok(Json(response))
}

pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

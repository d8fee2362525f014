use axum::{
    Router,
    http::Uri,
    routing::{get, post},
};

use crate::{error::AppError, state::AppState};

pub mod checkout;
pub mod doc;
pub mod health;
pub mod home;
pub mod passes;

/// Path used by static hosts that serve the checkout as a function.
pub const FUNCTION_CHECKOUT_PATH: &str = "/.netlify/functions/create-checkout-session";

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .route("/checkout", checkout::method_router())
        .nest("/passes", passes::router())
        .route("/forms/press-passes", post(passes::capture_submission))
}

/// Full application with state bound; middleware is layered on by the binary.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(home::index))
        .route("/health", get(health::health_check))
        .route(FUNCTION_CHECKOUT_PATH, checkout::method_router())
        .nest("/api", create_api_router())
        .merge(doc::scalar_docs())
        .fallback(not_found)
        .with_state(state)
}

async fn not_found(uri: Uri) -> AppError {
    tracing::debug!(path = %uri.path(), "no route");
    AppError::NotFound
}

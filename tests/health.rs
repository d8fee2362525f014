mod common;

use axum::extract::State;
use press_pass::{routes::health::health_check, state::AppState};

#[tokio::test]
async fn health_check_returns_ok() {
    let state = AppState::new(common::test_config(None));
    let response = health_check(State(state)).await;
    assert_eq!(response.0.message, "Health check");

    let data = response.0.data.expect("health data");
    assert_eq!(data.status, "ok");
    assert!(!data.checkout_configured);
}

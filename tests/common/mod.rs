#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{Router, body::Body, http::Response};
use press_pass::{
    config::{AppConfig, StripeConfig},
    dto::passes::PressPassSubmission,
    payments::{CheckoutSessionRequest, HostedSession, PaymentProvider, ProviderError},
    routes::create_app,
    services::pass_service::SubmissionLog,
    state::AppState,
};

pub fn test_config(site_url: Option<&str>) -> AppConfig {
    AppConfig {
        host: "127.0.0.1".into(),
        port: 0,
        stripe: StripeConfig::default(),
        site_url: site_url.map(String::from),
    }
}

/// Provider double that records every request and answers with a fixed
/// outcome.
pub struct MockProvider {
    outcome: Result<String, String>,
    calls: Mutex<Vec<CheckoutSessionRequest>>,
}

impl MockProvider {
    pub fn succeeding(url: &str) -> Arc<Self> {
        Arc::new(Self {
            outcome: Ok(url.to_string()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            outcome: Err(message.to_string()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<CheckoutSessionRequest> {
        self.calls.lock().expect("calls lock").clone()
    }
}

#[async_trait]
impl PaymentProvider for MockProvider {
    async fn create_checkout_session(
        &self,
        request: &CheckoutSessionRequest,
    ) -> Result<HostedSession, ProviderError> {
        self.calls.lock().expect("calls lock").push(request.clone());
        match &self.outcome {
            Ok(url) => Ok(HostedSession {
                id: "cs_test_123".into(),
                url: url.clone(),
            }),
            Err(message) => Err(ProviderError::Api(message.clone())),
        }
    }
}

/// Keeps every captured submission in memory.
#[derive(Default)]
pub struct RecordingSubmissionLog {
    submissions: Mutex<Vec<PressPassSubmission>>,
}

impl RecordingSubmissionLog {
    pub fn submissions(&self) -> Vec<PressPassSubmission> {
        self.submissions.lock().expect("submissions lock").clone()
    }
}

impl SubmissionLog for RecordingSubmissionLog {
    fn record(&self, submission: &PressPassSubmission) {
        self.submissions
            .lock()
            .expect("submissions lock")
            .push(submission.clone());
    }
}

pub fn app_with(provider: Arc<MockProvider>, site_url: Option<&str>) -> Router {
    create_app(AppState::with_provider(test_config(site_url), provider))
}

pub fn app_with_log(submissions: Arc<RecordingSubmissionLog>) -> Router {
    let provider = MockProvider::succeeding("https://checkout.example");
    create_app(AppState::with_provider(test_config(None), provider).with_submission_log(submissions))
}

pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}

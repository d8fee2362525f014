use std::sync::Arc;

use crate::{
    card::{CardRenderer, ImageDecoder, PhotoDecoder},
    config::AppConfig,
    payments::{PaymentProvider, StripeClient},
    services::pass_service::{SubmissionLog, TracingSubmissionLog},
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub payments: Arc<dyn PaymentProvider>,
    pub renderer: Arc<CardRenderer>,
    pub decoder: Arc<dyn PhotoDecoder>,
    pub submissions: Arc<dyn SubmissionLog>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let payments = Arc::new(StripeClient::new(&config.stripe));
        Self::with_provider(config, payments)
    }

    pub fn with_provider(config: AppConfig, payments: Arc<dyn PaymentProvider>) -> Self {
        Self {
            config: Arc::new(config),
            payments,
            renderer: Arc::new(CardRenderer::default()),
            decoder: Arc::new(ImageDecoder),
            submissions: Arc::new(TracingSubmissionLog),
        }
    }

    pub fn with_submission_log(mut self, submissions: Arc<dyn SubmissionLog>) -> Self {
        self.submissions = submissions;
        self
    }
}

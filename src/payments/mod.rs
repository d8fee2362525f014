pub mod error;
pub mod stripe;

use async_trait::async_trait;

pub use error::ProviderError;
pub use stripe::StripeClient;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSessionRequest {
    pub quantity: u32,
    pub success_url: String,
    pub cancel_url: String,
    pub pass_id: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostedSession {
    pub id: String,
    pub url: String,
}

#[async_trait]
pub trait PaymentProvider: Send + Sync {
    async fn create_checkout_session(
        &self,
        request: &CheckoutSessionRequest,
    ) -> Result<HostedSession, ProviderError>;
}

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::{debug, error, instrument};

use super::{CheckoutSessionRequest, HostedSession, PaymentProvider, ProviderError};
use crate::config::StripeConfig;

/// Stripe REST API base URL.
const STRIPE_API_BASE: &str = "https://api.stripe.com";

#[derive(Clone)]
pub struct StripeClient {
    client: Client,
    api_base: String,
    secret_key: Option<SecretString>,
    price_id: Option<String>,
}

impl std::fmt::Debug for StripeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StripeClient")
            .field("api_base", &self.api_base)
            .field("secret_key", &"[REDACTED]")
            .field("price_id", &self.price_id)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Deserialize)]
struct SessionResponse {
    id: String,
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl StripeClient {
    #[must_use]
    pub fn new(config: &StripeConfig) -> Self {
        Self::with_api_base(config, STRIPE_API_BASE)
    }

    /// Point the client at another host, e.g. a local stub server.
    #[must_use]
    pub fn with_api_base(config: &StripeConfig, api_base: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
            secret_key: config.secret_key.clone(),
            price_id: config.price_id.clone(),
        }
    }

    fn form_params(
        &self,
        price_id: &str,
        request: &CheckoutSessionRequest,
    ) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("payment_method_types[0]", "card".to_string()),
            ("line_items[0][price]", price_id.to_string()),
            ("line_items[0][quantity]", request.quantity.to_string()),
            ("mode", "payment".to_string()),
            ("success_url", request.success_url.clone()),
            ("cancel_url", request.cancel_url.clone()),
        ];
        if let Some(pass_id) = &request.pass_id {
            params.push(("metadata[passId]", pass_id.clone()));
        }
        if let Some(name) = &request.name {
            params.push(("metadata[name]", name.clone()));
        }
        params
    }
}

#[async_trait]
impl PaymentProvider for StripeClient {
    #[instrument(skip(self, request), fields(quantity = request.quantity))]
    async fn create_checkout_session(
        &self,
        request: &CheckoutSessionRequest,
    ) -> Result<HostedSession, ProviderError> {
        let secret_key = self.secret_key.as_ref().ok_or_else(|| {
            ProviderError::Config("You did not provide an API key.".to_string())
        })?;
        let price_id = self
            .price_id
            .as_deref()
            .ok_or_else(|| ProviderError::Config("No price configured for checkout.".to_string()))?;

        let response = self
            .client
            .post(format!("{}/v1/checkout/sessions", self.api_base))
            .bearer_auth(secret_key.expose_secret())
            .form(&self.form_params(price_id, request))
            .send()
            .await
            .map_err(|e| ProviderError::Request(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| ProviderError::Response(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorResponse>(&body)
                .ok()
                .and_then(|e| e.error.message)
                .unwrap_or_else(|| format!("Stripe returned status {status}"));
            error!(status = %status, error = %message, "Stripe API error creating session");
            return Err(ProviderError::Api(message));
        }

        let session: SessionResponse =
            serde_json::from_slice(&body).map_err(|e| ProviderError::Response(e.to_string()))?;
        let url = session.url.ok_or_else(|| {
            ProviderError::Response("Checkout session has no hosted URL".to_string())
        })?;

        debug!(session_id = %session.id, "Checkout session created");

        Ok(HostedSession {
            id: session.id,
            url,
        })
    }
}

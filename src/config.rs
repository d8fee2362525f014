use std::env;

use secrecy::SecretString;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub stripe: StripeConfig,
    /// Explicit public base URL used for checkout redirects.
    pub site_url: Option<String>,
}

/// Payment provider settings. Both values are optional so the server can
/// start without them; checkout then fails with a provider error.
#[derive(Debug, Clone, Default)]
pub struct StripeConfig {
    pub secret_key: Option<SecretString>,
    pub price_id: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let stripe = StripeConfig {
            secret_key: non_empty_var("STRIPE_SECRET_KEY").map(SecretString::from),
            price_id: non_empty_var("STRIPE_PRICE_ID"),
        };
        let site_url = non_empty_var("SITE_URL").or_else(|| non_empty_var("URL"));

        Ok(Self {
            host,
            port,
            stripe,
            site_url,
        })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

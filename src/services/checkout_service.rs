use axum::http::{HeaderMap, header};

use crate::{
    dto::checkout::{CheckoutRequest, CheckoutResponse},
    error::AppResult,
    payments::CheckoutSessionRequest,
    state::AppState,
};

const LOCAL_BASE_URL: &str = "http://localhost:3000";

/// Base URL for checkout redirects: the configured site URL, else the
/// proxy-forwarded or direct host, else localhost.
pub fn resolve_base_url(site_url: Option<&str>, headers: &HeaderMap) -> String {
    if let Some(url) = site_url.map(str::trim).filter(|u| !u.is_empty()) {
        return url.trim_end_matches('/').to_string();
    }

    let Some(host) =
        first_value(headers, "x-forwarded-host").or_else(|| first_value(headers, header::HOST.as_str()))
    else {
        return LOCAL_BASE_URL.to_string();
    };
    let proto = first_value(headers, "x-forwarded-proto").unwrap_or("https");
    format!("{proto}://{host}")
}

/// First non-empty entry of a possibly comma-separated header.
fn first_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

pub async fn start_checkout(
    state: &AppState,
    headers: &HeaderMap,
    payload: CheckoutRequest,
) -> AppResult<CheckoutResponse> {
    let base_url = resolve_base_url(state.config.site_url.as_deref(), headers);
    let quantity = payload.quantity();
    let request = CheckoutSessionRequest {
        quantity,
        success_url: format!("{base_url}/?checkout=success"),
        cancel_url: format!("{base_url}/?checkout=cancelled"),
        pass_id: payload.pass_id,
        name: payload.name,
    };

    let session = state.payments.create_checkout_session(&request).await?;
    tracing::info!(
        session_id = %session.id,
        quantity,
        pass_id = request.pass_id.as_deref().unwrap_or("-"),
        "checkout session created"
    );

    Ok(CheckoutResponse { url: session.url })
}

use std::io::Read;
use std::sync::mpsc;
use std::thread;

use press_pass::{
    config::StripeConfig,
    payments::{CheckoutSessionRequest, PaymentProvider, ProviderError, StripeClient},
};
use secrecy::SecretString;
use tiny_http::{Header, Response, Server};

struct Captured {
    method: String,
    url: String,
    authorization: Option<String>,
    body: String,
}

/// Serve exactly one request with the given status and JSON body.
fn stub_stripe(status: u16, body: &'static str) -> (String, mpsc::Receiver<Captured>) {
    let server = Server::http("127.0.0.1:0").expect("bind stub server");
    let addr = server.server_addr().to_ip().expect("ip listener");
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        if let Ok(mut request) = server.recv() {
            let mut received = String::new();
            let _ = request.as_reader().read_to_string(&mut received);
            let authorization = request
                .headers()
                .iter()
                .find(|h| h.field.equiv("Authorization"))
                .map(|h| h.value.as_str().to_string());
            let _ = tx.send(Captured {
                method: request.method().to_string(),
                url: request.url().to_string(),
                authorization,
                body: received,
            });
            let response = Response::from_string(body)
                .with_status_code(status)
                .with_header(
                    "Content-Type: application/json"
                        .parse::<Header>()
                        .expect("header"),
                );
            let _ = request.respond(response);
        }
    });

    (format!("http://{addr}"), rx)
}

fn configured() -> StripeConfig {
    StripeConfig {
        secret_key: Some(SecretString::from("sk_test_123")),
        price_id: Some("price_test".into()),
    }
}

fn session_request() -> CheckoutSessionRequest {
    CheckoutSessionRequest {
        quantity: 1,
        success_url: "https://example.com/?checkout=success".into(),
        cancel_url: "https://example.com/?checkout=cancelled".into(),
        pass_id: Some("PASS-ABCD1234".into()),
        name: Some("Jane Doe".into()),
    }
}

#[tokio::test]
async fn creates_session_with_form_encoded_request() {
    let (base, rx) = stub_stripe(
        200,
        r#"{"id":"cs_test_a1","object":"checkout.session","url":"https://checkout.stripe.com/c/pay/cs_test_a1"}"#,
    );
    let client = StripeClient::with_api_base(&configured(), base);

    let session = client
        .create_checkout_session(&session_request())
        .await
        .expect("session");

    assert_eq!(session.id, "cs_test_a1");
    assert_eq!(session.url, "https://checkout.stripe.com/c/pay/cs_test_a1");

    let captured = rx.recv().expect("captured request");
    assert_eq!(captured.method, "POST");
    assert_eq!(captured.url, "/v1/checkout/sessions");
    assert_eq!(captured.authorization.as_deref(), Some("Bearer sk_test_123"));
    assert!(captured.body.contains("mode=payment"));
    assert!(captured.body.contains("payment_method_types%5B0%5D=card"));
    assert!(captured.body.contains("line_items%5B0%5D%5Bprice%5D=price_test"));
    assert!(captured.body.contains("line_items%5B0%5D%5Bquantity%5D=1"));
    assert!(captured.body.contains("metadata%5BpassId%5D=PASS-ABCD1234"));
    assert!(captured.body.contains("metadata%5Bname%5D=Jane+Doe"));
    assert!(captured
        .body
        .contains("success_url=https%3A%2F%2Fexample.com%2F%3Fcheckout%3Dsuccess"));
}

#[tokio::test]
async fn provider_error_message_is_surfaced_verbatim() {
    let (base, _rx) = stub_stripe(
        400,
        r#"{"error":{"message":"No such price: 'price_test'","type":"invalid_request_error"}}"#,
    );
    let client = StripeClient::with_api_base(&configured(), base);

    let err = client
        .create_checkout_session(&session_request())
        .await
        .expect_err("stripe rejects");

    assert!(matches!(err, ProviderError::Api(_)));
    assert_eq!(err.to_string(), "No such price: 'price_test'");
}

#[tokio::test]
async fn session_without_url_is_a_response_error() {
    let (base, _rx) = stub_stripe(200, r#"{"id":"cs_test_b2","url":null}"#);
    let client = StripeClient::with_api_base(&configured(), base);

    let err = client
        .create_checkout_session(&session_request())
        .await
        .expect_err("no url");

    assert!(matches!(err, ProviderError::Response(_)));
}

#[tokio::test]
async fn missing_price_is_a_config_error() {
    let config = StripeConfig {
        price_id: None,
        ..configured()
    };
    let client = StripeClient::with_api_base(&config, "http://127.0.0.1:9");

    let err = client
        .create_checkout_session(&session_request())
        .await
        .expect_err("no price");

    assert!(matches!(err, ProviderError::Config(_)));
}

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Body of a checkout request. Every field is optional.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, ToSchema)]
pub struct CheckoutRequest {
    pub quantity: Option<u32>,
    #[serde(rename = "passId")]
    pub pass_id: Option<String>,
    pub name: Option<String>,
}

impl CheckoutRequest {
    /// Parse a JSON body field by field. A field of the wrong type is
    /// dropped on its own; only a body that is not a JSON object falls back
    /// to an empty request.
    pub fn parse_or_default(body: &[u8]) -> Self {
        let Ok(Value::Object(fields)) = serde_json::from_slice::<Value>(body) else {
            return Self::default();
        };
        let text = |key: &str| fields.get(key).and_then(Value::as_str).map(str::to_owned);
        Self {
            quantity: fields
                .get("quantity")
                .and_then(Value::as_u64)
                .and_then(|q| u32::try_from(q).ok()),
            pass_id: text("passId"),
            name: text("name"),
        }
    }

    /// Requested quantity, at least one.
    pub fn quantity(&self) -> u32 {
        self.quantity.filter(|q| *q >= 1).unwrap_or(1)
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CheckoutResponse {
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_body_is_parsed() {
        let request =
            CheckoutRequest::parse_or_default(br#"{"quantity":3,"passId":"PASS-1","name":"Jane"}"#);
        assert_eq!(request.quantity(), 3);
        assert_eq!(request.pass_id.as_deref(), Some("PASS-1"));
        assert_eq!(request.name.as_deref(), Some("Jane"));
    }

    #[test]
    fn malformed_body_falls_back_to_defaults() {
        let bodies: [&[u8]; 5] = [b"", b"   ", b"{not json", b"null", b"[1,2]"];
        for body in bodies {
            let request = CheckoutRequest::parse_or_default(body);
            assert_eq!(request, CheckoutRequest::default());
            assert_eq!(request.quantity(), 1);
        }
    }

    #[test]
    fn bad_quantity_keeps_metadata() {
        for quantity in ["-1", "2.5", "\"two\"", "null", "4294967296"] {
            let body = format!(r#"{{"quantity":{quantity},"passId":"PASS-AB12CD34","name":"Jane"}}"#);
            let request = CheckoutRequest::parse_or_default(body.as_bytes());
            assert_eq!(request.quantity(), 1, "quantity {quantity}");
            assert_eq!(request.pass_id.as_deref(), Some("PASS-AB12CD34"));
            assert_eq!(request.name.as_deref(), Some("Jane"));
        }
    }

    #[test]
    fn mistyped_metadata_is_dropped_alone() {
        let request = CheckoutRequest::parse_or_default(br#"{"quantity":2,"passId":7,"name":"Jane"}"#);
        assert_eq!(request.quantity(), 2);
        assert_eq!(request.pass_id, None);
        assert_eq!(request.name.as_deref(), Some("Jane"));
    }

    #[test]
    fn zero_quantity_becomes_one() {
        let request = CheckoutRequest::parse_or_default(br#"{"quantity":0}"#);
        assert_eq!(request.quantity(), 1);
    }
}

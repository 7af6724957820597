//! Terminal response artifact handed to the HTTP layer.

use std::collections::BTreeMap;

use serde_json::{json, Value};

/// Cross-origin headers attached to every response, error paths included
pub const CORS_HEADERS: [(&str, &str); 3] = [
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Methods", "POST, OPTIONS"),
    ("Access-Control-Allow-Headers", "Content-Type, Authorization"),
];

pub const CONTENT_TYPE_JSON: (&str, &str) = ("Content-Type", "application/json");

/// Status, headers and JSON payload of one reply
///
/// Built once per request and read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseEnvelope {
    status_code: u16,
    headers: BTreeMap<String, String>,
    payload: Value,
}

impl ResponseEnvelope {
    pub fn build(status_code: u16, payload: Value) -> Self {
        let headers = CORS_HEADERS
            .iter()
            .chain(std::iter::once(&CONTENT_TYPE_JSON))
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();

        Self {
            status_code,
            headers,
            payload,
        }
    }

    /// Reply to an `OPTIONS` pre-flight request
    pub fn preflight() -> Self {
        Self::build(200, json!({}))
    }

    /// `{"error": message}` with the given status
    pub fn error(status_code: u16, message: impl Into<String>) -> Self {
        Self::build(status_code, json!({ "error": message.into() }))
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    pub fn payload(&self) -> &Value {
        &self.payload
    }

    pub fn into_parts(self) -> (u16, BTreeMap<String, String>, Value) {
        (self.status_code, self.headers, self.payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_envelope_carries_cors_and_json() {
        for envelope in [
            ResponseEnvelope::build(201, json!({"ok": true})),
            ResponseEnvelope::error(500, "boom"),
            ResponseEnvelope::preflight(),
        ] {
            for (name, value) in CORS_HEADERS {
                assert_eq!(envelope.headers().get(name).map(String::as_str), Some(value));
            }
            assert_eq!(
                envelope.headers().get("Content-Type").map(String::as_str),
                Some("application/json")
            );
        }
    }

    #[test]
    fn test_preflight_is_empty_ok() {
        let envelope = ResponseEnvelope::preflight();
        assert_eq!(envelope.status_code(), 200);
        assert_eq!(envelope.payload(), &json!({}));
    }

    #[test]
    fn test_error_payload() {
        let (status, _, payload) = ResponseEnvelope::error(400, "Country is required").into_parts();
        assert_eq!(status, 400);
        assert_eq!(payload, json!({"error": "Country is required"}));
    }
}

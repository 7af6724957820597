//! Conversion of gateway envelopes into actix responses

use actix_web::http::StatusCode;
use actix_web::HttpResponse;

use dg_core::domain::ResponseEnvelope;

/// Render a `ResponseEnvelope` as an `HttpResponse`
pub trait EnvelopeExt {
    fn into_http_response(self) -> HttpResponse;
}

impl EnvelopeExt for ResponseEnvelope {
    fn into_http_response(self) -> HttpResponse {
        let (status_code, headers, payload) = self.into_parts();

        // upstream statuses outside what HTTP can carry are reported as a bad gateway
        let status = StatusCode::from_u16(status_code).unwrap_or_else(|_| {
            tracing::warn!(status_code, "upstream status is not a valid HTTP status");
            StatusCode::BAD_GATEWAY
        });

        let mut response = HttpResponse::build(status);
        for (name, value) in headers {
            response.insert_header((name, value));
        }
        response.body(payload.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use serde_json::json;

    #[actix_web::test]
    async fn test_envelope_headers_and_body_are_copied() {
        let response = ResponseEnvelope::build(201, json!({"b": 1, "a": 2})).into_http_response();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "*"
        );
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "application/json"
        );
        let body = to_bytes(response.into_body()).await.unwrap();
        assert_eq!(body, r#"{"b":1,"a":2}"#);
    }

    #[actix_web::test]
    async fn test_unrepresentable_status_becomes_bad_gateway() {
        let response = ResponseEnvelope::build(42, json!({})).into_http_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}

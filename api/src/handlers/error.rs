//! Extractor error handling
//!
//! Unreadable bodies never reach a handler; they are answered here with the
//! same envelope a failed upstream call would produce.

use actix_web::error::{InternalError, JsonPayloadError, UrlencodedError};
use actix_web::{web, HttpRequest, HttpResponse};
use serde_json::json;
use tracing::warn;

use dg_core::domain::ResponseEnvelope;
use dg_core::errors::messages;

use super::envelope::EnvelopeExt;

/// Form extractor configuration for the provider routes
pub fn form_config(limit: usize) -> web::FormConfig {
    web::FormConfig::default()
        .limit(limit)
        .error_handler(|err: UrlencodedError, req: &HttpRequest| {
            warn!(error = %err, path = req.path(), "unreadable form body");
            InternalError::from_response(err, unreadable_form()).into()
        })
}

/// JSON extractor configuration for the passthrough route
///
/// The content type is not enforced; any body that decodes is accepted.
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .content_type_required(false)
        .error_handler(|err: JsonPayloadError, req: &HttpRequest| {
            warn!(error = %err, path = req.path(), "unreadable passthrough body");
            let response = unreadable_json(&err.to_string());
            InternalError::from_response(err, response).into()
        })
}

pub fn unreadable_form() -> HttpResponse {
    ResponseEnvelope::error(500, messages::UPSTREAM_FETCH_FAILED).into_http_response()
}

pub fn unreadable_json(details: &str) -> HttpResponse {
    ResponseEnvelope::build(
        500,
        json!({ "error": messages::PASSTHROUGH_FAILED, "details": details }),
    )
    .into_http_response()
}

/// Default handler for unknown paths
pub async fn not_found() -> HttpResponse {
    ResponseEnvelope::build(
        404,
        json!({
            "error": "not_found",
            "message": "The requested resource was not found"
        }),
    )
    .into_http_response()
}

/// Default handler for unsupported methods on a known path
pub async fn method_not_allowed() -> HttpResponse {
    ResponseEnvelope::error(405, "Method not allowed").into_http_response()
}

//! Generic passthrough route

use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use dg_core::domain::ResponseEnvelope;
use dg_core::services::UpstreamClient;

use super::{ambient_credentials, AppState};
use crate::dto::{first_message, PassthroughConfig};
use crate::handlers::EnvelopeExt;

const URL_REQUIRED: &str = "Request configuration is missing or invalid. Must include a URL.";

/// Handler for POST /api/proxy/global
///
/// # Request Body
///
/// ```json
/// {
///     "url": "https://onepva.com/api/sms/?app=x&country=TJ&code=992",
///     "method": "GET",
///     "headers": {"Accept": "application/json"},
///     "body": null,
///     "includeCredentials": false
/// }
/// ```
///
/// A `null` body is answered like a missing URL.
pub async fn global<C: UpstreamClient + 'static>(
    req: HttpRequest,
    state: web::Data<AppState<C>>,
    config: web::Json<Option<PassthroughConfig>>,
) -> HttpResponse {
    let Some(config) = config.into_inner() else {
        return ResponseEnvelope::error(400, URL_REQUIRED).into_http_response();
    };
    if let Err(errors) = config.validate() {
        let message = first_message(&errors, &PassthroughConfig::FIELD_ORDER);
        return ResponseEnvelope::error(400, message).into_http_response();
    }

    let request = config.into_request();
    tracing::info!(method = %request.method, include_credentials = request.include_credentials, "passthrough request");

    state
        .gateway
        .dispatch(&state.providers.passthrough, &request, &ambient_credentials(&req))
        .await
        .into_http_response()
}

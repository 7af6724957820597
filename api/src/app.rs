//! Application factory
//!
//! Builds the actix `App` for a given transport so the binary and the
//! integration tests wire routes, extractor limits and logging identically.

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App, HttpResponse};
use serde_json::json;
use tracing_actix_web::TracingLogger;

use dg_core::domain::ResponseEnvelope;
use dg_core::services::UpstreamClient;

use crate::handlers::{form_config, json_config, not_found, EnvelopeExt, MultipartFormConfig};
use crate::routes::proxy::{self, AppState};

/// Create and configure the application with all dependencies
pub fn create_app<C>(
    app_state: web::Data<AppState<C>>,
    payload_limit: usize,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    C: UpstreamClient + 'static,
{
    App::new()
        .app_data(app_state)
        .app_data(form_config(payload_limit))
        .app_data(MultipartFormConfig::new(payload_limit))
        .app_data(json_config(payload_limit))
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health_check))
        .service(web::scope("/api/proxy").configure(proxy::configure::<C>))
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    ResponseEnvelope::build(
        200,
        json!({
            "status": "healthy",
            "service": "did-gateway",
            "version": env!("CARGO_PKG_VERSION"),
            "timestamp": chrono::Utc::now().to_rfc3339(),
        }),
    )
    .into_http_response()
}

//! Proxy route handlers
//!
//! Every route answers POST with one gateway dispatch and OPTIONS with the
//! static preflight envelope:
//! - `/getNumber` and `/getNumberSms`: acchub form routes
//! - `/getNumberPVA`: onepva query-string route
//! - `/global`: caller-specified passthrough

pub mod get_number;
pub mod get_number_pva;
pub mod global;

use actix_web::http::{header, Method};
use actix_web::{web, HttpRequest, HttpResponse};

use dg_core::domain::{AmbientCredentials, ProviderId, ResponseEnvelope};
use dg_core::services::{GatewayService, UpstreamClient};
use dg_infra::Providers;

use crate::handlers::{method_not_allowed, EnvelopeExt};

pub use get_number::{get_number, get_number_sms};
pub use get_number_pva::get_number_pva;
pub use global::global;

/// Application state shared by the proxy routes
pub struct AppState<C: UpstreamClient> {
    pub gateway: GatewayService<C>,
    pub providers: Providers,
}

impl<C: UpstreamClient> AppState<C> {
    pub fn new(gateway: GatewayService<C>, providers: Providers) -> Self {
        Self { gateway, providers }
    }
}

/// Handler for OPTIONS on every proxy route
pub async fn preflight() -> HttpResponse {
    ResponseEnvelope::preflight().into_http_response()
}

/// Register the proxy routes on a scope
pub fn configure<C: UpstreamClient + 'static>(cfg: &mut web::ServiceConfig) {
    cfg.service(proxy_resource(ProviderId::AcchubNumber).route(web::post().to(get_number::<C>)))
        .service(proxy_resource(ProviderId::AcchubSms).route(web::post().to(get_number_sms::<C>)))
        .service(proxy_resource(ProviderId::OnePva).route(web::post().to(get_number_pva::<C>)))
        .service(proxy_resource(ProviderId::Passthrough).route(web::post().to(global::<C>)));
}

fn proxy_resource(provider: ProviderId) -> actix_web::Resource {
    web::resource(format!("/{}", provider.route()))
        .route(web::method(Method::OPTIONS).to(preflight))
        .default_service(web::to(method_not_allowed))
}

/// Cookie and Authorization of the inbound request
pub fn ambient_credentials(req: &HttpRequest) -> AmbientCredentials {
    let value = |name: header::HeaderName| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };

    AmbientCredentials {
        cookie: value(header::COOKIE),
        authorization: value(header::AUTHORIZATION),
    }
}

/// Dispatch a provision request through the adapter registered for `provider`
pub(crate) async fn dispatch_provision<C: UpstreamClient>(
    req: &HttpRequest,
    state: &AppState<C>,
    request: dg_core::domain::ProvisionRequest,
) -> HttpResponse {
    let Some(adapter) = state.providers.provision(request.provider) else {
        tracing::error!(provider = %request.provider, "no adapter registered");
        return ResponseEnvelope::error(500, dg_core::errors::messages::UPSTREAM_FETCH_FAILED)
            .into_http_response();
    };

    state
        .gateway
        .dispatch(adapter, &request, &ambient_credentials(req))
        .await
        .into_http_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_ambient_credentials_are_read_from_headers() {
        let req = TestRequest::default()
            .insert_header((header::COOKIE, "sid=1"))
            .insert_header((header::AUTHORIZATION, "Bearer abc"))
            .to_http_request();

        let ambient = ambient_credentials(&req);
        assert_eq!(ambient.cookie.as_deref(), Some("sid=1"));
        assert_eq!(ambient.authorization.as_deref(), Some("Bearer abc"));
    }

    #[test]
    fn test_missing_headers_give_empty_credentials() {
        let req = TestRequest::default().to_http_request();
        assert!(ambient_credentials(&req).is_empty());
    }
}

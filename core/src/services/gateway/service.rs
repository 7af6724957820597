//! Main gateway service implementation

use std::sync::Arc;

use tracing::{debug, info, warn, Instrument};

use crate::domain::reply::{self, ParsedReply};
use crate::domain::{AmbientCredentials, ResponseEnvelope};
use crate::errors::GatewayError;
use crate::services::adapter::ProviderAdapter;
use crate::services::traits::UpstreamClient;

/// Stateless orchestrator shared by every route
///
/// Holds only the transport; each `dispatch` is independent of any other
/// in-flight request.
pub struct GatewayService<C: UpstreamClient> {
    client: Arc<C>,
}

impl<C: UpstreamClient> GatewayService<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Arc<C> {
        &self.client
    }

    /// Run one request to completion and return its envelope
    ///
    /// Validation failures answer 400 without touching the network. A failed
    /// outbound call answers 500. Otherwise the upstream status is propagated
    /// with the adapter-shaped payload.
    pub async fn dispatch<A: ProviderAdapter + ?Sized>(
        &self,
        adapter: &A,
        request: &A::Request,
        ambient: &AmbientCredentials,
    ) -> ResponseEnvelope {
        let span = tracing::info_span!("gateway_dispatch", provider = %adapter.provider());
        self.run(adapter, request, ambient).instrument(span).await
    }

    async fn run<A: ProviderAdapter + ?Sized>(
        &self,
        adapter: &A,
        request: &A::Request,
        ambient: &AmbientCredentials,
    ) -> ResponseEnvelope {
        if let Err(error) = adapter.validate(request) {
            warn!(error = %error, "rejecting request");
            return self.fail(adapter, &error);
        }

        let call = match adapter.build_call(request) {
            Ok(call) => call.attach_ambient(ambient),
            Err(error) => {
                warn!(error = %error, "could not build outbound call");
                return self.fail(adapter, &error);
            }
        };

        debug!(
            method = call.method(),
            host = %call.target_host(),
            credentials = call.include_credentials(),
            "issuing outbound call"
        );

        let raw = match self.client.issue(&call).await {
            Ok(raw) => raw,
            Err(error) => {
                warn!(error = %error, host = %call.target_host(), "outbound call failed");
                return self.fail(adapter, &error);
            }
        };

        info!(
            status = raw.status_code,
            content_type = raw.content_type.as_deref().unwrap_or("-"),
            bytes = raw.body_text.len(),
            "upstream replied"
        );

        let parsed = reply::parse(&raw, adapter.parse_policy());
        if let ParsedReply::Unstructured { reason, .. } = &parsed {
            warn!(?reason, status = raw.status_code, "passing unstructured reply through");
        }

        let payload = adapter.shape_reply(parsed, request, &call);
        ResponseEnvelope::build(raw.status_code, payload)
    }

    fn fail<A: ProviderAdapter + ?Sized>(&self, adapter: &A, error: &GatewayError) -> ResponseEnvelope {
        ResponseEnvelope::build(error.status_code(), adapter.failure_payload(error))
    }
}

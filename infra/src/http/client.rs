//! reqwest implementation of `UpstreamClient`
//!
//! Every `issue` performs exactly one request. There is no retry, no backoff
//! and no circuit breaking; the pooled `reqwest::Client` is the only state
//! shared between requests.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::multipart::Form;
use reqwest::{Client, Method, Url};
use tracing::{debug, error};

use dg_core::domain::{CallBody, OutboundCall, RawUpstreamReply};
use dg_core::errors::{GatewayError, GatewayResult};
use dg_core::services::UpstreamClient;
use dg_shared::UpstreamConfig;

use crate::InfrastructureError;

/// Pooled HTTP transport for provider and passthrough calls
#[derive(Clone)]
pub struct ReqwestUpstreamClient {
    client: Client,
}

impl ReqwestUpstreamClient {
    /// Build the transport from the `upstream` configuration section
    pub fn new(config: &UpstreamConfig) -> Result<Self, InfrastructureError> {
        let mut builder =
            Client::builder().pool_idle_timeout(Duration::from_secs(config.pool_idle_timeout_secs));

        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(secs) = config.connect_timeout_secs {
            builder = builder.connect_timeout(Duration::from_secs(secs));
        }

        let client = builder.build()?;

        debug!(
            timeout_secs = ?config.timeout_secs,
            connect_timeout_secs = ?config.connect_timeout_secs,
            "upstream client ready"
        );

        Ok(Self { client })
    }

    /// Wrap an existing reqwest client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    fn method(call: &OutboundCall) -> GatewayResult<Method> {
        Method::from_bytes(call.method().as_bytes()).map_err(|e| {
            GatewayError::invalid_call(format!("invalid method '{}': {}", call.method(), e))
        })
    }

    fn url(call: &OutboundCall) -> GatewayResult<Url> {
        Url::parse(call.url())
            .map_err(|e| GatewayError::invalid_call(format!("invalid URL: {}", e)))
    }

    fn headers(call: &OutboundCall) -> GatewayResult<HeaderMap> {
        let mut headers = HeaderMap::with_capacity(call.headers().len());
        for (name, value) in call.headers() {
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                GatewayError::invalid_call(format!("invalid header name '{}': {}", name, e))
            })?;
            let header_value = HeaderValue::from_str(value).map_err(|e| {
                GatewayError::invalid_call(format!("invalid value for header '{}': {}", name, e))
            })?;
            headers.insert(header_name, header_value);
        }
        Ok(headers)
    }
}

#[async_trait]
impl UpstreamClient for ReqwestUpstreamClient {
    async fn issue(&self, call: &OutboundCall) -> GatewayResult<RawUpstreamReply> {
        let method = Self::method(call)?;
        let url = Self::url(call)?;
        let headers = Self::headers(call)?;

        let mut request = self.client.request(method, url).headers(headers);
        request = match call.body() {
            CallBody::Empty => request,
            CallBody::Text(text) => request.body(text.clone()),
            CallBody::Form(fields) => {
                let form = fields
                    .iter()
                    .fold(Form::new(), |form, (name, value)| form.text(name.clone(), value.clone()));
                request.multipart(form)
            }
        };

        let response = request.send().await.map_err(|e| {
            error!(error = %e, host = %call.target_host(), "upstream request failed");
            GatewayError::unreachable(e.to_string())
        })?;

        let status_code = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let body_text = response.text().await.map_err(|e| {
            error!(error = %e, host = %call.target_host(), "failed to read upstream body");
            GatewayError::unreachable(e.to_string())
        })?;

        Ok(RawUpstreamReply::new(status_code, content_type, body_text))
    }
}

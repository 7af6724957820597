//! onepva adapter: query-string GET with the credential in a cookie

use serde_json::{json, Value};
use url::Url;

use dg_core::domain::number::normalize;
use dg_core::domain::{OutboundCall, ParsedReply, ProviderId, ProvisionRequest};
use dg_core::errors::{messages, GatewayError, GatewayResult};
use dg_core::services::ProviderAdapter;
use dg_shared::ProvidersConfig;

use super::browser::{endpoint_origin, BrowserProfile};
use crate::InfrastructureError;

pub const FIELDS_REQUIRED: &str = "app, country, auth-token, and code are required";

#[derive(Debug, Clone)]
pub struct OnePvaAdapter {
    endpoint: Url,
    origin: String,
    profile: BrowserProfile,
}

impl OnePvaAdapter {
    pub fn new(endpoint: &str, profile: BrowserProfile) -> Result<Self, InfrastructureError> {
        let origin = endpoint_origin(endpoint)?;
        let endpoint = Url::parse(endpoint)
            .map_err(|e| InfrastructureError::Config(format!("invalid onepva endpoint: {}", e)))?;
        Ok(Self {
            endpoint,
            origin,
            profile,
        })
    }

    pub fn from_config(config: &ProvidersConfig) -> Result<Self, InfrastructureError> {
        Self::new(&config.onepva_url, BrowserProfile::from_config(config))
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }
}

fn required(value: Option<&str>) -> GatewayResult<&str> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| GatewayError::validation(FIELDS_REQUIRED))
}

impl ProviderAdapter for OnePvaAdapter {
    type Request = ProvisionRequest;

    fn provider(&self) -> ProviderId {
        ProviderId::OnePva
    }

    fn validate(&self, request: &ProvisionRequest) -> GatewayResult<()> {
        required(request.app.as_deref())?;
        required(Some(request.country.as_str()))?;
        required(Some(request.credential.as_str()))?;
        required(request.code.as_deref())?;
        request.validate()
    }

    fn build_call(&self, request: &ProvisionRequest) -> GatewayResult<OutboundCall> {
        let app = required(request.app.as_deref())?;
        let code = required(request.code.as_deref())?;

        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("app", app)
            .append_pair("country", &request.country)
            .append_pair("auth-token", &request.credential)
            .append_pair("code", code);

        Ok(OutboundCall::new("GET", url.to_string())
            .with_headers(self.profile.headers())
            .with_header("Referer", format!("{}/", self.origin))
            .with_header(
                "Cookie",
                format!("authToken={}; authRole=Normal", request.credential),
            )
            .with_credentials(false))
    }

    fn shape_reply(&self, parsed: ParsedReply, request: &ProvisionRequest, _call: &OutboundCall) -> Value {
        if let Some(number) = normalize(&parsed, request.country_hint()) {
            return number.to_value();
        }
        match parsed {
            ParsedReply::Structured(value) => value,
            ParsedReply::Unstructured { text, .. } => {
                json!({ "error": messages::FAILED_TO_PROCESS_RESPONSE, "message": text })
            }
        }
    }
}

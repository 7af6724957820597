//! acchub adapters
//!
//! Both acchub routes post the same multipart form (`app` = country hint,
//! optional `carrier`) with the credential in the `auth-token` header. They
//! differ in endpoint and in how the reply is shaped:
//!
//! - `Number` reads the body as JSON only when the content type says so and
//!   normalizes it when it is in the success shape.
//! - `Sms` sniffs the body and always answers with the number triple, empty
//!   when no DID can be found.

use serde_json::{json, Value};

use dg_core::domain::calling_code::trailing_code_suffix;
use dg_core::domain::number::{lenient_did, normalize};
use dg_core::domain::{
    CallBody, NormalizedNumber, OutboundCall, ParsePolicy, ParsedReply, ProviderId,
    ProvisionRequest, UnstructuredReason,
};
use dg_core::errors::{messages, GatewayError, GatewayResult};
use dg_core::services::ProviderAdapter;
use dg_shared::ProvidersConfig;

use super::browser::{endpoint_origin, BrowserProfile};
use crate::InfrastructureError;

pub const COUNTRY_REQUIRED: &str = "Country is required";
pub const AUTH_KEY_REQUIRED: &str = "authKey is required";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcchubRoute {
    Number,
    Sms,
}

#[derive(Debug, Clone)]
pub struct AcchubAdapter {
    route: AcchubRoute,
    endpoint: String,
    origin: String,
    profile: BrowserProfile,
}

impl AcchubAdapter {
    pub fn new(
        route: AcchubRoute,
        endpoint: impl Into<String>,
        profile: BrowserProfile,
    ) -> Result<Self, InfrastructureError> {
        let endpoint = endpoint.into();
        let origin = endpoint_origin(&endpoint)?;
        Ok(Self {
            route,
            endpoint,
            origin,
            profile,
        })
    }

    /// Adapter for the number acquisition endpoint
    pub fn number(config: &ProvidersConfig) -> Result<Self, InfrastructureError> {
        Self::new(
            AcchubRoute::Number,
            config.acchub_number_url.clone(),
            BrowserProfile::from_config(config),
        )
    }

    /// Adapter for the SMS-style acquisition endpoint
    pub fn sms(config: &ProvidersConfig) -> Result<Self, InfrastructureError> {
        Self::new(
            AcchubRoute::Sms,
            config.acchub_sms_url.clone(),
            BrowserProfile::from_config(config),
        )
    }

    pub fn route(&self) -> AcchubRoute {
        self.route
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn shape_number(&self, parsed: ParsedReply, request: &ProvisionRequest) -> Value {
        if let Some(number) = normalize(&parsed, request.country_hint()) {
            return number.to_value();
        }
        match parsed {
            ParsedReply::Structured(value) => value,
            ParsedReply::Unstructured {
                text,
                reason: UnstructuredReason::InvalidJson,
            } => json!({ "error": messages::INVALID_JSON_FORMAT, "message": text }),
            ParsedReply::Unstructured {
                text,
                reason: UnstructuredReason::NotJson,
            } => json!({ "message": text }),
        }
    }

    fn shape_sms(&self, parsed: ParsedReply, request: &ProvisionRequest) -> Value {
        match parsed {
            ParsedReply::Structured(value) => lenient_did(&value)
                .map(|did| NormalizedNumber::from_did(did, trailing_code_suffix(request.country_hint())))
                .unwrap_or_else(NormalizedNumber::empty)
                .to_value(),
            ParsedReply::Unstructured { text, .. } => {
                json!({ "error": messages::FAILED_TO_PROCESS_RESPONSE, "message": text })
            }
        }
    }
}

impl ProviderAdapter for AcchubAdapter {
    type Request = ProvisionRequest;

    fn provider(&self) -> ProviderId {
        match self.route {
            AcchubRoute::Number => ProviderId::AcchubNumber,
            AcchubRoute::Sms => ProviderId::AcchubSms,
        }
    }

    fn validate(&self, request: &ProvisionRequest) -> GatewayResult<()> {
        if request.country.trim().is_empty() {
            return Err(GatewayError::validation(COUNTRY_REQUIRED));
        }
        if request.credential.trim().is_empty() {
            return Err(GatewayError::validation(AUTH_KEY_REQUIRED));
        }
        request.validate()
    }

    fn build_call(&self, request: &ProvisionRequest) -> GatewayResult<OutboundCall> {
        let mut fields = vec![("app".to_string(), request.country.clone())];
        if let Some(carrier) = &request.carrier {
            fields.push(("carrier".to_string(), carrier.clone()));
        }

        Ok(OutboundCall::new("POST", self.endpoint.clone())
            .with_headers(self.profile.headers())
            .with_header("Origin", self.origin.clone())
            .with_header("Referer", format!("{}/", self.origin))
            .with_header("Sec-Fetch-Dest", "empty")
            .with_header("Sec-Fetch-Mode", "cors")
            .with_header("Sec-Fetch-Site", "same-origin")
            .with_header("auth-token", request.credential.clone())
            .with_body(CallBody::Form(fields))
            .with_credentials(true))
    }

    fn parse_policy(&self) -> ParsePolicy {
        match self.route {
            AcchubRoute::Number => ParsePolicy::DeclaredContentType,
            AcchubRoute::Sms => ParsePolicy::Sniff,
        }
    }

    fn shape_reply(&self, parsed: ParsedReply, request: &ProvisionRequest, _call: &OutboundCall) -> Value {
        match self.route {
            AcchubRoute::Number => self.shape_number(parsed, request),
            AcchubRoute::Sms => self.shape_sms(parsed, request),
        }
    }
}

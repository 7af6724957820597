//! Generic passthrough adapter
//!
//! Forwards a fully caller-specified request. When the reply is in the
//! provider success shape the number triple is added next to the original
//! payload; the calling code is recovered from the request itself for the
//! providers we know.

use serde_json::{json, Value};

use dg_core::domain::calling_code::{multipart_app_field, query_param, trailing_code_suffix};
use dg_core::domain::number::normalize_with;
use dg_core::domain::{
    CallBody, CallingCodeStrategy, OutboundCall, ParsedReply, PassthroughRequest, ProviderId,
};
use dg_core::errors::{messages, GatewayError, GatewayResult};
use dg_core::services::ProviderAdapter;

const ONEPVA_DOMAIN: &str = "onepva.com";
const ACCHUB_DOMAIN: &str = "acchub.io";

#[derive(Debug, Clone, Default)]
pub struct PassthroughAdapter;

impl PassthroughAdapter {
    pub fn new() -> Self {
        Self
    }

    /// Pick the calling-code source for a forwarded call
    pub fn calling_code_strategy(call: &OutboundCall) -> CallingCodeStrategy {
        let host = match url::Url::parse(call.url()) {
            Ok(url) => url.host_str().map(str::to_ascii_lowercase),
            Err(_) => None,
        };
        let Some(host) = host else {
            return CallingCodeStrategy::Unresolved;
        };

        if on_domain(&host, ONEPVA_DOMAIN) {
            // the code is only trusted alongside an explicit country
            if query_param(call.url(), "country").is_some_and(|c| !c.is_empty()) {
                if let Some(code) = query_param(call.url(), "code") {
                    return CallingCodeStrategy::Known(code);
                }
            }
        } else if on_domain(&host, ACCHUB_DOMAIN) {
            let code = call
                .body()
                .as_text()
                .and_then(multipart_app_field)
                .and_then(trailing_code_suffix);
            if let Some(code) = code {
                return CallingCodeStrategy::Known(code.to_string());
            }
        }

        CallingCodeStrategy::Unresolved
    }
}

fn on_domain(host: &str, domain: &str) -> bool {
    host == domain || host.ends_with(&format!(".{}", domain))
}

impl ProviderAdapter for PassthroughAdapter {
    type Request = PassthroughRequest;

    fn provider(&self) -> ProviderId {
        ProviderId::Passthrough
    }

    fn validate(&self, request: &PassthroughRequest) -> GatewayResult<()> {
        request.validate()
    }

    fn build_call(&self, request: &PassthroughRequest) -> GatewayResult<OutboundCall> {
        let body = match &request.body {
            Some(text) if !text.is_empty() => CallBody::Text(text.clone()),
            _ => CallBody::Empty,
        };

        Ok(
            OutboundCall::new(request.method.to_ascii_uppercase(), request.url.clone())
                .with_headers(request.headers.clone())
                .with_body(body)
                .with_credentials(request.include_credentials),
        )
    }

    fn shape_reply(&self, parsed: ParsedReply, _request: &PassthroughRequest, call: &OutboundCall) -> Value {
        let strategy = Self::calling_code_strategy(call);
        if let Some(number) = normalize_with(&parsed, &strategy) {
            let original = parsed.as_structured().cloned().unwrap_or(Value::Null);
            return json!({
                "full": number.full,
                "plus": number.plus,
                "national": number.national,
                "original": original,
            });
        }
        match parsed {
            ParsedReply::Structured(value) => value,
            ParsedReply::Unstructured { text, .. } => {
                json!({ "raw": text, "error": messages::FAILED_TO_PARSE_JSON })
            }
        }
    }

    fn failure_payload(&self, error: &GatewayError) -> Value {
        match error {
            GatewayError::Validation { message } => json!({ "error": message }),
            _ => json!({
                "error": messages::PASSTHROUGH_FAILED,
                "details": error.public_detail(),
            }),
        }
    }
}

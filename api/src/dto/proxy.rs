//! Request bodies accepted by the proxy routes

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;
use validator::{Validate, ValidationErrors};

use dg_core::domain::{PassthroughRequest, ProviderId, ProvisionRequest};

/// Form body of `/getNumber` and `/getNumberSms`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GetNumberForm {
    /// Country hint, e.g. `master--TJ-992`
    #[serde(default)]
    #[validate(length(min = 1, message = "Country is required"))]
    pub country: String,

    #[serde(default)]
    pub carrier: Option<String>,

    #[serde(default, rename = "authKey")]
    #[validate(length(min = 1, message = "authKey is required"))]
    pub auth_key: String,
}

impl GetNumberForm {
    /// Field names as reported by validation, serde names included
    pub const FIELD_ORDER: [&'static str; 3] = ["country", "auth_key", "authKey"];

    pub fn into_request(self, provider: ProviderId) -> ProvisionRequest {
        ProvisionRequest::new(provider, self.country, self.auth_key).with_carrier(self.carrier)
    }
}

/// Form body of `/getNumberPVA`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PvaForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "app, country, auth-token, and code are required"))]
    pub app: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "app, country, auth-token, and code are required"))]
    pub country: String,

    #[serde(default, rename = "auth-token")]
    #[validate(length(min = 1, message = "app, country, auth-token, and code are required"))]
    pub auth_token: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "app, country, auth-token, and code are required"))]
    pub code: String,
}

impl PvaForm {
    pub const FIELD_ORDER: [&'static str; 5] = ["app", "country", "auth_token", "auth-token", "code"];

    pub fn into_request(self) -> ProvisionRequest {
        ProvisionRequest::new(ProviderId::OnePva, self.country, self.auth_token)
            .with_app(self.app)
            .with_code(self.code)
    }
}

/// JSON body of `/global`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PassthroughConfig {
    #[serde(default)]
    #[validate(length(
        min = 1,
        message = "Request configuration is missing or invalid. Must include a URL."
    ))]
    pub url: String,

    #[serde(default)]
    pub headers: Option<BTreeMap<String, Value>>,

    #[serde(default)]
    pub method: Option<String>,

    /// Strings are sent as-is; any other JSON value is serialized
    #[serde(default)]
    pub body: Option<Value>,

    #[serde(default, rename = "includeCredentials")]
    pub include_credentials: bool,
}

impl PassthroughConfig {
    pub const FIELD_ORDER: [&'static str; 1] = ["url"];

    pub fn into_request(self) -> PassthroughRequest {
        let headers = self
            .headers
            .unwrap_or_default()
            .into_iter()
            .filter_map(|(name, value)| value_text(value).map(|text| (name, text)))
            .collect();

        let mut request = PassthroughRequest::new(self.url)
            .with_headers(headers)
            .with_body(self.body.and_then(value_text))
            .including_credentials(self.include_credentials);
        if let Some(method) = self.method.filter(|m| !m.trim().is_empty()) {
            request = request.with_method(method);
        }
        request
    }
}

fn value_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text),
        other => Some(other.to_string()),
    }
}

/// First validation message, following the declared field order
pub fn first_message(errors: &ValidationErrors, field_order: &[&str]) -> String {
    let by_field = errors.field_errors();
    field_order
        .iter()
        .filter_map(|field| by_field.get(*field))
        .flat_map(|errs| errs.iter())
        .find_map(|err| err.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| errors.to_string())
}

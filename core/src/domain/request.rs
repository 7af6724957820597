//! Canonical inbound requests.

use std::collections::BTreeMap;

use crate::domain::provider::ProviderId;
use crate::errors::{GatewayError, GatewayResult};

/// Canonical number acquisition request
///
/// `country` is a provider-specific identifier that may embed a calling code
/// suffix (e.g. `master--TJ-992`); `credential` is an opaque token. Query-string
/// providers also need `app` and `code`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionRequest {
    pub provider: ProviderId,
    pub country: String,
    pub carrier: Option<String>,
    pub credential: String,
    pub app: Option<String>,
    pub code: Option<String>,
}

impl ProvisionRequest {
    pub fn new(
        provider: ProviderId,
        country: impl Into<String>,
        credential: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            country: country.into(),
            carrier: None,
            credential: credential.into(),
            app: None,
            code: None,
        }
    }

    /// Set the carrier; empty values are treated as absent
    pub fn with_carrier(mut self, carrier: Option<String>) -> Self {
        self.carrier = non_empty(carrier);
        self
    }

    pub fn with_app(mut self, app: impl Into<String>) -> Self {
        self.app = non_empty(Some(app.into()));
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = non_empty(Some(code.into()));
        self
    }

    /// Hint used to infer the calling code length of a returned DID
    pub fn country_hint(&self) -> &str {
        &self.country
    }

    /// Check the provider-specific required field set
    pub fn validate(&self) -> GatewayResult<()> {
        if self.provider == ProviderId::Passthrough {
            return Err(GatewayError::validation(
                "passthrough calls take a passthrough request",
            ));
        }

        let missing: Vec<&str> = self
            .provider
            .required_fields()
            .iter()
            .copied()
            .filter(|field| self.field_is_blank(field))
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(GatewayError::validation(format!(
                "missing required field(s): {}",
                missing.join(", ")
            )))
        }
    }

    fn field_is_blank(&self, field: &str) -> bool {
        let value = match field {
            "country" => Some(self.country.as_str()),
            "credential" => Some(self.credential.as_str()),
            "app" => self.app.as_deref(),
            "code" => self.code.as_deref(),
            _ => return false,
        };
        value.map_or(true, |v| v.trim().is_empty())
    }
}

/// Fully caller-specified request forwarded without adaptation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassthroughRequest {
    pub url: String,
    pub method: String,
    pub headers: BTreeMap<String, String>,
    pub body: Option<String>,
    /// Forward the inbound cookie and authorization only when set
    pub include_credentials: bool,
}

impl PassthroughRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: "GET".to_string(),
            headers: BTreeMap::new(),
            body: None,
            include_credentials: false,
        }
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    pub fn with_headers(mut self, headers: BTreeMap<String, String>) -> Self {
        self.headers = headers;
        self
    }

    pub fn with_body(mut self, body: Option<String>) -> Self {
        self.body = body;
        self
    }

    pub fn including_credentials(mut self, include: bool) -> Self {
        self.include_credentials = include;
        self
    }

    pub fn validate(&self) -> GatewayResult<()> {
        if self.url.trim().is_empty() {
            return Err(GatewayError::validation(
                "Request configuration is missing or invalid. Must include a URL.",
            ));
        }
        Ok(())
    }
}

/// Credentials carried by the inbound request itself
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AmbientCredentials {
    pub cookie: Option<String>,
    pub authorization: Option<String>,
}

impl AmbientCredentials {
    pub fn is_empty(&self) -> bool {
        self.cookie.is_none() && self.authorization.is_none()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

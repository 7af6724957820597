//! Browser profile presented to the form-based providers
//!
//! The providers only answer requests that look like they come from their
//! own web front-end, so every call carries the same desktop Chrome headers.

use url::Url;

use dg_shared::ProvidersConfig;

use crate::InfrastructureError;

const ACCEPT: &str = "application/json, text/javascript, */*; q=0.01";
const SEC_CH_UA: &str = r#""Chromium";v="134", "Not:A-Brand";v="24", "Google Chrome";v="134""#;

#[derive(Debug, Clone)]
pub struct BrowserProfile {
    user_agent: String,
    accept_language: String,
}

impl BrowserProfile {
    pub fn from_config(config: &ProvidersConfig) -> Self {
        Self {
            user_agent: config.user_agent.clone(),
            accept_language: config.accept_language.clone(),
        }
    }

    /// Headers common to every provider call
    pub fn headers(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Accept", ACCEPT.to_string()),
            ("Accept-Language", self.accept_language.clone()),
            ("Connection", "keep-alive".to_string()),
            ("User-Agent", self.user_agent.clone()),
            ("X-Requested-With", "XMLHttpRequest".to_string()),
            ("sec-ch-ua", SEC_CH_UA.to_string()),
            ("sec-ch-ua-mobile", "?0".to_string()),
            ("sec-ch-ua-platform", r#""Windows""#.to_string()),
        ]
    }
}

/// Scheme, host and port of an endpoint, e.g. `https://onepva.com`
pub fn endpoint_origin(endpoint: &str) -> Result<String, InfrastructureError> {
    let url = Url::parse(endpoint)
        .map_err(|e| InfrastructureError::Config(format!("invalid endpoint '{}': {}", endpoint, e)))?;
    let origin = url.origin();
    if !origin.is_tuple() {
        return Err(InfrastructureError::Config(format!(
            "endpoint '{}' has no origin",
            endpoint
        )));
    }
    Ok(origin.ascii_serialization())
}

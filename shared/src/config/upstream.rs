//! Outbound transport and provider endpoint configuration

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Outbound HTTP transport configuration
///
/// No request timeout is applied unless `timeout_secs` is set. A timed out
/// call surfaces the same way as any other transport failure.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    /// Total timeout for one outbound call, in seconds
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Timeout for establishing the connection, in seconds
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,

    /// How long idle pooled connections are kept, in seconds
    #[serde(default = "default_pool_idle_timeout")]
    pub pool_idle_timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            timeout_secs: None,
            connect_timeout_secs: None,
            pool_idle_timeout_secs: default_pool_idle_timeout(),
        }
    }
}

/// Provider endpoints and the browser profile presented to them
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProvidersConfig {
    /// Form endpoint used by the number acquisition route
    #[serde(default = "default_acchub_number_url")]
    pub acchub_number_url: String,

    /// Form endpoint used by the SMS-style acquisition route
    #[serde(default = "default_acchub_sms_url")]
    pub acchub_sms_url: String,

    /// Query-string endpoint
    #[serde(default = "default_onepva_url")]
    pub onepva_url: String,

    /// User-Agent sent with provider requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Accept-Language sent with provider requests
    #[serde(default = "default_accept_language")]
    pub accept_language: String,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            acchub_number_url: default_acchub_number_url(),
            acchub_sms_url: default_acchub_sms_url(),
            onepva_url: default_onepva_url(),
            user_agent: default_user_agent(),
            accept_language: default_accept_language(),
        }
    }
}

impl ProvidersConfig {
    /// Every endpoint must be an absolute http(s) URL
    pub fn validate(&self) -> Result<(), ConfigError> {
        let endpoints = [
            ("providers.acchub_number_url", &self.acchub_number_url),
            ("providers.acchub_sms_url", &self.acchub_sms_url),
            ("providers.onepva_url", &self.onepva_url),
        ];
        for (key, value) in endpoints {
            if !(value.starts_with("https://") || value.starts_with("http://")) {
                return Err(ConfigError::Invalid {
                    message: format!("{} must be an absolute http(s) URL", key),
                });
            }
        }
        Ok(())
    }
}

fn default_pool_idle_timeout() -> u64 {
    90
}

fn default_acchub_number_url() -> String {
    String::from("https://raazit.acchub.io/api/getNumber/")
}

fn default_acchub_sms_url() -> String {
    String::from("https://raazit.acchub.io/api/getSmsNumber/")
}

fn default_onepva_url() -> String {
    String::from("https://onepva.com/api/sms/")
}

fn default_user_agent() -> String {
    String::from(
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/134.0.0.0 Safari/537.36",
    )
}

fn default_accept_language() -> String {
    String::from("en-US,en;q=0.9,bn;q=0.8")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_endpoint_is_rejected() {
        let config = ProvidersConfig {
            onepva_url: "/api/sms/".to_string(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("providers.onepva_url"));
    }

    #[test]
    fn test_upstream_defaults_have_no_timeout() {
        let config = UpstreamConfig::default();
        assert!(config.timeout_secs.is_none());
        assert!(config.connect_timeout_secs.is_none());
        assert_eq!(config.pool_idle_timeout_secs, 90);
    }
}

//! Supported upstream targets.

use serde::{Deserialize, Serialize};

/// Closed set of upstream targets, each served by exactly one adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderId {
    /// Form endpoint, header credential
    AcchubNumber,
    /// Form endpoint, header credential, reply always reshaped to a triple
    AcchubSms,
    /// Query-string endpoint, cookie credential
    OnePva,
    /// Caller-specified endpoint
    Passthrough,
}

impl ProviderId {
    pub const ALL: [ProviderId; 4] = [
        ProviderId::AcchubNumber,
        ProviderId::AcchubSms,
        ProviderId::OnePva,
        ProviderId::Passthrough,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::AcchubNumber => "acchub_number",
            ProviderId::AcchubSms => "acchub_sms",
            ProviderId::OnePva => "onepva",
            ProviderId::Passthrough => "passthrough",
        }
    }

    /// Path segment of the inbound route under `/api/proxy`
    pub fn route(&self) -> &'static str {
        match self {
            ProviderId::AcchubNumber => "getNumber",
            ProviderId::AcchubSms => "getNumberSms",
            ProviderId::OnePva => "getNumberPVA",
            ProviderId::Passthrough => "global",
        }
    }

    /// Canonical request fields this provider cannot do without
    pub fn required_fields(&self) -> &'static [&'static str] {
        match self {
            ProviderId::AcchubNumber | ProviderId::AcchubSms => &["country", "credential"],
            ProviderId::OnePva => &["app", "country", "credential", "code"],
            ProviderId::Passthrough => &["url"],
        }
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

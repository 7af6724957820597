//! Upstream reply capture and decoding.
//!
//! Parsing never fails: a body that cannot be decoded is carried forward as
//! `ParsedReply::Unstructured` with its original text so the route can still
//! answer with the provider's status code.

use serde_json::Value;

/// Reply exactly as received, before any interpretation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawUpstreamReply {
    pub status_code: u16,
    pub content_type: Option<String>,
    pub body_text: String,
}

impl RawUpstreamReply {
    pub fn new(status_code: u16, content_type: Option<String>, body_text: impl Into<String>) -> Self {
        Self {
            status_code,
            content_type,
            body_text: body_text.into(),
        }
    }

    /// Whether the declared content type claims JSON
    pub fn declares_json(&self) -> bool {
        self.content_type
            .as_deref()
            .map(|ct| ct.to_ascii_lowercase().contains("application/json"))
            .unwrap_or(false)
    }
}

/// Why a reply was not decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnstructuredReason {
    /// The content type does not claim JSON
    NotJson,
    /// Decoding was attempted and failed
    InvalidJson,
}

/// Outcome of decoding an upstream reply
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedReply {
    Structured(Value),
    Unstructured {
        text: String,
        reason: UnstructuredReason,
    },
}

impl ParsedReply {
    pub fn as_structured(&self) -> Option<&Value> {
        match self {
            ParsedReply::Structured(value) => Some(value),
            ParsedReply::Unstructured { .. } => None,
        }
    }
}

/// How much to trust the declared content type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParsePolicy {
    /// Decode only when the content type claims JSON
    DeclaredContentType,
    /// Always attempt decoding; for upstreams that mislabel their replies
    #[default]
    Sniff,
}

/// Decode a raw reply under the given policy
pub fn parse(raw: &RawUpstreamReply, policy: ParsePolicy) -> ParsedReply {
    if policy == ParsePolicy::DeclaredContentType && !raw.declares_json() {
        return ParsedReply::Unstructured {
            text: raw.body_text.clone(),
            reason: UnstructuredReason::NotJson,
        };
    }

    match serde_json::from_str::<Value>(&raw.body_text) {
        Ok(value) => ParsedReply::Structured(value),
        Err(err) => {
            tracing::debug!(error = %err, "upstream body is not valid JSON");
            ParsedReply::Unstructured {
                text: raw.body_text.clone(),
                reason: UnstructuredReason::InvalidJson,
            }
        }
    }
}

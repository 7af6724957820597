//! Gateway error types.
//!
//! Only conditions that abort a request are errors. An upstream reply that
//! cannot be decoded, or that does not carry a DID, is a regular outcome of
//! the reply parser and the normalizer and never reaches this module.

use thiserror::Error;

/// Client-facing messages shared by the routes
pub mod messages {
    /// Reported for provider routes when the upstream cannot be reached
    pub const UPSTREAM_FETCH_FAILED: &str = "Failed to fetch data from the target API";

    /// Reported by the passthrough route on any failure
    pub const PASSTHROUGH_FAILED: &str = "Failed to process the request";

    /// Passthrough `details` for transport failures; the cause is only logged
    pub const UPSTREAM_UNREACHABLE: &str = "Upstream service unreachable";

    /// Fallback `error` for an upstream that declared JSON but sent garbage
    pub const INVALID_JSON_FORMAT: &str = "Invalid JSON format";

    /// Fallback `error` for a reply that could not be decoded at all
    pub const FAILED_TO_PROCESS_RESPONSE: &str = "Failed to process response";

    /// Fallback `error` for an undecodable passthrough reply
    pub const FAILED_TO_PARSE_JSON: &str = "Failed to parse response as JSON";
}

/// Errors that terminate a single gateway request
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// A required inbound field is absent or empty
    #[error("{message}")]
    Validation { message: String },

    /// The outbound call failed at the transport level
    #[error("Upstream unreachable: {reason}")]
    UpstreamUnreachable { reason: String },

    /// The outbound call could not be constructed (bad method, URL or header)
    #[error("Invalid outbound call: {reason}")]
    InvalidCall { reason: String },
}

impl GatewayError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn unreachable(reason: impl Into<String>) -> Self {
        Self::UpstreamUnreachable {
            reason: reason.into(),
        }
    }

    pub fn invalid_call(reason: impl Into<String>) -> Self {
        Self::InvalidCall {
            reason: reason.into(),
        }
    }

    /// HTTP status reported to the client
    pub fn status_code(&self) -> u16 {
        match self {
            GatewayError::Validation { .. } => 400,
            GatewayError::UpstreamUnreachable { .. } | GatewayError::InvalidCall { .. } => 500,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, GatewayError::Validation { .. })
    }

    /// Detail string that is safe to show to the caller
    ///
    /// Transport causes stay in the logs; only malformed-call reasons, which
    /// describe the caller's own input, are echoed back.
    pub fn public_detail(&self) -> String {
        match self {
            GatewayError::Validation { message } => message.clone(),
            GatewayError::UpstreamUnreachable { .. } => messages::UPSTREAM_UNREACHABLE.to_string(),
            GatewayError::InvalidCall { reason } => reason.clone(),
        }
    }
}

pub type GatewayResult<T> = Result<T, GatewayError>;

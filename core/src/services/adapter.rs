//! Provider adapter contract.

use serde_json::{json, Value};

use crate::domain::{OutboundCall, ParsePolicy, ParsedReply, ProviderId};
use crate::errors::{messages, GatewayError, GatewayResult};

/// Per-provider request construction and reply shaping
///
/// Implementations are pure: they describe the call and interpret the reply,
/// while the `UpstreamClient` performs the I/O.
pub trait ProviderAdapter: Send + Sync {
    /// Canonical inbound request this adapter understands
    type Request: Send + Sync;

    fn provider(&self) -> ProviderId;

    /// Check the provider's required field set
    fn validate(&self, request: &Self::Request) -> GatewayResult<()>;

    /// Build the complete outbound call
    fn build_call(&self, request: &Self::Request) -> GatewayResult<OutboundCall>;

    fn parse_policy(&self) -> ParsePolicy {
        ParsePolicy::Sniff
    }

    /// Turn the decoded reply into the client payload
    fn shape_reply(&self, parsed: ParsedReply, request: &Self::Request, call: &OutboundCall) -> Value;

    /// Payload for a request that failed before a reply was obtained
    fn failure_payload(&self, error: &GatewayError) -> Value {
        match error {
            GatewayError::Validation { message } => json!({ "error": message }),
            _ => json!({ "error": messages::UPSTREAM_FETCH_FAILED }),
        }
    }
}

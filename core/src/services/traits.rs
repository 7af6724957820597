//! Traits for outbound transport integration

use async_trait::async_trait;

use crate::domain::{OutboundCall, RawUpstreamReply};
use crate::errors::GatewayResult;

/// Issues fully built calls against upstream providers
#[async_trait]
pub trait UpstreamClient: Send + Sync {
    /// Perform exactly one network call
    ///
    /// Transport failures map to `GatewayError::UpstreamUnreachable`; calls that
    /// cannot be expressed on the wire map to `GatewayError::InvalidCall`. Any
    /// completed exchange, whatever its status code, is `Ok`.
    async fn issue(&self, call: &OutboundCall) -> GatewayResult<RawUpstreamReply>;
}

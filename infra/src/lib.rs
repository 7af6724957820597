//! # Infrastructure Layer
//!
//! Concrete implementations of the contracts declared in `dg_core`:
//!
//! - **HTTP**: `ReqwestUpstreamClient`, the single outbound transport
//! - **Providers**: one `ProviderAdapter` per upstream provider plus the
//!   generic passthrough, bundled in [`providers::Providers`]
//!
//! Provider endpoints and the browser profile come from
//! `dg_shared::ProvidersConfig`; transport timeouts from
//! `dg_shared::UpstreamConfig`.

/// Outbound HTTP transport
pub mod http;

/// Provider adapters
pub mod providers;

pub use http::ReqwestUpstreamClient;
pub use providers::Providers;

/// Infrastructure-specific error types
///
/// These only occur while wiring the application together; per-request
/// failures are reported through `dg_core::GatewayError`.
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// HTTP client could not be built
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

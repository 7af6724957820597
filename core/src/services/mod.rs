//! Gateway services: adapter and transport contracts plus orchestration.

pub mod adapter;
pub mod gateway;
pub mod traits;

// Re-export commonly used types
pub use adapter::ProviderAdapter;
pub use gateway::GatewayService;
pub use traits::UpstreamClient;

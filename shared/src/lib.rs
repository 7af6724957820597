//! Shared utilities and common types for the DID gateway
//!
//! This crate provides common functionality used across all gateway crates:
//! - Configuration types and loading
//! - Tracing subscriber bootstrap
//! - Utility functions (phone masking for logs)

pub mod config;
pub mod telemetry;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, ConfigError, Environment, LogFormat, LoggingConfig, ProvidersConfig, ServerConfig,
    UpstreamConfig,
};
pub use utils::phone;

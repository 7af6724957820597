//! # DID Gateway Core
//!
//! Core domain layer for the DID gateway. This crate holds the canonical
//! request and reply types, the reply parser, the number normalizer, the
//! response envelope, and the contracts (`ProviderAdapter`, `UpstreamClient`)
//! that the infrastructure layer implements. Nothing here performs I/O.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;

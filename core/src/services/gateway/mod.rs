//! Gateway orchestration
//!
//! Drives one inbound request through validation, call construction, the
//! single outbound call, reply parsing and shaping, and envelope building.

mod service;

#[cfg(test)]
mod tests;

pub use service::GatewayService;

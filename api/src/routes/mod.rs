//! HTTP route handlers

pub mod proxy;

pub use proxy::AppState;

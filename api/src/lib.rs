//! # DID Gateway API
//!
//! actix-web surface of the gateway: the proxy routes, request DTOs,
//! envelope rendering and the application factory shared by the binary and
//! the integration tests.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod routes;

pub use app::create_app;
pub use routes::AppState;

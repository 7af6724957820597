//! Response rendering and error handlers shared by all routes

pub mod envelope;
pub mod error;
pub mod form;

pub use envelope::EnvelopeExt;
pub use error::{form_config, json_config, method_not_allowed, not_found};
pub use form::{MultipartFormConfig, ProxyForm};

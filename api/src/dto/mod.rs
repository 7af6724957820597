//! Inbound request bodies

pub mod proxy;

pub use proxy::{first_message, GetNumberForm, PassthroughConfig, PvaForm};

//! Process-wide tracing subscriber bootstrap
//!
//! The subscriber is installed exactly once, from `main`, before any component
//! is constructed. Every crate logs through `tracing` and inherits the request
//! span opened by the HTTP layer.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogFormat, LoggingConfig};

/// Crates whose events are kept at the configured level
const GATEWAY_TARGETS: [&str; 4] = ["dg_api", "dg_core", "dg_infra", "dg_shared"];

/// Build the filter directive for a configured level
///
/// `RUST_LOG` wins when present so operators can raise verbosity without
/// touching configuration files.
pub fn filter_directive(level: &str) -> String {
    let mut directive = String::from("warn");
    for target in GATEWAY_TARGETS {
        directive.push_str(&format!(",{}={}", target, level));
    }
    directive.push_str(&format!(",tracing_actix_web={}", level));
    directive
}

/// Install the global subscriber
///
/// Returns an error instead of panicking when a subscriber is already set,
/// which happens when tests initialize tracing more than once.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), tracing_subscriber::util::TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(&config.level)));

    let registry = tracing_subscriber::registry().with(filter);

    match config.format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_file(config.source_location)
                    .with_line_number(config.source_location)
                    .json(),
            )
            .try_init(),
        LogFormat::Pretty => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_file(config.source_location)
                    .with_line_number(config.source_location)
                    .pretty(),
            )
            .try_init(),
        LogFormat::Compact => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .compact(),
            )
            .try_init(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directive_scopes_gateway_crates() {
        let directive = filter_directive("debug");
        assert!(directive.starts_with("warn,"));
        assert!(directive.contains("dg_core=debug"));
        assert!(directive.contains("dg_infra=debug"));
        assert!(directive.contains("tracing_actix_web=debug"));
    }
}

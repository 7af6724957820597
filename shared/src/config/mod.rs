//! Configuration module with gateway-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `environment` - Environment detection and logging configuration
//! - `server` - HTTP server configuration
//! - `upstream` - Outbound transport and provider endpoints
//!
//! Values are layered with the `config` crate: compiled defaults for the
//! current environment, then an optional `config.<env>.toml` file, then
//! `GATEWAY__`-prefixed environment variables (e.g. `GATEWAY__SERVER__PORT`).

pub mod environment;
pub mod server;
pub mod upstream;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export commonly used types
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use server::ServerConfig;
pub use upstream::{ProvidersConfig, UpstreamConfig};

/// Prefix for environment variable overrides
pub const ENV_PREFIX: &str = "GATEWAY";

/// Separator between the prefix and nested keys of environment overrides
pub const ENV_SEPARATOR: &str = "__";

/// Errors raised while assembling the configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {message}")]
    Invalid { message: String },
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Outbound transport configuration
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Provider endpoints and impersonation settings
    #[serde(default)]
    pub providers: ProvidersConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

impl AppConfig {
    /// Compiled defaults for an environment
    pub fn for_environment(environment: Environment) -> Self {
        let server = match environment {
            Environment::Production => ServerConfig::new("0.0.0.0", 8080),
            _ => ServerConfig::default(),
        };

        Self {
            environment,
            server,
            logging: LoggingConfig::for_environment(environment),
            upstream: UpstreamConfig::default(),
            providers: ProvidersConfig::default(),
        }
    }

    /// Load configuration for the environment detected from ENV variables
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::load_for(Environment::from_env())
    }

    /// Load configuration for a given environment
    pub fn load_for(environment: Environment) -> Result<Self, ConfigError> {
        let defaults = Self::for_environment(environment);

        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&defaults)?)
            .add_source(
                config::File::new(environment.config_file(), config::FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator(ENV_SEPARATOR)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true),
            )
            .build()?;

        let loaded: Self = settings.try_deserialize()?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// Check cross-field constraints that serde cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Invalid {
                message: "server.port must be non-zero".to_string(),
            });
        }
        if self.upstream.timeout_secs == Some(0) {
            return Err(ConfigError::Invalid {
                message: "upstream.timeout_secs must be positive when set".to_string(),
            });
        }
        self.providers.validate()
    }
}

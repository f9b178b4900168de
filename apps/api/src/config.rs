//! API server configuration.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults.

use std::env;

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// HTTP listen port
    pub port: u16,

    /// tracing filter directive (e.g. "info", "libris_store=debug")
    pub log_filter: String,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let config = ApiConfig {
            port: env::var("LIBRIS_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("LIBRIS_PORT".to_string()))?,

            log_filter: env::var("LIBRIS_LOG").unwrap_or_else(|_| "info".to_string()),
        };

        Ok(config)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_apply_without_env() {
        // Not set in the test environment
        if env::var("LIBRIS_PORT").is_err() && env::var("LIBRIS_LOG").is_err() {
            let config = ApiConfig::load().unwrap();
            assert_eq!(config.port, 8080);
            assert_eq!(config.log_filter, "info");
        }
    }
}

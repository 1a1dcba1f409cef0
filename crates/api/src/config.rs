//! Process configuration, read from environment variables.
//!
//! | variable           | default                 |
//! |--------------------|-------------------------|
//! | `APP_HOST`         | `0.0.0.0`               |
//! | `APP_PORT`         | `8080`                  |
//! | `LOG_FORMAT`       | `json` (`json`/`pretty`)|
//! | `FORECAST_WORKERS` | available CPUs          |
//!
//! `RUST_LOG` is read separately by the tracing subscriber.

use std::num::NonZeroUsize;

use thiserror::Error;

use stockcast_observability::LogFormat;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {key}={value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    pub log_format: LogFormat,
    /// Worker threads used for batch forecasts.
    pub forecast_workers: NonZeroUsize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_format: LogFormat::Json,
            forecast_workers: std::thread::available_parallelism().unwrap_or(NonZeroUsize::MIN),
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup; unset keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(host) = lookup("APP_HOST") {
            if host.trim().is_empty() {
                return Err(invalid("APP_HOST", host, "must not be empty"));
            }
            config.host = host.trim().to_string();
        }

        if let Some(port) = lookup("APP_PORT") {
            config.port = port
                .trim()
                .parse()
                .map_err(|e| invalid("APP_PORT", port.clone(), e))?;
        }

        if let Some(format) = lookup("LOG_FORMAT") {
            config.log_format = format
                .parse()
                .map_err(|e| invalid("LOG_FORMAT", format.clone(), e))?;
        }

        if let Some(workers) = lookup("FORECAST_WORKERS") {
            config.forecast_workers = workers
                .trim()
                .parse()
                .map_err(|e| invalid("FORECAST_WORKERS", workers.clone(), e))?;
        }

        Ok(config)
    }
}

fn invalid(key: &'static str, value: String, reason: impl ToString) -> ConfigError {
    ConfigError::Invalid {
        key,
        value,
        reason: reason.to_string(),
    }
}

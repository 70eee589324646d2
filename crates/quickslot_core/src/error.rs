//! Error types for configuration and host gateways

use std::path::PathBuf;
use thiserror::Error;

/// Errors from loading or saving the quickslot configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Failure reported by the console command gateway
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("Console unavailable")]
    Unavailable,

    #[error("Command rejected: {0}")]
    Rejected(String),
}

/// Failure to queue a deferred equip task
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Equip queue disconnected")]
pub struct QueueClosed;

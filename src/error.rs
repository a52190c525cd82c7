//! Error types for the fallible outer layers.
//!
//! Generation and classification never fail; only settings loading,
//! duration parsing, replay files and exports do.

use thiserror::Error;

/// Errors raised while configuring or feeding the dashboard.
#[derive(Debug, Error)]
pub enum TwinError {
    /// Layered configuration could not be built or deserialized.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// A setting parsed but holds an unusable value.
    #[error("Invalid setting `{key}`: {reason}")]
    InvalidSetting { key: &'static str, reason: String },

    /// A duration string such as "3s" or "500ms" could not be parsed.
    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    /// Reading or writing a file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failed.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TwinError>;

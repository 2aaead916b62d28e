//! Configuration errors.

use super::error_code::{self, ThinningErrorCode};

/// Errors that can occur during configuration loading and resolution.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    FileNotFound { path: String },

    #[error("Config file {path} could not be read: {message}")]
    ReadError { path: String, message: String },

    #[error("Config parse error in {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("Config validation failed for {field}: {message}")]
    ValidationFailed { field: String, message: String },

    #[error("Unsupported similarity metric: {name}")]
    UnsupportedMetric { name: String },

    #[error("Unsupported removal policy: {name}")]
    UnsupportedPolicy { name: String },

    #[error("Unsupported distance mode: {name}")]
    UnsupportedDistanceMode { name: String },

    #[error("Removal policy {policy} requires a ranking attribute")]
    MissingRankingAttribute { policy: String },
}

impl ThinningErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnsupportedMetric { .. }
            | Self::UnsupportedPolicy { .. }
            | Self::UnsupportedDistanceMode { .. } => error_code::UNSUPPORTED_METHOD,
            _ => error_code::CONFIG_ERROR,
        }
    }
}

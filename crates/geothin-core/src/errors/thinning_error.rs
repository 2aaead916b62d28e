//! Top-level error aggregating every subsystem via `From` conversions.

use super::error_code::ThinningErrorCode;
use super::{ConfigError, EngineError, ValidationError};

/// Errors that can occur during a thinning run.
#[derive(Debug, thiserror::Error)]
pub enum ThinningError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),
}

impl ThinningErrorCode for ThinningError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::Validation(e) => e.error_code(),
            Self::Engine(e) => e.error_code(),
        }
    }
}

pub type ThinningResult<T> = Result<T, ThinningError>;

//! Error handling for geothin.
//! One error enum per subsystem, `thiserror` only.

pub mod config_error;
pub mod engine_error;
pub mod error_code;
pub mod thinning_error;
pub mod validation_error;

pub use config_error::ConfigError;
pub use engine_error::EngineError;
pub use error_code::ThinningErrorCode;
pub use thinning_error::{ThinningError, ThinningResult};
pub use validation_error::ValidationError;

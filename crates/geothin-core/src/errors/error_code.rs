//! ThinningErrorCode trait: stable machine-readable codes for every error.

/// Every error enum provides a structured code string alongside its message.
pub trait ThinningErrorCode {
    /// Returns the error code string (e.g., "CONFIG_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted error string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const UNSUPPORTED_METHOD: &str = "UNSUPPORTED_METHOD";
pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
pub const CROSS_REFERENCE_ERROR: &str = "CROSS_REFERENCE_ERROR";
pub const UNKNOWN_COLUMN: &str = "UNKNOWN_COLUMN";
pub const ENGINE_ERROR: &str = "ENGINE_ERROR";

//! Input table validation errors. Raised before any graph work starts.

use super::error_code::{self, ThinningErrorCode};

/// Errors found while validating the record and composition tables.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Record table is empty")]
    EmptyRecordTable,

    #[error("Record table has {count} rows, more than the supported {max}")]
    TooManyRecords { count: usize, max: usize },

    #[error("Record {key}: missing {axis} coordinate")]
    MissingCoordinate { key: String, axis: &'static str },

    #[error("Record {key}: {axis} coordinate is not finite")]
    NonFiniteCoordinate { key: String, axis: &'static str },

    #[error("Record {key}: {axis} = {value} is outside the valid geographic range")]
    CoordinateOutOfRange {
        key: String,
        axis: &'static str,
        value: f64,
    },

    #[error("Duplicate record key: {key}")]
    DuplicateRecordKey { key: String },

    #[error("Composition {key}/{category}: invalid weight ({reason})")]
    InvalidWeight {
        key: String,
        category: String,
        reason: String,
    },

    #[error("Duplicate composition entry: {key}/{category}")]
    DuplicateCompositionEntry { key: String, category: String },

    #[error("Composition references unknown record key: {key}")]
    UnknownCompositionKey { key: String },

    #[error("Record {key} has no composition entries")]
    RecordWithoutComposition { key: String },

    #[error("Unknown {role} column: {column}")]
    UnknownColumn { column: String, role: &'static str },

    #[error("Record {key}: missing value for stratum column {column}")]
    MissingStratum { key: String, column: String },

    #[error("Record {key}: value of {column} is not numeric")]
    NonNumericAttribute { key: String, column: String },
}

impl ThinningErrorCode for ValidationError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownCompositionKey { .. } | Self::RecordWithoutComposition { .. } => {
                error_code::CROSS_REFERENCE_ERROR
            }
            Self::UnknownColumn { .. } => error_code::UNKNOWN_COLUMN,
            _ => error_code::VALIDATION_ERROR,
        }
    }
}

//! Internal contract violations inside the engine.
//!
//! Validated input never produces these. Each one is a defect and aborts the
//! run, since skipping the offending record could leave a conflict in place.

use super::error_code::{self, ThinningErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Record {id} reached similarity evaluation with an empty composition")]
    EmptyComposition { id: u32 },

    #[error("Record id {id} out of range for {len} records")]
    IdOutOfRange { id: u32, len: usize },

    #[error("Worker pool construction failed: {message}")]
    ThreadPool { message: String },
}

impl ThinningErrorCode for EngineError {
    fn error_code(&self) -> &'static str {
        error_code::ENGINE_ERROR
    }
}

//! Input tables and run outcome.

pub mod outcome;
pub mod record;

pub use outcome::{ThinningOutcome, ThinningSummary};
pub use record::{AttributeValue, CompositionRow, RecordRow, ThinningInput};

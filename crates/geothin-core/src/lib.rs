//! # geothin-core
//!
//! Foundation crate for geothin.
//! Defines the record data model, the closed method enumerations, errors,
//! config, tracing setup, and constants. Every other crate in the workspace
//! depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod tracing;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use config::{ThinningConfig, ThinningParams};
pub use errors::{ThinningError, ThinningResult};
pub use models::{
    AttributeValue, CompositionRow, RecordRow, ThinningInput, ThinningOutcome, ThinningSummary,
};
pub use types::{CategoryId, DistanceMode, RecordId, RemovalPolicy, SimilarityMetric, StratumId};

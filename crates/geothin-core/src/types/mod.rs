//! Shared type definitions: compact ids, collections, and method selectors.

pub mod collections;
pub mod identifiers;
pub mod methods;

pub use identifiers::{CategoryId, RecordId, StratumId};
pub use methods::{DistanceMode, RemovalPolicy, SimilarityMetric};

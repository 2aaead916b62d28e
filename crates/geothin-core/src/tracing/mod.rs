//! Observability for geothin.
//! `tracing` crate with `EnvFilter`, per-module log levels.
//!
//! Engine events share field names across phases: `records`,
//! `neighbor_edges`, `groups`, `largest_group`, `conflict_edges`, `removed`,
//! `elapsed_ms`.

pub mod setup;

pub use setup::init_tracing;

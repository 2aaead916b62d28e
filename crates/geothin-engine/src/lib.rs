//! # geothin-engine
//!
//! Thins geolocated, composition-weighted records: removes one member of every
//! pair that is both spatially close and compositionally near-duplicate,
//! until no such pair remains among survivors.
//!
//! Phases: validation → priority order → neighbor search → connected
//! components → per-group similarity → greedy conflict resolution.
//! Groups are independent and run on a rayon pool; everything that decides
//! a removal is fixed before dispatch, so output never depends on scheduling.

pub mod conflict;
pub mod engine;
pub mod groups;
pub mod neighbors;
pub mod priority;
pub mod similarity;
pub mod types;
pub mod validation;

pub use conflict::{ConflictResolver, Resolution};
pub use engine::{thin, ThinningEngine};
pub use groups::{Group, GroupPartitioner, Partition};
pub use neighbors::NeighborFinder;
pub use priority::PriorityOrder;
pub use similarity::SimilarityEvaluator;
pub use types::{Composition, ConflictEdge, NeighborEdge};
pub use validation::{prepare, PreparedInput};

//! Graph and composition types shared by the engine phases.

use geothin_core::types::{CategoryId, RecordId};
use serde::{Deserialize, Serialize};

/// Sparse category → positive weight vector, sorted by category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Composition {
    entries: Vec<(CategoryId, f64)>,
}

impl Composition {
    /// Build from unsorted entries. Callers guarantee unique categories.
    pub fn from_entries(mut entries: Vec<(CategoryId, f64)>) -> Self {
        entries.sort_unstable_by_key(|&(category, _)| category);
        Self { entries }
    }

    /// Number of categories present (the record's diversity).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[(CategoryId, f64)] {
        &self.entries
    }
}

/// Unordered neighbor pair, stored with `a < b`. `distance` is in
/// `[0, radius)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NeighborEdge {
    pub a: RecordId,
    pub b: RecordId,
    pub distance: f64,
}

impl NeighborEdge {
    pub fn new(x: RecordId, y: RecordId, distance: f64) -> Self {
        let (a, b) = if x < y { (x, y) } else { (y, x) };
        Self { a, b, distance }
    }
}

/// A neighbor pair whose similarity exceeds the threshold, oriented so that
/// `low` has the lower priority (smaller id) and is the one to remove.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConflictEdge {
    pub low: RecordId,
    pub high: RecordId,
    pub score: f64,
}

impl ConflictEdge {
    pub fn new(x: RecordId, y: RecordId, score: f64) -> Self {
        let (low, high) = if x < y { (x, y) } else { (y, x) };
        Self { low, high, score }
    }

    pub fn touches(&self, id: RecordId) -> bool {
        self.low == id || self.high == id
    }
}

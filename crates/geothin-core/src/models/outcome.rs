use serde::{Deserialize, Serialize};

use super::record::RecordRow;

/// Summary counts for a run. `elapsed_ms` is informational only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThinningSummary {
    pub total: usize,
    pub retained: usize,
    pub removed: usize,
    pub removed_pct: f64,
    pub groups: usize,
    pub nontrivial_groups: usize,
    pub largest_group: usize,
    pub neighbor_edges: usize,
    pub conflict_edges: usize,
    pub elapsed_ms: u64,
}

impl ThinningSummary {
    /// Percentage of `removed` over `total`, 0 for an empty table.
    pub fn percentage(removed: usize, total: usize) -> f64 {
        if total == 0 {
            0.0
        } else {
            removed as f64 * 100.0 / total as f64
        }
    }
}

/// Result of a thinning run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThinningOutcome {
    /// Surviving rows, unchanged, in input order.
    pub survivors: Vec<RecordRow>,
    /// Keys of removed records, in input order.
    pub removed_keys: Vec<String>,
    pub summary: ThinningSummary,
}

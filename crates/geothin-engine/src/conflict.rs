//! ConflictResolver: greedy, priority-ordered elimination within one group.
//!
//! Repeatedly takes the highest-scoring remaining conflict and removes its
//! lower-priority endpoint, dropping every conflict that endpoint was part
//! of. Conflicts are held in a max-heap; dropped edges are not removed
//! eagerly but skipped when popped if either endpoint is already out.
//!
//! Exact score ties are broken by the smaller `(low, high)` pair first.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use geothin_core::types::RecordId;
use rustc_hash::FxHashSet;

use crate::types::ConflictEdge;

/// Removal set of one group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Removed ids, ascending.
    pub blacklist: Vec<RecordId>,
    /// Conflicts popped and acted on; equals `blacklist.len()`.
    pub rounds: usize,
    /// Conflicts popped and skipped because an endpoint was already removed.
    pub discarded: usize,
}

#[derive(Debug, Clone, Copy)]
struct Ranked(ConflictEdge);

impl Ranked {
    fn key(&self) -> (RecordId, RecordId) {
        (self.0.low, self.0.high)
    }
}

impl PartialEq for Ranked {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Ranked {}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ranked {
    /// Greater = popped first: higher score, then smaller id pair.
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .score
            .total_cmp(&other.0.score)
            .then_with(|| other.key().cmp(&self.key()))
    }
}

pub struct ConflictResolver;

impl ConflictResolver {
    /// Resolve one group's conflicts. Edges must be oriented by priority.
    pub fn resolve(conflicts: Vec<ConflictEdge>) -> Resolution {
        if conflicts.is_empty() {
            return Resolution::default();
        }

        let mut heap: BinaryHeap<Ranked> = conflicts.into_iter().map(Ranked).collect();
        let mut removed: FxHashSet<RecordId> = FxHashSet::default();
        let mut resolution = Resolution::default();

        while let Some(Ranked(edge)) = heap.pop() {
            if removed.contains(&edge.low) || removed.contains(&edge.high) {
                resolution.discarded += 1;
                continue;
            }
            removed.insert(edge.low);
            resolution.rounds += 1;
        }

        resolution.blacklist = removed.into_iter().collect();
        resolution.blacklist.sort_unstable();
        resolution
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conflict(a: u32, b: u32, score: f64) -> ConflictEdge {
        ConflictEdge::new(RecordId(a), RecordId(b), score)
    }

    fn ids(resolution: &Resolution) -> Vec<u32> {
        resolution.blacklist.iter().map(|id| id.0).collect()
    }

    #[test]
    fn no_conflicts_removes_nothing() {
        assert_eq!(ConflictResolver::resolve(Vec::new()), Resolution::default());
    }

    #[test]
    fn lower_priority_endpoint_is_removed() {
        let r = ConflictResolver::resolve(vec![conflict(7, 2, 0.9)]);
        assert_eq!(ids(&r), vec![2]);
        assert_eq!(r.rounds, 1);
    }

    #[test]
    fn highest_score_is_resolved_first() {
        // 1 loses to 2 first, which discards (1, 3); 0 then loses to 3.
        let r = ConflictResolver::resolve(vec![
            conflict(1, 3, 0.6),
            conflict(1, 2, 0.9),
            conflict(0, 3, 0.7),
        ]);
        assert_eq!(ids(&r), vec![0, 1]);
        assert_eq!(r.discarded, 1);
    }

    #[test]
    fn survivor_can_lose_a_later_conflict() {
        // 2 survives (1, 2) but is the low end of (2, 5).
        let r = ConflictResolver::resolve(vec![conflict(1, 2, 0.9), conflict(2, 5, 0.8)]);
        assert_eq!(ids(&r), vec![1, 2]);
    }

    #[test]
    fn ties_resolve_by_smallest_pair() {
        // Chain 0-1-2-3-4, all equal scores.
        let chain: Vec<ConflictEdge> = (0..4).map(|i| conflict(i, i + 1, 1.0)).rev().collect();
        let r = ConflictResolver::resolve(chain);
        assert_eq!(ids(&r), vec![0, 1, 2, 3]);
    }

    #[test]
    fn ties_do_not_depend_on_input_order() {
        let edges = vec![conflict(0, 4, 0.5), conflict(1, 4, 0.5), conflict(0, 1, 0.5), conflict(3, 4, 0.5)];
        let mut reversed = edges.clone();
        reversed.reverse();
        assert_eq!(ConflictResolver::resolve(edges), ConflictResolver::resolve(reversed));
    }

    #[test]
    fn no_conflict_survives_resolution() {
        let edges = vec![
            conflict(0, 1, 0.7),
            conflict(1, 2, 0.8),
            conflict(2, 3, 0.75),
            conflict(0, 3, 0.9),
            conflict(1, 3, 0.65),
        ];
        let r = ConflictResolver::resolve(edges.clone());
        for e in &edges {
            assert!(r.blacklist.contains(&e.low) || r.blacklist.contains(&e.high), "{e:?}");
        }
    }

    #[test]
    fn greedy_blacklist_can_shrink_when_a_hub_conflict_appears() {
        let base = vec![conflict(1, 3, 0.8), conflict(2, 3, 0.8)];
        assert_eq!(ids(&ConflictResolver::resolve(base.clone())), vec![1, 2]);

        let mut with_hub = base;
        with_hub.push(conflict(3, 4, 0.9));
        assert_eq!(ids(&ConflictResolver::resolve(with_hub)), vec![3]);
    }
}

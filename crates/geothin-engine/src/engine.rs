//! ThinningEngine: drives every phase and assembles the outcome.
//!
//! validate → priority order → neighbors → groups → per-group
//! similarity + resolution (parallel) → survivors in input order.

use std::cmp::Reverse;
use std::time::Instant;

use geothin_core::constants::LARGE_GROUP_LOG_THRESHOLD;
use geothin_core::errors::{EngineError, ThinningResult};
use geothin_core::models::{ThinningInput, ThinningOutcome, ThinningSummary};
use geothin_core::ThinningParams;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::conflict::{ConflictResolver, Resolution};
use crate::groups::{Group, GroupPartitioner};
use crate::neighbors::NeighborFinder;
use crate::priority::PriorityOrder;
use crate::similarity::SimilarityEvaluator;
use crate::types::Composition;
use crate::validation::prepare;

/// Runs thinning with fixed parameters. Reusable across inputs.
pub struct ThinningEngine {
    params: ThinningParams,
    /// Dedicated pool when `params.threads` is set.
    pool: Option<rayon::ThreadPool>,
}

impl ThinningEngine {
    /// Validate `params` and build the worker pool.
    pub fn new(params: ThinningParams) -> ThinningResult<Self> {
        params.validate()?;

        let pool = match params.threads {
            Some(threads) => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .thread_name(|i| format!("geothin-worker-{i}"))
                    .build()
                    .map_err(|e| EngineError::ThreadPool {
                        message: e.to_string(),
                    })?,
            ),
            None => None,
        };

        Ok(Self { params, pool })
    }

    pub fn params(&self) -> &ThinningParams {
        &self.params
    }

    /// Thin `input`. Deterministic for a fixed input, seed and parameters,
    /// whatever the thread count.
    pub fn run(&self, input: &ThinningInput) -> ThinningResult<ThinningOutcome> {
        match &self.pool {
            Some(pool) => pool.install(|| self.run_inner(input)),
            None => self.run_inner(input),
        }
    }

    fn run_inner(&self, input: &ThinningInput) -> ThinningResult<ThinningOutcome> {
        let start = Instant::now();
        let params = &self.params;

        let prepared = prepare(input, params)?;
        let n = prepared.len();
        info!(
            records = n,
            categories = prepared.categories.len(),
            stratified = prepared.strata.is_some(),
            "input validated"
        );

        // The generator is consumed here and nowhere else.
        let mut rng = ChaCha8Rng::seed_from_u64(params.seed);
        let order = PriorityOrder::build(params.policy, &prepared, &mut rng)?;
        let points = order.reorder(&prepared.points);
        let compositions = order.reorder(&prepared.compositions);
        let strata = prepared.strata.as_ref().map(|s| order.reorder(s));
        debug!(policy = %params.policy, seed = params.seed, "priority order fixed");

        let finder = NeighborFinder::new(params.distance_mode, params.distance_threshold);
        let edges = finder.find(&points, strata.as_deref());
        let neighbor_edges = edges.len();
        info!(neighbor_edges, mode = %params.distance_mode, "neighbor search complete");

        let partition = GroupPartitioner::partition(n, edges);
        let mut jobs: Vec<&Group> = partition.nontrivial().collect();
        // Largest first; the smallest member breaks ties so the order is total.
        jobs.sort_unstable_by_key(|g| (Reverse(g.work()), g.members[0]));
        info!(
            groups = partition.len(),
            nontrivial_groups = jobs.len(),
            largest_group = partition.largest(),
            "groups partitioned"
        );

        let evaluator = SimilarityEvaluator::new(params.metric, params.similarity_threshold);
        let resolved: Vec<(Resolution, usize)> = jobs
            .par_iter()
            .with_max_len(1)
            .map(|group| resolve_group(&evaluator, group, &compositions))
            .collect::<Result<_, EngineError>>()?;

        let mut removed = vec![false; n];
        let mut conflict_edges = 0;
        for (resolution, conflicts) in &resolved {
            conflict_edges += conflicts;
            for id in &resolution.blacklist {
                removed[id.index()] = true;
            }
        }

        let mut survivors = Vec::with_capacity(n);
        let mut removed_keys = Vec::new();
        for (row, record) in input.records.iter().enumerate() {
            if removed[order.id_of(row).index()] {
                removed_keys.push(record.key.clone());
            } else {
                survivors.push(record.clone());
            }
        }

        let summary = ThinningSummary {
            total: n,
            retained: survivors.len(),
            removed: removed_keys.len(),
            removed_pct: ThinningSummary::percentage(removed_keys.len(), n),
            groups: partition.len(),
            nontrivial_groups: jobs.len(),
            largest_group: partition.largest(),
            neighbor_edges,
            conflict_edges,
            elapsed_ms: start.elapsed().as_millis() as u64,
        };
        info!(
            removed = summary.removed,
            removed_pct = summary.removed_pct,
            conflict_edges,
            elapsed_ms = summary.elapsed_ms,
            "thinning complete"
        );

        Ok(ThinningOutcome {
            survivors,
            removed_keys,
            summary,
        })
    }
}

fn resolve_group(
    evaluator: &SimilarityEvaluator,
    group: &Group,
    compositions: &[Composition],
) -> Result<(Resolution, usize), EngineError> {
    let conflicts = evaluator.conflicts(group, compositions)?;
    let count = conflicts.len();
    let resolution = ConflictResolver::resolve(conflicts);
    if group.len() >= LARGE_GROUP_LOG_THRESHOLD {
        debug!(
            members = group.len(),
            neighbor_edges = group.edges.len(),
            conflict_edges = count,
            removed = resolution.blacklist.len(),
            "large group resolved"
        );
    }
    Ok((resolution, count))
}

/// One-shot convenience: build an engine for `params` and run it once.
pub fn thin(input: &ThinningInput, params: &ThinningParams) -> ThinningResult<ThinningOutcome> {
    ThinningEngine::new(params.clone())?.run(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geothin_core::models::{CompositionRow, RecordRow};
    use geothin_core::types::RemovalPolicy;

    fn input(points: &[(&str, f64, f64, &[&str])]) -> ThinningInput {
        let mut records = Vec::new();
        let mut compositions = Vec::new();
        for &(key, x, y, cats) in points {
            records.push(RecordRow::new(key, x, y));
            for &c in cats {
                compositions.push(CompositionRow::new(key, c, 1.0));
            }
        }
        ThinningInput {
            records,
            compositions,
        }
    }

    #[test]
    fn isolated_records_are_all_kept() {
        let data = input(&[("a", 0.0, 0.0, &["x"]), ("b", 100.0, 0.0, &["x"])]);
        let outcome = thin(&data, &ThinningParams::new(50.0, 0.5)).unwrap();
        assert_eq!(outcome.summary.removed, 0);
        assert_eq!(outcome.summary.groups, 2);
        assert_eq!(outcome.summary.nontrivial_groups, 0);
    }

    #[test]
    fn one_of_a_duplicate_pair_is_removed() {
        let data = input(&[("a", 0.0, 0.0, &["x", "y"]), ("b", 1.0, 0.0, &["x", "y"])]);
        let outcome = thin(&data, &ThinningParams::new(50.0, 0.5)).unwrap();
        assert_eq!(outcome.summary.removed, 1);
        assert_eq!(outcome.summary.neighbor_edges, 1);
        assert_eq!(outcome.summary.conflict_edges, 1);
        assert_eq!(outcome.survivors.len() + outcome.removed_keys.len(), 2);
    }

    #[test]
    fn survivors_keep_input_order() {
        let data = input(&[
            ("a", 0.0, 0.0, &["x"]),
            ("b", 500.0, 0.0, &["x"]),
            ("c", 1000.0, 0.0, &["x"]),
        ]);
        let outcome = thin(&data, &ThinningParams::new(50.0, 0.5)).unwrap();
        let keys: Vec<&str> = outcome.survivors.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
    }

    #[test]
    fn invalid_params_fail_before_running() {
        assert!(ThinningEngine::new(ThinningParams::new(-1.0, 0.5)).is_err());
        assert!(ThinningEngine::new(ThinningParams::new(1.0, 0.5).with_policy(RemovalPolicy::LowerRankingFirst)).is_err());
    }

    #[test]
    fn dedicated_pool_is_used_when_threads_set() {
        let engine = ThinningEngine::new(ThinningParams::new(50.0, 0.5).with_threads(2)).unwrap();
        let data = input(&[("a", 0.0, 0.0, &["x"]), ("b", 1.0, 0.0, &["x"])]);
        assert_eq!(engine.run(&data).unwrap().summary.removed, 1);
    }
}

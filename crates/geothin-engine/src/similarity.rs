//! SimilarityEvaluator: compositional similarity on neighbor edges.
//!
//! Every metric is a pure function of two sparse, category-sorted
//! compositions. Presence/absence metrics ignore weights entirely; only
//! Bray–Curtis reads them. Scores lie in `[0, 1]`, with 1 meaning identical.

use geothin_core::errors::EngineError;
use geothin_core::types::{RecordId, SimilarityMetric};

use crate::groups::Group;
use crate::types::{Composition, ConflictEdge};

/// Shared/unique category counts plus the weight sums Bray–Curtis needs.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Overlap {
    shared: usize,
    only_a: usize,
    only_b: usize,
    abs_diff: f64,
    total: f64,
}

/// Single merge pass over two category-sorted compositions.
fn overlap(a: &Composition, b: &Composition) -> Overlap {
    let (xs, ys) = (a.entries(), b.entries());
    let mut out = Overlap::default();
    let (mut i, mut j) = (0, 0);
    while i < xs.len() && j < ys.len() {
        let (cx, wx) = xs[i];
        let (cy, wy) = ys[j];
        if cx == cy {
            out.shared += 1;
            out.abs_diff += (wx - wy).abs();
            out.total += wx + wy;
            i += 1;
            j += 1;
        } else if cx < cy {
            out.only_a += 1;
            out.abs_diff += wx;
            out.total += wx;
            i += 1;
        } else {
            out.only_b += 1;
            out.abs_diff += wy;
            out.total += wy;
            j += 1;
        }
    }
    for &(_, w) in &xs[i..] {
        out.only_a += 1;
        out.abs_diff += w;
        out.total += w;
    }
    for &(_, w) in &ys[j..] {
        out.only_b += 1;
        out.abs_diff += w;
        out.total += w;
    }
    out
}

/// `1 − Σ|x−y| / Σ(x+y)`.
pub fn bray_curtis(a: &Composition, b: &Composition) -> f64 {
    let o = overlap(a, b);
    if o.total <= 0.0 {
        return 0.0;
    }
    1.0 - o.abs_diff / o.total
}

/// `1 − (u+v) / (2s+u+v)` on presence/absence.
pub fn sorensen(a: &Composition, b: &Composition) -> f64 {
    let o = overlap(a, b);
    let unique = (o.only_a + o.only_b) as f64;
    let denominator = 2.0 * o.shared as f64 + unique;
    if denominator == 0.0 {
        return 0.0;
    }
    1.0 - unique / denominator
}

/// `1 − (u+v) / (s+u+v)` on presence/absence.
pub fn jaccard(a: &Composition, b: &Composition) -> f64 {
    let o = overlap(a, b);
    let unique = (o.only_a + o.only_b) as f64;
    let denominator = o.shared as f64 + unique;
    if denominator == 0.0 {
        return 0.0;
    }
    1.0 - unique / denominator
}

/// `1 − min(u,v) / (min(u,v)+s)` on presence/absence.
///
/// A record whose categories are a strict subset of the other's scores 1.
pub fn simpson(a: &Composition, b: &Composition) -> f64 {
    let o = overlap(a, b);
    let fewer = o.only_a.min(o.only_b) as f64;
    let denominator = fewer + o.shared as f64;
    if denominator == 0.0 {
        return 0.0;
    }
    1.0 - fewer / denominator
}

/// Dispatch to the metric's function.
pub fn similarity(metric: SimilarityMetric, a: &Composition, b: &Composition) -> f64 {
    match metric {
        SimilarityMetric::BrayCurtis => bray_curtis(a, b),
        SimilarityMetric::Sorensen => sorensen(a, b),
        SimilarityMetric::Jaccard => jaccard(a, b),
        SimilarityMetric::Simpson => simpson(a, b),
    }
}

/// Scores a group's neighbor edges and keeps those above the threshold.
#[derive(Debug, Clone, Copy)]
pub struct SimilarityEvaluator {
    metric: SimilarityMetric,
    threshold: f64,
}

impl SimilarityEvaluator {
    pub fn new(metric: SimilarityMetric, threshold: f64) -> Self {
        Self { metric, threshold }
    }

    pub fn metric(&self) -> SimilarityMetric {
        self.metric
    }

    /// Conflict edges of `group`: neighbor edges whose score is strictly
    /// greater than the threshold, oriented by priority and in edge order.
    ///
    /// `compositions` is indexed by `RecordId`. An empty composition or an
    /// id past the end is a broken invariant and fails the whole run.
    pub fn conflicts(
        &self,
        group: &Group,
        compositions: &[Composition],
    ) -> Result<Vec<ConflictEdge>, EngineError> {
        let mut out = Vec::new();
        for edge in &group.edges {
            let score = similarity(
                self.metric,
                lookup(compositions, edge.a)?,
                lookup(compositions, edge.b)?,
            );
            if score > self.threshold {
                out.push(ConflictEdge::new(edge.a, edge.b, score));
            }
        }
        Ok(out)
    }
}

fn lookup(compositions: &[Composition], id: RecordId) -> Result<&Composition, EngineError> {
    let composition = compositions.get(id.index()).ok_or(EngineError::IdOutOfRange {
        id: id.0,
        len: compositions.len(),
    })?;
    if composition.is_empty() {
        return Err(EngineError::EmptyComposition { id: id.0 });
    }
    Ok(composition)
}

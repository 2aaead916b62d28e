//! PriorityOrder: the total order that decides every removal.
//!
//! Position in the order becomes the record's compact id, so a smaller
//! `RecordId` always means lower priority. Policies only differ in how the
//! order is built; nothing downstream ever looks at the policy again.

use std::cmp::{Ordering, Reverse};

use geothin_core::errors::{ConfigError, ThinningResult};
use geothin_core::types::{RecordId, RemovalPolicy};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::validation::PreparedInput;

/// Bijection between input rows and priority-ordered record ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriorityOrder {
    /// `RecordId` → input row.
    rows: Vec<usize>,
    /// Input row → `RecordId`.
    ids: Vec<RecordId>,
}

impl PriorityOrder {
    /// Build the order for `policy`.
    ///
    /// - random: uniform permutation drawn from `rng`.
    /// - less/more-diverse-first: random permutation, then a stable sort by
    ///   category count ascending/descending, so ties keep the random order.
    /// - lower/higher-ranking-first: stable sort of the input order by the
    ///   ranking value ascending/descending; missing values come first.
    pub fn build<R: Rng + ?Sized>(
        policy: RemovalPolicy,
        prepared: &PreparedInput,
        rng: &mut R,
    ) -> ThinningResult<Self> {
        let mut rows: Vec<usize> = (0..prepared.len()).collect();

        match policy {
            RemovalPolicy::Random => rows.shuffle(rng),
            RemovalPolicy::LessDiverseFirst => {
                rows.shuffle(rng);
                rows.sort_by_key(|&row| prepared.compositions[row].len());
            }
            RemovalPolicy::MoreDiverseFirst => {
                rows.shuffle(rng);
                rows.sort_by_key(|&row| Reverse(prepared.compositions[row].len()));
            }
            RemovalPolicy::LowerRankingFirst | RemovalPolicy::HigherRankingFirst => {
                let ranking = prepared.ranking.as_deref().ok_or_else(|| {
                    ConfigError::MissingRankingAttribute {
                        policy: policy.to_string(),
                    }
                })?;
                let descending = policy == RemovalPolicy::HigherRankingFirst;
                rows.sort_by(|&a, &b| compare_ranking(ranking[a], ranking[b], descending));
            }
        }

        Ok(Self::from_rows(rows))
    }

    /// Wrap an explicit order. `rows` must be a permutation of `0..rows.len()`.
    pub fn from_rows(rows: Vec<usize>) -> Self {
        let mut ids = vec![RecordId(0); rows.len()];
        for (position, &row) in rows.iter().enumerate() {
            ids[row] = RecordId::from_index(position);
        }
        Self { rows, ids }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Input row of a record id.
    pub fn row_of(&self, id: RecordId) -> usize {
        self.rows[id.index()]
    }

    /// Record id of an input row.
    pub fn id_of(&self, row: usize) -> RecordId {
        self.ids[row]
    }

    /// Input rows from lowest to highest priority.
    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    /// Re-index a row-indexed slice by record id.
    pub fn reorder<T: Clone>(&self, by_row: &[T]) -> Vec<T> {
        self.rows.iter().map(|&row| by_row[row].clone()).collect()
    }
}

/// Missing values sort first in both directions.
fn compare_ranking(a: Option<f64>, b: Option<f64>, descending: bool) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) if descending => y.total_cmp(&x),
        (Some(x), Some(y)) => x.total_cmp(&y),
    }
}

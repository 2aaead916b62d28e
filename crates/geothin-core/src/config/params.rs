//! Strongly-typed, validated run parameters.

use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::ConfigError;
use crate::types::{DistanceMode, RemovalPolicy, SimilarityMetric};

/// Everything the engine needs, resolved once at start.
///
/// Built from [`ThinningConfig::resolve`](super::ThinningConfig::resolve) or
/// directly; call [`ThinningParams::validate`] on hand-built values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThinningParams {
    pub distance_mode: DistanceMode,
    pub distance_threshold: f64,
    pub metric: SimilarityMetric,
    pub similarity_threshold: f64,
    pub policy: RemovalPolicy,
    pub ranking_attribute: Option<String>,
    pub stratum_column: Option<String>,
    pub seed: u64,
    /// Worker threads; `None` uses the global rayon pool.
    pub threads: Option<usize>,
}

impl Default for ThinningParams {
    fn default() -> Self {
        Self {
            distance_mode: DistanceMode::Planar,
            distance_threshold: defaults::DEFAULT_DISTANCE_THRESHOLD,
            metric: SimilarityMetric::Jaccard,
            similarity_threshold: defaults::DEFAULT_SIMILARITY_THRESHOLD,
            policy: RemovalPolicy::Random,
            ranking_attribute: None,
            stratum_column: None,
            seed: defaults::DEFAULT_SEED,
            threads: None,
        }
    }
}

impl ThinningParams {
    pub fn new(distance_threshold: f64, similarity_threshold: f64) -> Self {
        Self {
            distance_threshold,
            similarity_threshold,
            ..Self::default()
        }
    }

    pub fn with_metric(mut self, metric: SimilarityMetric) -> Self {
        self.metric = metric;
        self
    }

    pub fn with_policy(mut self, policy: RemovalPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_ranking_attribute(mut self, column: impl Into<String>) -> Self {
        self.ranking_attribute = Some(column.into());
        self
    }

    pub fn with_stratum_column(mut self, column: impl Into<String>) -> Self {
        self.stratum_column = Some(column.into());
        self
    }

    pub fn with_distance_mode(mut self, mode: DistanceMode) -> Self {
        self.distance_mode = mode;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    /// Check thresholds and policy requirements.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.distance_threshold.is_finite() || self.distance_threshold <= 0.0 {
            return Err(ConfigError::ValidationFailed {
                field: "distance.threshold".to_string(),
                message: format!("must be finite and > 0, got {}", self.distance_threshold),
            });
        }
        if !self.similarity_threshold.is_finite() || !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err(ConfigError::ValidationFailed {
                field: "similarity.threshold".to_string(),
                message: format!("must be between 0.0 and 1.0, got {}", self.similarity_threshold),
            });
        }
        if self.policy.requires_ranking_attribute()
            && self.ranking_attribute.as_deref().map_or(true, |c| c.trim().is_empty())
        {
            return Err(ConfigError::MissingRankingAttribute {
                policy: self.policy.to_string(),
            });
        }
        if self.threads == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "threads".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }
}

//! Similarity configuration.

use serde::{Deserialize, Serialize};

use super::defaults;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SimilarityConfig {
    /// bray-curtis | sorensen | jaccard | simpson. Default: jaccard.
    pub metric: Option<String>,
    /// Pairs scoring strictly above this conflict. Default: 0.5.
    pub threshold: Option<f64>,
}

impl SimilarityConfig {
    pub fn effective_metric(&self) -> &str {
        self.metric.as_deref().unwrap_or(defaults::DEFAULT_SIMILARITY_METRIC)
    }

    pub fn effective_threshold(&self) -> f64 {
        self.threshold.unwrap_or(defaults::DEFAULT_SIMILARITY_THRESHOLD)
    }
}

//! Distance configuration.

use serde::{Deserialize, Serialize};

use super::defaults;

/// Neighbor radius and how it is measured.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DistanceConfig {
    /// "planar" or "geographic". Default: planar.
    pub mode: Option<String>,
    /// Records closer than this are neighbors. Planar units, or metres in
    /// geographic mode. Default: 50.0.
    pub threshold: Option<f64>,
}

impl DistanceConfig {
    pub fn effective_mode(&self) -> &str {
        self.mode.as_deref().unwrap_or(defaults::DEFAULT_DISTANCE_MODE)
    }

    pub fn effective_threshold(&self) -> f64 {
        self.threshold.unwrap_or(defaults::DEFAULT_DISTANCE_THRESHOLD)
    }
}

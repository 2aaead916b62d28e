//! Removal policy configuration.

use serde::{Deserialize, Serialize};

use super::defaults;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RemovalConfig {
    /// Removal policy name. Default: random.
    pub policy: Option<String>,
    /// Numeric column driving the ranking policies.
    pub ranking_attribute: Option<String>,
}

impl RemovalConfig {
    pub fn effective_policy(&self) -> &str {
        self.policy.as_deref().unwrap_or(defaults::DEFAULT_REMOVAL_POLICY)
    }
}

//! Stratification configuration.

use serde::{Deserialize, Serialize};

/// When `column` is set, records in different strata never become neighbors.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StratificationConfig {
    pub column: Option<String>,
}

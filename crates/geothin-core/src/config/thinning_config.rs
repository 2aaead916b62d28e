//! Top-level geothin configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{
    DistanceConfig, LoggingConfig, RemovalConfig, SimilarityConfig, StratificationConfig,
    ThinningParams,
};
use crate::constants::CONFIG_FILENAME;
use crate::errors::ConfigError;
use crate::types::{DistanceMode, RemovalPolicy, SimilarityMetric};

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`GEOTHIN_*`)
/// 3. Config file (explicit path, or `geothin.toml` in the working directory)
/// 4. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ThinningConfig {
    pub seed: Option<u64>,
    /// Worker threads. 0 or absent uses the global rayon pool.
    pub threads: Option<usize>,
    pub distance: DistanceConfig,
    pub similarity: SimilarityConfig,
    pub removal: RemovalConfig,
    pub stratification: StratificationConfig,
    pub logging: LoggingConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub seed: Option<u64>,
    pub threads: Option<usize>,
    pub distance_mode: Option<String>,
    pub distance_threshold: Option<f64>,
    pub metric: Option<String>,
    pub similarity_threshold: Option<f64>,
    pub policy: Option<String>,
    pub ranking_attribute: Option<String>,
    pub stratum_column: Option<String>,
    pub log_level: Option<String>,
}

impl ThinningConfig {
    /// Load configuration with layered resolution.
    ///
    /// An explicit `path` must exist. Without one, `geothin.toml` in the
    /// working directory is used when present.
    pub fn load(path: Option<&Path>, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 3: config file
        match path {
            Some(path) => Self::merge_toml_file(&mut config, path)?,
            None => {
                let local = Path::new(CONFIG_FILENAME);
                if local.exists() {
                    Self::merge_toml_file(&mut config, local)?;
                } else {
                    debug!("no {CONFIG_FILENAME} in working directory, using defaults");
                }
            }
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config, |name| std::env::var(name).ok());

        // Layer 1 (highest priority): CLI flags
        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Parse method names, check thresholds, and produce run parameters.
    pub fn resolve(&self) -> Result<ThinningParams, ConfigError> {
        let distance_mode: DistanceMode = self.distance.effective_mode().parse()?;
        let metric: SimilarityMetric = self.similarity.effective_metric().parse()?;
        let policy: RemovalPolicy = self.removal.effective_policy().parse()?;

        let params = ThinningParams {
            distance_mode,
            distance_threshold: self.distance.effective_threshold(),
            metric,
            similarity_threshold: self.similarity.effective_threshold(),
            policy,
            ranking_attribute: non_blank(self.removal.ranking_attribute.as_deref()),
            stratum_column: non_blank(self.stratification.column.as_deref()),
            seed: self.seed.unwrap_or(super::defaults::DEFAULT_SEED),
            threads: self.threads.filter(|&t| t > 0),
        };
        params.validate()?;
        Ok(params)
    }

    /// Merge a TOML file into the existing config.
    fn merge_toml_file(config: &mut ThinningConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => ConfigError::ReadError {
                path: path.display().to_string(),
                message: e.to_string(),
            },
        })?;

        let file_config: ThinningConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        debug!(path = %path.display(), "merged config file");
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins wherever it has a value.
    fn merge(base: &mut ThinningConfig, other: &ThinningConfig) {
        fn take<T: Clone>(base: &mut Option<T>, other: &Option<T>) {
            if other.is_some() {
                base.clone_from(other);
            }
        }

        take(&mut base.seed, &other.seed);
        take(&mut base.threads, &other.threads);
        take(&mut base.distance.mode, &other.distance.mode);
        take(&mut base.distance.threshold, &other.distance.threshold);
        take(&mut base.similarity.metric, &other.similarity.metric);
        take(&mut base.similarity.threshold, &other.similarity.threshold);
        take(&mut base.removal.policy, &other.removal.policy);
        take(&mut base.removal.ranking_attribute, &other.removal.ranking_attribute);
        take(&mut base.stratification.column, &other.stratification.column);
        take(&mut base.logging.level, &other.logging.level);
    }

    /// Apply environment variable overrides read through `lookup`.
    /// Unparseable numeric values are ignored.
    pub fn apply_env_overrides(config: &mut ThinningConfig, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = lookup("GEOTHIN_SEED").and_then(|v| v.parse().ok()) {
            config.seed = Some(v);
        }
        if let Some(v) = lookup("GEOTHIN_THREADS").and_then(|v| v.parse().ok()) {
            config.threads = Some(v);
        }
        if let Some(v) = lookup("GEOTHIN_DISTANCE_MODE") {
            config.distance.mode = Some(v);
        }
        if let Some(v) = lookup("GEOTHIN_DISTANCE_THRESHOLD").and_then(|v| v.parse().ok()) {
            config.distance.threshold = Some(v);
        }
        if let Some(v) = lookup("GEOTHIN_METRIC") {
            config.similarity.metric = Some(v);
        }
        if let Some(v) = lookup("GEOTHIN_SIMILARITY_THRESHOLD").and_then(|v| v.parse().ok()) {
            config.similarity.threshold = Some(v);
        }
        if let Some(v) = lookup("GEOTHIN_POLICY") {
            config.removal.policy = Some(v);
        }
    }

    /// Apply CLI overrides (highest priority).
    pub fn apply_cli_overrides(config: &mut ThinningConfig, cli: &CliOverrides) {
        if cli.seed.is_some() {
            config.seed = cli.seed;
        }
        if cli.threads.is_some() {
            config.threads = cli.threads;
        }
        if let Some(ref v) = cli.distance_mode {
            config.distance.mode = Some(v.clone());
        }
        if cli.distance_threshold.is_some() {
            config.distance.threshold = cli.distance_threshold;
        }
        if let Some(ref v) = cli.metric {
            config.similarity.metric = Some(v.clone());
        }
        if cli.similarity_threshold.is_some() {
            config.similarity.threshold = cli.similarity_threshold;
        }
        if let Some(ref v) = cli.policy {
            config.removal.policy = Some(v.clone());
        }
        if let Some(ref v) = cli.ranking_attribute {
            config.removal.ranking_attribute = Some(v.clone());
        }
        if let Some(ref v) = cli.stratum_column {
            config.stratification.column = Some(v.clone());
        }
        if let Some(ref v) = cli.log_level {
            config.logging.level = Some(v.clone());
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

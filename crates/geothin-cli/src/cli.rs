//! Command-line arguments.

use std::path::{Path, PathBuf};

use clap::Parser;
use geothin_core::config::CliOverrides;
use geothin_core::types::DistanceMode;

/// Thin geolocated records that are both close and compositionally similar.
#[derive(Debug, Parser)]
#[command(name = "geothin", version, about)]
pub struct Cli {
    /// Record table: JSON array of `{"key", "x", "y", ...attributes}`.
    #[arg(long, required_unless_present = "print_config")]
    pub records: Option<PathBuf>,

    /// Composition table: JSON array of `{"key", "category", "weight"}`.
    #[arg(long, required_unless_present = "print_config")]
    pub compositions: Option<PathBuf>,

    /// TOML config file. Defaults to `geothin.toml` when present.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write `{"survivors", "summary"}` here instead of printing the summary.
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    #[arg(long)]
    pub seed: Option<u64>,

    /// Planar units, or metres with `--geographic`.
    #[arg(long)]
    pub distance_threshold: Option<f64>,

    /// Pairs scoring strictly above this are conflicts.
    #[arg(long)]
    pub similarity_threshold: Option<f64>,

    /// bray-curtis | sorensen | jaccard | simpson
    #[arg(long)]
    pub metric: Option<String>,

    /// random | less-diverse-first | more-diverse-first |
    /// lower-ranking-first | higher-ranking-first
    #[arg(long)]
    pub policy: Option<String>,

    /// Numeric attribute read by the ranking policies.
    #[arg(long)]
    pub ranking_attribute: Option<String>,

    /// Attribute whose values split records into independent strata.
    #[arg(long)]
    pub stratum_column: Option<String>,

    /// Treat x/y as longitude/latitude and measure in metres.
    #[arg(long)]
    pub geographic: bool,

    /// Worker threads (0 = one per core).
    #[arg(long)]
    pub threads: Option<usize>,

    /// Print the resolved configuration as TOML and exit.
    #[arg(long)]
    pub print_config: bool,

    /// -v for debug, -vv for trace.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Record and composition table paths, when both were given.
    pub fn tables(&self) -> Option<(&Path, &Path)> {
        self.records.as_deref().zip(self.compositions.as_deref())
    }

    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            seed: self.seed,
            threads: self.threads,
            distance_mode: self
                .geographic
                .then(|| DistanceMode::Geographic.as_str().to_string()),
            distance_threshold: self.distance_threshold,
            metric: self.metric.clone(),
            similarity_threshold: self.similarity_threshold,
            policy: self.policy.clone(),
            ranking_attribute: self.ranking_attribute.clone(),
            stratum_column: self.stratum_column.clone(),
            log_level: match self.verbose {
                0 => None,
                1 => Some("debug".to_string()),
                _ => Some("trace".to_string()),
            },
        }
    }
}

//! Configuration system for geothin.
//! TOML-based, layered resolution: CLI > env > config file > defaults.

pub mod defaults;
pub mod distance_config;
pub mod logging_config;
pub mod params;
pub mod removal_config;
pub mod similarity_config;
pub mod stratification_config;
pub mod thinning_config;

pub use distance_config::DistanceConfig;
pub use logging_config::LoggingConfig;
pub use params::ThinningParams;
pub use removal_config::RemovalConfig;
pub use similarity_config::SimilarityConfig;
pub use stratification_config::StratificationConfig;
pub use thinning_config::{CliOverrides, ThinningConfig};

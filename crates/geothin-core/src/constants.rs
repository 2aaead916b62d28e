//! Shared numeric constants.

/// Mean Earth radius in metres (IUGG), used for great-circle distances.
pub const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Relative slack applied to the search radius when querying the spatial
/// index. Candidates are re-checked against the exact distance afterwards.
pub const INDEX_QUERY_SLACK: f64 = 1e-9;

/// Groups at or above this size get a per-group `debug!` line.
pub const LARGE_GROUP_LOG_THRESHOLD: usize = 1_000;

/// Environment variable holding the tracing filter directive.
pub const LOG_ENV_VAR: &str = "GEOTHIN_LOG";

/// Default config file name looked up in the working directory.
pub const CONFIG_FILENAME: &str = "geothin.toml";

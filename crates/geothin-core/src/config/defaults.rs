// Single source of truth for all default values.

// --- Distance ---
pub const DEFAULT_DISTANCE_MODE: &str = "planar";
pub const DEFAULT_DISTANCE_THRESHOLD: f64 = 50.0;

// --- Similarity ---
pub const DEFAULT_SIMILARITY_METRIC: &str = "jaccard";
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.5;

// --- Removal ---
pub const DEFAULT_REMOVAL_POLICY: &str = "random";
pub const DEFAULT_SEED: u64 = 0;

// --- Logging ---
pub const DEFAULT_LOG_LEVEL: &str = "info";

//! Closed enumerations selected once at configuration time.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// How distances between record coordinates are measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DistanceMode {
    /// Euclidean distance on (x, y), in coordinate units.
    #[default]
    Planar,
    /// Great-circle distance in metres; x = longitude, y = latitude (degrees).
    Geographic,
}

impl DistanceMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Planar => "planar",
            Self::Geographic => "geographic",
        }
    }
}

impl FromStr for DistanceMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "planar" | "euclidean" | "projected" => Ok(Self::Planar),
            "geographic" | "geodesic" | "haversine" | "great-circle" => Ok(Self::Geographic),
            _ => Err(ConfigError::UnsupportedDistanceMode {
                name: s.to_string(),
            }),
        }
    }
}

/// Compositional similarity metric.
///
/// Every metric except Bray–Curtis works on presence/absence: weights are
/// binarized before evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SimilarityMetric {
    /// `1 − Σ|x−y| / Σ(x+y)` over continuous weights.
    BrayCurtis,
    /// `1 − (u+v) / (2s+u+v)`.
    Sorensen,
    /// `1 − (u+v) / (s+u+v)`.
    #[default]
    Jaccard,
    /// `1 − min(u,v) / (min(u,v)+s)`.
    Simpson,
}

impl SimilarityMetric {
    pub const ALL: [SimilarityMetric; 4] = [
        Self::BrayCurtis,
        Self::Sorensen,
        Self::Jaccard,
        Self::Simpson,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::BrayCurtis => "bray-curtis",
            Self::Sorensen => "sorensen",
            Self::Jaccard => "jaccard",
            Self::Simpson => "simpson",
        }
    }

    /// True when weights are reduced to presence before scoring.
    pub fn is_presence_absence(self) -> bool {
        !matches!(self, Self::BrayCurtis)
    }
}

impl FromStr for SimilarityMetric {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "bray-curtis" | "braycurtis" | "bray" => Ok(Self::BrayCurtis),
            "sorensen" | "dice" | "sorensen-dice" => Ok(Self::Sorensen),
            "jaccard" => Ok(Self::Jaccard),
            "simpson" => Ok(Self::Simpson),
            _ => Err(ConfigError::UnsupportedMetric {
                name: s.to_string(),
            }),
        }
    }
}

/// Which member of a conflicting pair is removed.
///
/// The policy only shapes the priority order; the resolver never looks at it.
/// Names read as "who goes first".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RemovalPolicy {
    /// Uniform random permutation from the seed.
    #[default]
    Random,
    /// Records with fewer categories are removed first.
    LessDiverseFirst,
    /// Records with more categories are removed first.
    MoreDiverseFirst,
    /// Records with a lower ranking-attribute value are removed first.
    LowerRankingFirst,
    /// Records with a higher ranking-attribute value are removed first.
    HigherRankingFirst,
}

impl RemovalPolicy {
    pub const ALL: [RemovalPolicy; 5] = [
        Self::Random,
        Self::LessDiverseFirst,
        Self::MoreDiverseFirst,
        Self::LowerRankingFirst,
        Self::HigherRankingFirst,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::LessDiverseFirst => "less-diverse-first",
            Self::MoreDiverseFirst => "more-diverse-first",
            Self::LowerRankingFirst => "lower-ranking-first",
            Self::HigherRankingFirst => "higher-ranking-first",
        }
    }

    pub fn requires_ranking_attribute(self) -> bool {
        matches!(self, Self::LowerRankingFirst | Self::HigherRankingFirst)
    }
}

impl FromStr for RemovalPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "random" => Ok(Self::Random),
            "less-diverse-first" | "less-diverse" => Ok(Self::LessDiverseFirst),
            "more-diverse-first" | "more-diverse" => Ok(Self::MoreDiverseFirst),
            "lower-ranking-first" | "lower-ranking-attribute-first" | "lower-first" => {
                Ok(Self::LowerRankingFirst)
            }
            "higher-ranking-first" | "higher-ranking-attribute-first" | "higher-first" => {
                Ok(Self::HigherRankingFirst)
            }
            _ => Err(ConfigError::UnsupportedPolicy {
                name: s.to_string(),
            }),
        }
    }
}

macro_rules! impl_display {
    ($($name:ident),*) => {
        $(impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

impl_display!(DistanceMode, SimilarityMetric, RemovalPolicy);

/// Lowercase, trim, and fold `_`/space into `-` so `Bray_Curtis` matches.
fn normalize(s: &str) -> String {
    s.trim()
        .to_ascii_lowercase()
        .replace(['_', ' '], "-")
        .replace('ø', "o")
}

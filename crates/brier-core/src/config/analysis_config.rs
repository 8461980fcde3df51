//! Analysis configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_CONFIDENCE_EPSILON, DEFAULT_CREDIBLE_LEVEL};
use crate::errors::ConfigError;

/// How a resolved, scorable record is bucketed.
///
/// Both policies contribute the same squared error; they differ only in the
/// called/missed tallies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScoringPolicy {
    /// Called when the outcome is true, missed when it is false.
    #[default]
    TwoBucket,
    /// Compares confidence against 50%: true/false positives and negatives,
    /// plus a separate resolved bucket for forecasts of exactly 50%.
    FourBucket,
}

impl ScoringPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TwoBucket => "two-bucket",
            Self::FourBucket => "four-bucket",
        }
    }
}

impl fmt::Display for ScoringPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScoringPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "two-bucket" | "two_bucket" | "2" => Ok(Self::TwoBucket),
            "four-bucket" | "four_bucket" | "4" => Ok(Self::FourBucket),
            other => Err(ConfigError::InvalidValue {
                field: "analysis.scoring_policy".to_string(),
                message: format!("unknown scoring policy `{other}`"),
            }),
        }
    }
}

/// Configuration for the analysis pass.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Tolerance for confidence-level equality, on normalized [0, 1] values. Default: 1e-4.
    pub confidence_epsilon: Option<f64>,
    /// Called/missed bucketing policy. Default: two-bucket.
    pub scoring_policy: Option<ScoringPolicy>,
    /// Probability mass of calibration credible intervals. Default: 0.95.
    pub credible_level: Option<f64>,
    /// Emit tag groups alphabetically instead of first-seen order. Default: false.
    pub sort_tags: Option<bool>,
    /// Aggregate groups on the rayon pool. Default: true.
    pub parallel: Option<bool>,
}

impl AnalysisConfig {
    pub fn effective_confidence_epsilon(&self) -> f64 {
        self.confidence_epsilon.unwrap_or(DEFAULT_CONFIDENCE_EPSILON)
    }

    pub fn effective_scoring_policy(&self) -> ScoringPolicy {
        self.scoring_policy.unwrap_or_default()
    }

    pub fn effective_credible_level(&self) -> f64 {
        self.credible_level.unwrap_or(DEFAULT_CREDIBLE_LEVEL)
    }

    pub fn effective_sort_tags(&self) -> bool {
        self.sort_tags.unwrap_or(false)
    }

    pub fn effective_parallel(&self) -> bool {
        self.parallel.unwrap_or(true)
    }
}

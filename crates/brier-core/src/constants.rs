//! Shared constants for the Brier calibration engine.

/// Confidences are written on a 0–100 scale and divided by this before scoring.
pub const CONFIDENCE_SCALE: f64 = 100.0;

/// The coin-flip confidence, on the 0–100 scale.
pub const COIN_FLIP_CONFIDENCE: f64 = 50.0;

/// Default tolerance for treating two normalized confidences as the same level.
pub const DEFAULT_CONFIDENCE_EPSILON: f64 = 1e-4;

/// Default probability mass of the credible interval around observed frequencies.
pub const DEFAULT_CREDIBLE_LEVEL: f64 = 0.95;

/// Project config filename, looked up in the project root.
pub const PROJECT_CONFIG_FILENAME: &str = "brier.toml";

/// Environment variable holding the tracing filter.
pub const LOG_ENV_VAR: &str = "BRIER_LOG";

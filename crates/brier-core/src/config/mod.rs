//! Configuration system for Brier.
//! TOML-based, layered resolution: CLI > env > project > user > defaults.

pub mod analysis_config;
pub mod brier_config;
pub mod validation_config;

pub use analysis_config::{AnalysisConfig, ScoringPolicy};
pub use brier_config::{BrierConfig, CliOverrides};
pub use validation_config::ValidationConfig;

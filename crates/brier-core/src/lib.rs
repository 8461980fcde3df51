//! # brier-core
//!
//! Foundation crate for the Brier calibration engine.
//! Defines the prediction record model, sources, errors, config, tracing
//! setup, and constants. `brier-analysis` depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod record;
pub mod source;
pub mod tracing;

// Re-export the most commonly used types at the crate root.
pub use config::{AnalysisConfig, BrierConfig, ScoringPolicy, ValidationConfig};
pub use errors::{ConfigError, Diagnostic, Severity, ValidationError};
pub use record::{GroupKey, PredictionRecord};
pub use source::{flatten, Source, SourceMetadata};

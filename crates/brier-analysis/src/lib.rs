//! # brier-analysis
//!
//! Calibration analysis over prediction records.
//!
//! ## Layers
//!
//! | Layer | Module | Role |
//! |-------|--------|------|
//! | Classifier | [`classify`] | One record → disposition + squared error |
//! | Grouping | [`grouping`], [`filter`] | Partition records by tag, source, confidence level |
//! | Aggregator | [`statistics`] | Counts, percentages, Brier score per group |
//!
//! [`analysis`] runs all three over a record collection. [`calibration`]
//! turns the confidence groups into plot-ready points, [`validation`] checks
//! sources for malformed records, and [`presentation`] supplies per-record
//! labels for renderers.

pub mod analysis;
pub mod calibration;
pub mod classify;
pub mod filter;
pub mod grouping;
pub mod presentation;
pub mod statistics;
pub mod validation;

pub use analysis::{analyze, Analysis, Analyzer, Grouped};
pub use calibration::{CalibrationCurve, CalibrationPoint};
pub use classify::{classify, classify_with, Classification, Disposition, Verdict};
pub use filter::{Filter, RecordFilter};
pub use grouping::AnalyzedRecords;
pub use presentation::{label, ResultLabel};
pub use statistics::{StatisticsSummary, StatisticsUnit};
pub use validation::{ValidationRule, Validator};

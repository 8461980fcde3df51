//! StatisticsUnit: counters and squared errors for one group of records.
//!
//! The Brier score is the mean of `(f_t − o_t)²` over scored records. It runs
//! from 0 (perfect) to 1 (certain and wrong every time); a forecaster who
//! always says 50% scores 0.25 regardless of what happens.
//!
//! Derived values are computed on every call. A statistic whose denominator
//! is zero is `NaN`: "no data", never a fabricated 0.

use serde::Serialize;

use brier_core::PredictionRecord;

use crate::classify::{Classification, Disposition};

/// Aggregate for one grouping of records.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatisticsUnit {
    pub title: String,
    /// One `(f_t − o_t)²` per scored record.
    squared_errors: Vec<f64>,

    /// Predicted correctly.
    pub called: usize,
    /// Predicted incorrectly.
    pub missed: usize,
    /// Forecast at exactly 50% and resolved. Always 0 under the two-bucket policy.
    pub resolved: usize,

    /// No outcome yet.
    pub ongoing: usize,
    /// No outcome, with a cause for exclusion.
    pub excluded: usize,

    /// Lacks a claim, a confidence, or both.
    pub unscorable: usize,

    /// Scored samples whose outcome was true.
    pub occurrences: usize,
}

impl StatisticsUnit {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Add one squared-error sample.
    ///
    /// `probability` must already be normalized to [0, 1]; it is not checked.
    pub fn add(&mut self, probability: f64, happened: bool) {
        let outcome = if happened { 1.0 } else { 0.0 };
        self.squared_errors.push((probability - outcome).powi(2));
        if happened {
            self.occurrences += 1;
        }
    }

    /// Fold one classified record into the counters, adding its sample when scored.
    pub fn record(&mut self, record: &PredictionRecord, classification: &Classification) {
        match classification.disposition {
            Disposition::Unscorable => self.unscorable += 1,
            Disposition::Ongoing => self.ongoing += 1,
            Disposition::Excluded => self.excluded += 1,
            Disposition::Called => self.called += 1,
            Disposition::Missed => self.missed += 1,
            Disposition::Resolved => self.resolved += 1,
        }

        if classification.disposition.is_scored() {
            if let (Some(probability), Some(happened)) = (record.probability(), record.outcome) {
                self.add(probability, happened);
            }
        }
    }

    /// Number of scored samples. Zero is a normal state.
    pub fn count(&self) -> usize {
        self.squared_errors.len()
    }

    pub fn squared_errors(&self) -> &[f64] {
        &self.squared_errors
    }

    /// Mean squared error of the samples, or `NaN` when there are none.
    pub fn brier_score(&self) -> f64 {
        if self.squared_errors.is_empty() {
            return f64::NAN;
        }
        let sum: f64 = self.squared_errors.iter().sum();
        sum / self.squared_errors.len() as f64
    }

    /// Fraction of scored samples whose outcome was true, or `NaN` when there are none.
    pub fn observed_frequency(&self) -> f64 {
        ratio(self.occurrences, self.count())
    }

    pub fn total(&self) -> usize {
        self.scored() + self.unscored() + self.unscorable
    }

    pub fn scored(&self) -> usize {
        self.called + self.missed + self.resolved
    }

    pub fn unscored(&self) -> usize {
        self.ongoing + self.excluded
    }

    pub fn of_total_scored(&self) -> f64 {
        percent(self.scored(), self.total())
    }

    pub fn of_total_called(&self) -> f64 {
        percent(self.called, self.total())
    }

    pub fn of_total_missed(&self) -> f64 {
        percent(self.missed, self.total())
    }

    pub fn of_scored_called(&self) -> f64 {
        percent(self.called, self.scored())
    }

    pub fn of_scored_missed(&self) -> f64 {
        percent(self.missed, self.scored())
    }

    pub fn of_total_unscored(&self) -> f64 {
        percent(self.unscored(), self.total())
    }

    pub fn of_unscored_ongoing(&self) -> f64 {
        percent(self.ongoing, self.unscored())
    }

    pub fn of_unscored_excluded(&self) -> f64 {
        percent(self.excluded, self.unscored())
    }

    /// Panics if the sample count disagrees with the scored tally.
    ///
    /// A mismatch means the classifier and the aggregator disagree, which is
    /// a bug, not a data problem.
    pub fn check_invariant(&self) {
        assert_eq!(
            self.squared_errors.len(),
            self.scored(),
            "logic error in `{}`: squared differences and scored items differ",
            self.title
        );
    }

    /// Snapshot of the derived values, with undefined statistics as `None`.
    pub fn summary(&self) -> StatisticsSummary {
        StatisticsSummary {
            title: self.title.clone(),
            total: self.total(),
            scored: self.scored(),
            called: self.called,
            missed: self.missed,
            resolved: self.resolved,
            ongoing: self.ongoing,
            excluded: self.excluded,
            unscorable: self.unscorable,
            brier_score: defined(self.brier_score()),
            observed_frequency: defined(self.observed_frequency()),
            of_total_scored: defined(self.of_total_scored()),
            of_scored_called: defined(self.of_scored_called()),
            of_scored_missed: defined(self.of_scored_missed()),
            of_total_unscored: defined(self.of_total_unscored()),
            of_unscored_ongoing: defined(self.of_unscored_ongoing()),
            of_unscored_excluded: defined(self.of_unscored_excluded()),
        }
    }
}

/// Serializable view of a [`StatisticsUnit`] for renderers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticsSummary {
    pub title: String,
    pub total: usize,
    pub scored: usize,
    pub called: usize,
    pub missed: usize,
    pub resolved: usize,
    pub ongoing: usize,
    pub excluded: usize,
    pub unscorable: usize,
    pub brier_score: Option<f64>,
    pub observed_frequency: Option<f64>,
    pub of_total_scored: Option<f64>,
    pub of_scored_called: Option<f64>,
    pub of_scored_missed: Option<f64>,
    pub of_total_unscored: Option<f64>,
    pub of_unscored_ongoing: Option<f64>,
    pub of_unscored_excluded: Option<f64>,
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        return f64::NAN;
    }
    numerator as f64 / denominator as f64
}

fn percent(numerator: usize, denominator: usize) -> f64 {
    100.0 * ratio(numerator, denominator)
}

fn defined(value: f64) -> Option<f64> {
    (!value.is_nan()).then_some(value)
}

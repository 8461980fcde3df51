//! Calibration curve: stated confidence against observed frequency.
//!
//! One point per confidence level with at least one scored record. Each
//! point carries a Beta credible interval around its observed frequency so
//! a renderer can show how much a level's sample size supports it.
//!
//! Prior: Beta(1, 1). Posterior after k occurrences in n samples:
//! Beta(1 + k, 1 + n − k).

use serde::Serialize;
use statrs::distribution::{Beta, ContinuousCDF};

use crate::analysis::{Analysis, Grouped};
use crate::grouping::AnalyzedRecords;

/// One level on the calibration plot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalibrationPoint {
    /// Stated confidence, normalized to [0, 1].
    pub predicted: f64,
    /// Fraction of scored records at this level that came true.
    pub observed: f64,
    /// Scored records at this level.
    pub samples: usize,
    /// Of those, how many came true.
    pub occurrences: usize,
    /// Credible interval `(low, high)` around `observed`.
    pub interval: (f64, f64),
}

impl CalibrationPoint {
    /// Signed miscalibration: positive when the predictor was overconfident.
    pub fn gap(&self) -> f64 {
        self.predicted - self.observed
    }
}

/// Plot-ready calibration data, sorted by stated confidence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalibrationCurve {
    pub level: f64,
    pub points: Vec<CalibrationPoint>,
}

impl CalibrationCurve {
    /// Build from an analysis's confidence groups.
    pub fn from_analysis(analysis: &Analysis, level: f64) -> Self {
        Self::from_groups(&analysis.by_confidence, level)
    }

    pub fn from_groups(groups: &[Grouped<f64>], level: f64) -> Self {
        let mut points: Vec<CalibrationPoint> = groups
            .iter()
            .filter_map(|g| point(g.key, &g.group, level))
            .collect();
        points.sort_by(|a, b| a.predicted.total_cmp(&b.predicted));
        Self { level, points }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Total scored samples across all points.
    pub fn samples(&self) -> usize {
        self.points.iter().map(|p| p.samples).sum()
    }

    /// Sample-weighted mean of `|predicted − observed|`, or `NaN` with no points.
    pub fn calibration_gap(&self) -> f64 {
        self.weighted_mean(|p| p.gap().abs())
    }

    /// Reliability term of the Brier decomposition: sample-weighted mean of
    /// `(predicted − observed)²`, or `NaN` with no points.
    pub fn reliability(&self) -> f64 {
        self.weighted_mean(|p| p.gap().powi(2))
    }

    fn weighted_mean(&self, f: impl Fn(&CalibrationPoint) -> f64) -> f64 {
        let n = self.samples();
        if n == 0 {
            return f64::NAN;
        }
        let sum: f64 = self.points.iter().map(|p| p.samples as f64 * f(p)).sum();
        sum / n as f64
    }
}

fn point(predicted: f64, group: &AnalyzedRecords, level: f64) -> Option<CalibrationPoint> {
    let samples = group.unit.count();
    if samples == 0 {
        return None;
    }
    let occurrences = group.unit.occurrences;
    Some(CalibrationPoint {
        predicted,
        observed: group.unit.observed_frequency(),
        samples,
        occurrences,
        interval: credible_interval(occurrences, samples, level),
    })
}

/// Credible interval holding `level` of the posterior mass for `successes`
/// out of `total`, under a uniform prior.
///
/// Falls back to `(0, 1)` when `level` is outside (0, 1) or the
/// distribution cannot be built.
pub fn credible_interval(successes: usize, total: usize, level: f64) -> (f64, f64) {
    if !(level > 0.0 && level < 1.0) {
        return (0.0, 1.0);
    }
    let alpha = 1.0 + successes as f64;
    let beta = 1.0 + total.saturating_sub(successes) as f64;
    let tail = (1.0 - level) / 2.0;

    match Beta::new(alpha, beta) {
        Ok(dist) => {
            let low = dist.inverse_cdf(tail);
            let high = dist.inverse_cdf(1.0 - tail);
            let low = if low.is_finite() { low.clamp(0.0, 1.0) } else { 0.0 };
            let high = if high.is_finite() { high.clamp(0.0, 1.0) } else { 1.0 };
            (low, high)
        }
        Err(_) => (0.0, 1.0),
    }
}

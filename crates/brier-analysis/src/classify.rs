//! Record classifier: the disposition and squared error of one record.
//!
//! Checks run in a fixed order:
//! 1. No claim or no confidence → `Unscorable`, whatever else is set.
//! 2. No outcome → `Excluded` if there is an exclusion cause, else `Ongoing`.
//! 3. Otherwise scored, with squared error `(confidence/100 − o)²`.
//!
//! How a scored record is bucketed depends on the [`ScoringPolicy`].

use serde::Serialize;

use brier_core::constants::{COIN_FLIP_CONFIDENCE, CONFIDENCE_SCALE, DEFAULT_CONFIDENCE_EPSILON};
use brier_core::{PredictionRecord, ScoringPolicy};

/// What happened to a record when it was classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Disposition {
    /// Missing a claim, a confidence, or both.
    Unscorable,
    /// Not resolved yet.
    Ongoing,
    /// Not resolved, and deliberately left out.
    Excluded,
    /// Resolved in the forecast's favor.
    Called,
    /// Resolved against the forecast.
    Missed,
    /// Resolved, but forecast at exactly 50%. Four-bucket policy only.
    Resolved,
}

impl Disposition {
    /// True when the record contributes a squared error.
    pub fn is_scored(self) -> bool {
        matches!(self, Self::Called | Self::Missed | Self::Resolved)
    }
}

/// Four-bucket refinement of called/missed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Verdict {
    /// Said it would happen; it did.
    TruePositive,
    /// Said it wouldn't happen; it didn't.
    TrueNegative,
    /// Said it would happen; it didn't.
    FalsePositive,
    /// Said it wouldn't happen; it did.
    FalseNegative,
}

/// Result of classifying one record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Classification {
    pub disposition: Disposition,
    /// Set only under the four-bucket policy, for called and missed records.
    pub verdict: Option<Verdict>,
    /// Set exactly when `disposition.is_scored()`.
    pub squared_error: Option<f64>,
}

impl Classification {
    fn unscored(disposition: Disposition) -> Self {
        Self {
            disposition,
            verdict: None,
            squared_error: None,
        }
    }
}

/// `(p − o)²` for a probability on [0, 1] and a binary outcome.
pub fn squared_error(probability: f64, happened: bool) -> f64 {
    let outcome = if happened { 1.0 } else { 0.0 };
    (probability - outcome).powi(2)
}

/// Classify with the default two-bucket policy.
pub fn classify(record: &PredictionRecord) -> Classification {
    classify_with(record, ScoringPolicy::default(), DEFAULT_CONFIDENCE_EPSILON)
}

/// Classify under an explicit policy.
///
/// `epsilon` is the tolerance, on normalized probabilities, for treating a
/// confidence as exactly 50%. Only the four-bucket policy looks at it.
pub fn classify_with(
    record: &PredictionRecord,
    policy: ScoringPolicy,
    epsilon: f64,
) -> Classification {
    let confidence = match record.confidence {
        Some(c) if record.has_claim() => c,
        _ => return Classification::unscored(Disposition::Unscorable),
    };

    let Some(happened) = record.outcome else {
        return if record.has_exclusion_cause() {
            Classification::unscored(Disposition::Excluded)
        } else {
            Classification::unscored(Disposition::Ongoing)
        };
    };

    let probability = confidence / CONFIDENCE_SCALE;
    let (disposition, verdict) = match policy {
        ScoringPolicy::TwoBucket => {
            let d = if happened {
                Disposition::Called
            } else {
                Disposition::Missed
            };
            (d, None)
        }
        ScoringPolicy::FourBucket => four_bucket(probability, happened, epsilon),
    };

    Classification {
        disposition,
        verdict,
        squared_error: Some(squared_error(probability, happened)),
    }
}

fn four_bucket(probability: f64, happened: bool, epsilon: f64) -> (Disposition, Option<Verdict>) {
    let coin_flip = COIN_FLIP_CONFIDENCE / CONFIDENCE_SCALE;
    if (probability - coin_flip).abs() <= epsilon {
        return (Disposition::Resolved, None);
    }

    let said_it_would = probability > coin_flip;
    match (said_it_would, happened) {
        (true, true) => (Disposition::Called, Some(Verdict::TruePositive)),
        (false, false) => (Disposition::Called, Some(Verdict::TrueNegative)),
        (true, false) => (Disposition::Missed, Some(Verdict::FalsePositive)),
        (false, true) => (Disposition::Missed, Some(Verdict::FalseNegative)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn unscorable_takes_precedence() {
        let no_claim = PredictionRecord::new("").with_confidence(70.0).with_outcome(true);
        assert_eq!(classify(&no_claim).disposition, Disposition::Unscorable);

        let no_confidence = PredictionRecord::new("x")
            .with_outcome(false)
            .with_exclusion_cause("moved");
        let c = classify(&no_confidence);
        assert_eq!(c.disposition, Disposition::Unscorable);
        assert_eq!(c.squared_error, None);
    }

    #[test]
    fn unresolved_records() {
        let ongoing = PredictionRecord::new("x").with_confidence(60.0);
        assert_eq!(classify(&ongoing).disposition, Disposition::Ongoing);

        let excluded = ongoing.clone().with_exclusion_cause("question was ambiguous");
        assert_eq!(classify(&excluded).disposition, Disposition::Excluded);

        let blank_cause = ongoing.with_exclusion_cause("");
        assert_eq!(classify(&blank_cause).disposition, Disposition::Ongoing);
    }

    #[test]
    fn exclusion_cause_ignored_once_resolved() {
        let r = PredictionRecord::new("x")
            .with_confidence(80.0)
            .with_outcome(true)
            .with_exclusion_cause("late");
        assert_eq!(classify(&r).disposition, Disposition::Called);
    }

    #[test]
    fn two_bucket_follows_outcome() {
        let low_but_happened = PredictionRecord::new("x").with_confidence(30.0).with_outcome(true);
        let c = classify(&low_but_happened);
        assert_eq!(c.disposition, Disposition::Called);
        assert_eq!(c.verdict, None);
        assert!(close(c.squared_error.unwrap(), 0.49));

        let sure_but_wrong = PredictionRecord::new("x").with_confidence(100.0).with_outcome(false);
        let c = classify(&sure_but_wrong);
        assert_eq!(c.disposition, Disposition::Missed);
        assert!(close(c.squared_error.unwrap(), 1.0));
    }

    #[test]
    fn four_bucket_compares_against_half() {
        let policy = ScoringPolicy::FourBucket;
        let eps = DEFAULT_CONFIDENCE_EPSILON;
        let cases = [
            (70.0, true, Disposition::Called, Some(Verdict::TruePositive)),
            (30.0, false, Disposition::Called, Some(Verdict::TrueNegative)),
            (70.0, false, Disposition::Missed, Some(Verdict::FalsePositive)),
            (30.0, true, Disposition::Missed, Some(Verdict::FalseNegative)),
            (50.0, true, Disposition::Resolved, None),
            (50.0, false, Disposition::Resolved, None),
        ];
        for (confidence, happened, disposition, verdict) in cases {
            let r = PredictionRecord::new("x")
                .with_confidence(confidence)
                .with_outcome(happened);
            let c = classify_with(&r, policy, eps);
            assert_eq!(c.disposition, disposition, "{confidence} {happened}");
            assert_eq!(c.verdict, verdict, "{confidence} {happened}");
            assert!(c.squared_error.is_some());
        }
    }

    #[test]
    fn coin_flip_always_costs_a_quarter() {
        for happened in [true, false] {
            let r = PredictionRecord::new("x").with_confidence(50.0).with_outcome(happened);
            assert!(close(classify(&r).squared_error.unwrap(), 0.25));
        }
    }
}

//! The individual validation rules.

use brier_core::constants::CONFIDENCE_SCALE;
use brier_core::{Diagnostic, Severity, Source};

use super::locate::{about_record, about_source, missing_claim};
use super::ValidationRule;

/// Every source needs a title or a scope so its records can be grouped.
#[derive(Debug, Clone, Copy, Default)]
pub struct TitleOrScopePresent;

impl ValidationRule for TitleOrScopePresent {
    fn id(&self) -> &'static str {
        "error.metadata.missing-title-and-scope"
    }

    fn check(&self, source: &Source) -> Vec<Diagnostic> {
        if source.metadata.has_title_or_scope() {
            return Vec::new();
        }
        vec![about_source(
            source,
            self.id(),
            Severity::Error,
            "neither title nor scope in metadata block",
        )]
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ClaimsPresent;

impl ValidationRule for ClaimsPresent {
    fn id(&self) -> &'static str {
        "error.claim.missing"
    }

    fn check(&self, source: &Source) -> Vec<Diagnostic> {
        source
            .records
            .iter()
            .enumerate()
            .filter(|(_, r)| !r.has_claim())
            .map(|(i, _)| missing_claim(source, i, self.id()))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ConfidencesPresent;

impl ValidationRule for ConfidencesPresent {
    fn id(&self) -> &'static str {
        "error.confidence.missing"
    }

    fn check(&self, source: &Source) -> Vec<Diagnostic> {
        source
            .records
            .iter()
            .enumerate()
            .filter(|(_, r)| r.confidence.is_none())
            .map(|(i, _)| {
                about_record(
                    source,
                    i,
                    self.id(),
                    Severity::Error,
                    "has no confidence level specified",
                )
            })
            .collect()
    }
}

/// Confidences must lie in [0, 100]. NaN is never in range.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfidencesInRange;

impl ValidationRule for ConfidencesInRange {
    fn id(&self) -> &'static str {
        "error.confidence.impossible"
    }

    fn check(&self, source: &Source) -> Vec<Diagnostic> {
        source
            .records
            .iter()
            .enumerate()
            .filter_map(|(i, r)| r.confidence.map(|c| (i, c)))
            .filter(|(_, c)| !(0.0..=CONFIDENCE_SCALE).contains(c))
            .map(|(i, _)| {
                about_record(
                    source,
                    i,
                    self.id(),
                    Severity::Error,
                    "has a confidence level below 0% or above 100%",
                )
            })
            .collect()
    }
}

/// Warns about certainty. 0% and 100% are legal but rarely meant.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfidencesSensible;

impl ValidationRule for ConfidencesSensible {
    fn id(&self) -> &'static str {
        "warn.confidence"
    }

    fn check(&self, source: &Source) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        for (i, record) in source.records.iter().enumerate() {
            match record.confidence {
                Some(c) if c == 0.0 => diagnostics.push(about_record(
                    source,
                    i,
                    "warn.confidence.zero",
                    Severity::Warning,
                    "has a confidence level of zero",
                )),
                Some(c) if c == CONFIDENCE_SCALE => diagnostics.push(about_record(
                    source,
                    i,
                    "warn.confidence.unity",
                    Severity::Warning,
                    "has a confidence level of one hundred percent",
                )),
                _ => {}
            }
        }
        diagnostics
    }
}

/// A known outcome with no confidence can never be scored.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutcomesHaveConfidence;

impl ValidationRule for OutcomesHaveConfidence {
    fn id(&self) -> &'static str {
        "warn.outcome.without-confidence"
    }

    fn check(&self, source: &Source) -> Vec<Diagnostic> {
        source
            .records
            .iter()
            .enumerate()
            .filter(|(_, r)| r.outcome.is_some() && r.confidence.is_none())
            .map(|(i, _)| {
                about_record(
                    source,
                    i,
                    self.id(),
                    Severity::Warning,
                    "has an outcome but no confidence level, so it cannot be scored",
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::Validator;
    use brier_core::{PredictionRecord, SourceMetadata, ValidationConfig};

    fn source(records: Vec<PredictionRecord>) -> Source {
        Source::new(SourceMetadata::new("Life", ""), records).with_filename("life.yaml")
    }

    #[test]
    fn missing_title_and_scope() {
        let s = Source::new(SourceMetadata::new("", ""), vec![]);
        let ds = TitleOrScopePresent.check(&s);
        assert_eq!(ds.len(), 1);
        assert_eq!(ds[0].id, "error.metadata.missing-title-and-scope");
        assert_eq!(ds[0].index, None);

        let scoped = Source::new(SourceMetadata::new("", "2020"), vec![]);
        assert!(TitleOrScopePresent.check(&scoped).is_empty());
    }

    #[test]
    fn every_missing_claim_is_reported() {
        let s = source(vec![
            PredictionRecord::new("").with_confidence(50.0),
            PredictionRecord::new("a").with_confidence(50.0),
            PredictionRecord::new("").with_confidence(50.0),
        ]);
        let ds = ClaimsPresent.check(&s);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds[0].index, Some(0));
        assert_eq!(ds[1].message, "prediction after “a” has no claim");
    }

    #[test]
    fn missing_confidence() {
        let s = source(vec![
            PredictionRecord::new("a").with_confidence(50.0),
            PredictionRecord::new("b"),
        ]);
        let ds = ConfidencesPresent.check(&s);
        assert_eq!(ds.len(), 1);
        assert_eq!(ds[0].index, Some(1));
        assert!(ds[0].message.contains("“b”"));
    }

    #[test]
    fn out_of_range_confidence() {
        let s = source(vec![
            PredictionRecord::new("low").with_confidence(-1.0),
            PredictionRecord::new("ok").with_confidence(0.0),
            PredictionRecord::new("ok").with_confidence(100.0),
            PredictionRecord::new("high").with_confidence(100.5),
            PredictionRecord::new("nan").with_confidence(f64::NAN),
        ]);
        let indices: Vec<_> = ConfidencesInRange.check(&s).iter().map(|d| d.index).collect();
        assert_eq!(indices, vec![Some(0), Some(3), Some(4)]);
    }

    #[test]
    fn certainty_warnings() {
        let s = source(vec![
            PredictionRecord::new("never").with_confidence(0.0),
            PredictionRecord::new("maybe").with_confidence(50.0),
            PredictionRecord::new("always").with_confidence(100.0),
        ]);
        let ids: Vec<_> = ConfidencesSensible.check(&s).iter().map(|d| d.id).collect();
        assert_eq!(ids, vec!["warn.confidence.zero", "warn.confidence.unity"]);
    }

    #[test]
    fn outcome_without_confidence_warns() {
        let s = source(vec![PredictionRecord::new("a").with_outcome(true)]);
        let ds = OutcomesHaveConfidence.check(&s);
        assert_eq!(ds.len(), 1);
        assert_eq!(ds[0].severity, Severity::Warning);
    }

    #[test]
    fn validator_collects_everything() {
        let s = Source::new(
            SourceMetadata::new("", ""),
            vec![
                PredictionRecord::new(""),
                PredictionRecord::new("sure").with_confidence(100.0),
            ],
        );
        let ds = Validator::default().run_all(&s);
        let ids: Vec<_> = ds.iter().map(|d| d.id).collect();
        assert_eq!(
            ids,
            vec![
                "error.metadata.missing-title-and-scope",
                "error.claim.missing",
                "error.confidence.missing",
                "warn.confidence.unity",
            ]
        );
    }

    #[test]
    fn validator_respects_config() {
        let s = Source::new(
            SourceMetadata::new("", ""),
            vec![PredictionRecord::new("sure").with_confidence(100.0)],
        );
        let config = ValidationConfig {
            warn_on_certainty: Some(false),
            require_title_or_scope: Some(false),
        };
        assert!(Validator::new(config).run_all(&s).is_empty());
    }

    #[test]
    fn minimal_run_skips_range_checks() {
        let s = source(vec![PredictionRecord::new("a").with_confidence(150.0)]);
        let validator = Validator::default();
        assert!(validator.run_minimal(&s).is_empty());
        assert_eq!(validator.run_all(&s).len(), 1);
    }

    #[test]
    fn ensure_valid_returns_warnings_or_fails() {
        let validator = Validator::default();

        let warned = source(vec![PredictionRecord::new("a").with_confidence(0.0)]);
        let warnings = validator.ensure_valid(&warned).unwrap();
        assert_eq!(warnings.len(), 1);

        let broken = source(vec![PredictionRecord::new("a")]);
        let err = validator.ensure_valid(&broken).unwrap_err();
        assert_eq!(err.count, 1);
        assert_eq!(err.origin, "life.yaml");
    }
}

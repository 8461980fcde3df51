//! Analysis: every grouping of a record collection, aggregated.
//!
//! One pass produces:
//! - `everything`: all records exactly once
//! - `by_tag`: one group per tag (overlapping; untagged records join none)
//! - `by_key`: one group per source collection (a partition)
//! - `by_confidence`: one group per confidence level (records without a
//!   confidence join none)
//!
//! The input is only read, so analyzing the same slice twice yields equal
//! results. Groups are independent and may be aggregated on the rayon pool;
//! output order stays first-seen either way.

use rayon::prelude::*;
use serde::Serialize;

use brier_core::constants::CONFIDENCE_SCALE;
use brier_core::{flatten, AnalysisConfig, GroupKey, PredictionRecord, ScoringPolicy, Source};

use crate::calibration::CalibrationCurve;
use crate::filter::RecordFilter;
use crate::grouping::{self, AnalyzedRecords};
use crate::statistics::StatisticsSummary;

/// Title of the group holding every record.
pub const EVERYTHING_TITLE: &str = "Everything";

/// Title of the group for records without a parent collection.
pub const NO_PARENT_TITLE: &str = "(no parent)";

/// An aggregated group and the key that selected it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Grouped<K> {
    pub key: K,
    pub group: AnalyzedRecords,
}

/// Result of one analysis pass. Read-only once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub policy: ScoringPolicy,
    pub everything: AnalyzedRecords,
    pub by_tag: Vec<Grouped<String>>,
    pub by_key: Vec<Grouped<GroupKey>>,
    /// Keyed by normalized probability.
    pub by_confidence: Vec<Grouped<f64>>,
}

impl Analysis {
    pub fn tag(&self, tag: &str) -> Option<&AnalyzedRecords> {
        self.by_tag.iter().find(|g| g.key == tag).map(|g| &g.group)
    }

    pub fn key(&self, key: &GroupKey) -> Option<&AnalyzedRecords> {
        self.by_key.iter().find(|g| &g.key == key).map(|g| &g.group)
    }

    /// The group for a normalized confidence level, within `epsilon`.
    pub fn confidence(&self, probability: f64, epsilon: f64) -> Option<&AnalyzedRecords> {
        self.by_confidence
            .iter()
            .find(|g| (g.key - probability).abs() <= epsilon)
            .map(|g| &g.group)
    }

    /// Summaries of every group, in output order, for renderers.
    pub fn report(&self) -> AnalysisReport {
        AnalysisReport {
            policy: self.policy,
            everything: self.everything.unit.summary(),
            by_tag: self.by_tag.iter().map(|g| g.group.unit.summary()).collect(),
            by_key: self.by_key.iter().map(|g| g.group.unit.summary()).collect(),
            by_confidence: self
                .by_confidence
                .iter()
                .map(|g| g.group.unit.summary())
                .collect(),
        }
    }

    /// Pretty-printed JSON of [`Analysis::report`].
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.report())
    }
}

/// Per-category summaries, with undefined statistics as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub policy: ScoringPolicy,
    pub everything: StatisticsSummary,
    pub by_tag: Vec<StatisticsSummary>,
    pub by_key: Vec<StatisticsSummary>,
    pub by_confidence: Vec<StatisticsSummary>,
}

/// Runs analysis passes under one configuration.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: AnalysisConfig,
}

impl Analyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyze a record collection.
    pub fn analyze(&self, records: &[PredictionRecord]) -> Analysis {
        let span = tracing::info_span!("brier.analysis", records = records.len());
        let _enter = span.enter();

        let policy = self.config.effective_scoring_policy();
        let epsilon = self.config.effective_confidence_epsilon();

        let everything = grouping::aggregate(
            records,
            (0..records.len()).collect(),
            EVERYTHING_TITLE,
            policy,
            epsilon,
        );

        let mut tag_groups = grouping::group_by(records, |r| r.tags.clone());
        if self.config.effective_sort_tags() {
            tag_groups.sort_by(|a, b| a.0.cmp(&b.0));
        }
        let by_tag = self.build(
            records,
            tag_groups
                .into_iter()
                .map(|(tag, members)| {
                    let title = format!("Tag: {tag}");
                    (tag, title, members)
                })
                .collect(),
        );

        let by_key = self.build(
            records,
            grouping::group_by(records, |r| Some(r.group_key.clone()))
                .into_iter()
                .map(|(key, members)| {
                    let title = key_title(&key);
                    (key, title, members)
                })
                .collect(),
        );

        let by_confidence = self.build(
            records,
            grouping::group_by_confidence(records, epsilon)
                .into_iter()
                .map(|(probability, members)| {
                    (probability, confidence_title(probability), members)
                })
                .collect(),
        );

        tracing::info!(
            records = records.len(),
            tags = by_tag.len(),
            keys = by_key.len(),
            confidence_levels = by_confidence.len(),
            policy = %policy,
            brier_score = everything.unit.brier_score(),
            "analysis complete"
        );

        Analysis {
            policy,
            everything,
            by_tag,
            by_key,
            by_confidence,
        }
    }

    /// Flatten the sources and analyze their records.
    ///
    /// Member indices refer to the flattened order, which is also returned.
    pub fn analyze_sources(&self, sources: &[Source]) -> (Vec<PredictionRecord>, Analysis) {
        let records = flatten(sources);
        let analysis = self.analyze(&records);
        (records, analysis)
    }

    /// Aggregate an ad hoc selection under this analyzer's policy.
    pub fn only<F>(&self, records: &[PredictionRecord], filter: &F) -> AnalyzedRecords
    where
        F: RecordFilter + ?Sized,
    {
        grouping::only(
            records,
            filter,
            self.config.effective_scoring_policy(),
            self.config.effective_confidence_epsilon(),
        )
    }

    /// Calibration curve for an analysis at the configured credible level.
    pub fn calibration(&self, analysis: &Analysis) -> CalibrationCurve {
        CalibrationCurve::from_analysis(analysis, self.config.effective_credible_level())
    }

    fn build<K: Send>(
        &self,
        records: &[PredictionRecord],
        groups: Vec<(K, String, Vec<usize>)>,
    ) -> Vec<Grouped<K>> {
        let policy = self.config.effective_scoring_policy();
        let epsilon = self.config.effective_confidence_epsilon();
        let make = |(key, title, members): (K, String, Vec<usize>)| Grouped {
            key,
            group: grouping::aggregate(records, members, title, policy, epsilon),
        };

        if self.config.effective_parallel() {
            groups.into_par_iter().map(make).collect()
        } else {
            groups.into_iter().map(make).collect()
        }
    }
}

/// Analyze with the default configuration.
pub fn analyze(records: &[PredictionRecord]) -> Analysis {
    Analyzer::default().analyze(records)
}

fn key_title(key: &GroupKey) -> String {
    if key.is_none() {
        NO_PARENT_TITLE.to_string()
    } else {
        key.to_string()
    }
}

fn confidence_title(probability: f64) -> String {
    let percent = probability * CONFIDENCE_SCALE;
    if (percent - percent.round()).abs() < 1e-9 {
        format!("At the {percent:.0}% confidence level")
    } else {
        format!("At the {percent:.1}% confidence level")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn titles() {
        assert_eq!(confidence_title(0.7), "At the 70% confidence level");
        assert_eq!(confidence_title(0.995), "At the 99.5% confidence level");
        assert_eq!(key_title(&GroupKey::none()), NO_PARENT_TITLE);
        assert_eq!(key_title(&GroupKey::new("Life 2019")), "Life 2019");
    }

    #[test]
    fn empty_input() {
        let a = analyze(&[]);
        assert_eq!(a.everything.unit.total(), 0);
        assert!(a.everything.unit.brier_score().is_nan());
        assert!(a.by_tag.is_empty());
        assert!(a.by_key.is_empty());
        assert!(a.by_confidence.is_empty());
    }

    #[test]
    fn sort_tags_is_opt_in() {
        let records = vec![
            PredictionRecord::new("a").with_tags(["zebra"]),
            PredictionRecord::new("b").with_tags(["apple"]),
        ];
        let first_seen = analyze(&records);
        assert_eq!(first_seen.by_tag[0].key, "zebra");

        let sorted = Analyzer::new(AnalysisConfig {
            sort_tags: Some(true),
            ..Default::default()
        })
        .analyze(&records);
        assert_eq!(sorted.by_tag[0].key, "apple");
    }

    #[test]
    fn serial_and_parallel_agree() {
        let records: Vec<PredictionRecord> = (0..40)
            .map(|i| {
                PredictionRecord::new(format!("claim {i}"))
                    .with_confidence(f64::from(i % 5) * 20.0 + 10.0)
                    .with_outcome(i % 3 == 0)
                    .with_tags([format!("t{}", i % 4)])
                    .with_group_key(format!("k{}", i % 3))
            })
            .collect();
        let serial = Analyzer::new(AnalysisConfig {
            parallel: Some(false),
            ..Default::default()
        })
        .analyze(&records);
        let parallel = analyze(&records);
        assert_eq!(serial, parallel);
    }

    #[test]
    fn calibration_uses_configured_level() {
        let records = vec![
            PredictionRecord::new("a").with_confidence(80.0).with_outcome(true),
            PredictionRecord::new("b").with_confidence(80.0).with_outcome(false),
        ];
        let narrow = Analyzer::new(AnalysisConfig {
            credible_level: Some(0.5),
            ..Default::default()
        });
        let wide = Analyzer::default();

        let narrow_curve = narrow.calibration(&narrow.analyze(&records));
        let wide_curve = wide.calibration(&wide.analyze(&records));
        assert!((narrow_curve.level - 0.5).abs() < f64::EPSILON);
        assert!((wide_curve.level - 0.95).abs() < f64::EPSILON);

        let (nl, nh) = narrow_curve.points[0].interval;
        let (wl, wh) = wide_curve.points[0].interval;
        assert!(nh - nl < wh - wl);
    }

    #[test]
    fn report_renders_nan_as_null() {
        let records = vec![PredictionRecord::new("open question").with_confidence(60.0)];
        let json = analyze(&records).to_json().unwrap();
        assert!(json.contains("\"brier_score\": null"));
    }
}

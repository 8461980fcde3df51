use brier_analysis::classify::{classify, squared_error, Disposition};
use brier_analysis::statistics::StatisticsUnit;
use brier_analysis::{analyze, Analyzer, Filter};
use brier_core::PredictionRecord;
use proptest::prelude::*;

fn arb_record() -> impl Strategy<Value = PredictionRecord> {
    (
        prop::option::of(0.0f64..=100.0),
        prop::option::of(any::<bool>()),
        prop::option::of("[a-z ]{0,8}"),
        prop::collection::vec(prop::sample::select(vec!["a", "b", "c"]), 0..3),
        prop::bool::weighted(0.9),
    )
        .prop_map(|(confidence, outcome, cause, tags, has_claim)| {
            let mut r = PredictionRecord::new(if has_claim { "claim" } else { "" }).with_tags(tags);
            r.confidence = confidence;
            r.outcome = outcome;
            r.exclusion_cause = cause;
            r
        })
}

proptest! {
    #[test]
    fn close_confidences_join_one_level(
        base in 1.0f64..99.0,
        offsets in prop::collection::vec(0.0f64..0.03, 1..20),
    ) {
        // Confidences packed within a few epsilons of each other.
        let records: Vec<PredictionRecord> = offsets
            .iter()
            .map(|o| PredictionRecord::new("x").with_confidence(base + o).with_outcome(true))
            .collect();
        let analysis = analyze(&records);
        let leveled: usize = analysis.by_confidence.iter().map(|g| g.group.len()).sum();
        prop_assert_eq!(leveled, records.len());
    }

    #[test]
    fn missing_claim_or_confidence_is_unscorable(
        confidence in prop::option::of(0.0f64..=100.0),
        outcome in prop::option::of(any::<bool>()),
    ) {
        let mut no_claim = PredictionRecord::new("");
        no_claim.confidence = confidence;
        no_claim.outcome = outcome;
        prop_assert_eq!(classify(&no_claim).disposition, Disposition::Unscorable);

        let mut no_confidence = PredictionRecord::new("x");
        no_confidence.outcome = outcome;
        let c = classify(&no_confidence);
        prop_assert_eq!(c.disposition, Disposition::Unscorable);
        prop_assert!(c.squared_error.is_none());
    }

    #[test]
    fn squared_error_matches_formula(confidence in 0.0f64..=100.0, happened in any::<bool>()) {
        let r = PredictionRecord::new("x").with_confidence(confidence).with_outcome(happened);
        let c = classify(&r);
        let o = if happened { 1.0 } else { 0.0 };
        let expected = (confidence / 100.0 - o).powi(2);
        prop_assert!((c.squared_error.unwrap() - expected).abs() < 1e-12);
        prop_assert!((0.0..=1.0).contains(&c.squared_error.unwrap()));
    }

    #[test]
    fn totals_partition(records in prop::collection::vec(arb_record(), 0..60)) {
        let analysis = analyze(&records);
        let unit = &analysis.everything.unit;
        prop_assert_eq!(unit.total(), records.len());
        prop_assert_eq!(unit.total(), unit.scored() + unit.unscored() + unit.unscorable);
        prop_assert_eq!(unit.count(), unit.scored());

        for g in &analysis.by_tag {
            prop_assert_eq!(g.group.unit.total(), g.group.len());
        }
        for g in &analysis.by_confidence {
            prop_assert_eq!(g.group.unit.total(), g.group.len());
        }
        let with_confidence = records.iter().filter(|r| r.confidence.is_some()).count();
        let leveled: usize = analysis.by_confidence.iter().map(|g| g.group.unit.total()).sum();
        prop_assert_eq!(leveled, with_confidence);

        let keyed: usize = analysis.by_key.iter().map(|g| g.group.unit.total()).sum();
        prop_assert_eq!(keyed, records.len());
    }

    #[test]
    fn tag_groups_match_filter(records in prop::collection::vec(arb_record(), 0..40)) {
        let analysis = analyze(&records);
        for g in &analysis.by_tag {
            let filtered = Analyzer::default().only(&records, &Filter::matching_tag(g.key.clone()));
            prop_assert_eq!(&filtered.members, &g.group.members);
            prop_assert_eq!(filtered.unit.total(), g.group.unit.total());
        }
    }

    #[test]
    fn identical_errors_average_to_themselves(
        probability in 0.0f64..=1.0,
        happened in any::<bool>(),
        n in 1usize..50,
    ) {
        let mut unit = StatisticsUnit::new("same");
        for _ in 0..n {
            unit.add(probability, happened);
        }
        let expected = squared_error(probability, happened);
        prop_assert!((unit.brier_score() - expected).abs() < 1e-9);
    }
}

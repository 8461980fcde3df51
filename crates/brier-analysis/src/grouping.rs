//! Grouping engine: partitions records and aggregates each partition.
//!
//! Groups hold indices into the caller's record slice; records are never
//! copied or modified. Every enumeration is in first-seen order,
//! deduplicated, with no sorting.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use serde::Serialize;

use brier_core::constants::CONFIDENCE_SCALE;
use brier_core::{GroupKey, PredictionRecord, ScoringPolicy};

use crate::classify::classify_with;
use crate::filter::RecordFilter;
use crate::statistics::StatisticsUnit;

/// A group's statistics plus the indices of the records in it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnalyzedRecords {
    pub unit: StatisticsUnit,
    /// Indices into the analyzed record slice, in input order.
    pub members: Vec<usize>,
}

impl AnalyzedRecords {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// The member records, resolved against the slice that was analyzed.
    pub fn records<'a>(
        &'a self,
        records: &'a [PredictionRecord],
    ) -> impl Iterator<Item = &'a PredictionRecord> + 'a {
        self.members.iter().filter_map(move |&i| records.get(i))
    }

    /// The confidence (0–100 scale) shared by every member that has one.
    ///
    /// `None` when no member has a confidence or when two differ by more
    /// than `epsilon` on the normalized scale.
    pub fn common_confidence(&self, records: &[PredictionRecord], epsilon: f64) -> Option<f64> {
        let mut shared: Option<f64> = None;
        for record in self.records(records) {
            let Some(confidence) = record.confidence else {
                continue;
            };
            match shared {
                None => shared = Some(confidence),
                Some(first) => {
                    if (confidence - first).abs() / CONFIDENCE_SCALE > epsilon {
                        return None;
                    }
                }
            }
        }
        shared
    }
}

/// Partition records by the keys `key_fn` yields for each.
///
/// A record yielding several keys lands in several groups; one yielding none
/// lands in no group. Groups come back in order of first key appearance.
pub fn group_by<K, I, F>(records: &[PredictionRecord], key_fn: F) -> Vec<(K, Vec<usize>)>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = K>,
    F: Fn(&PredictionRecord) -> I,
{
    let mut slots: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, Vec<usize>)> = Vec::new();

    for (index, record) in records.iter().enumerate() {
        for key in key_fn(record) {
            let slot = *slots.entry(key.clone()).or_insert_with(|| {
                groups.push((key, Vec::new()));
                groups.len() - 1
            });
            let members = &mut groups[slot].1;
            // Repeated keys on one record (duplicate tags) count once.
            if members.last() != Some(&index) {
                members.push(index);
            }
        }
    }

    groups
}

/// Indices of the records `filter` keeps.
pub fn select<F>(records: &[PredictionRecord], filter: &F) -> Vec<usize>
where
    F: RecordFilter + ?Sized,
{
    records
        .iter()
        .enumerate()
        .filter(|(_, r)| filter.matches(r))
        .map(|(i, _)| i)
        .collect()
}

/// Every tag used, in first-seen order.
pub fn tags_used(records: &[PredictionRecord]) -> Vec<String> {
    dedup_first_seen(records.iter().flat_map(|r| r.tags.iter().cloned()))
}

/// Every group key used, in first-seen order. The empty key counts.
pub fn keys_used(records: &[PredictionRecord]) -> Vec<GroupKey> {
    dedup_first_seen(records.iter().map(|r| r.group_key.clone()))
}

/// Every normalized confidence level used, in first-seen order.
///
/// Levels within `epsilon` of an earlier level are folded into it. Records
/// without a confidence contribute nothing.
pub fn confidences_used(records: &[PredictionRecord], epsilon: f64) -> Vec<f64> {
    let mut levels: Vec<f64> = Vec::new();
    for probability in records.iter().filter_map(PredictionRecord::probability) {
        if !levels.iter().any(|l| (l - probability).abs() <= epsilon) {
            levels.push(probability);
        }
    }
    levels
}

/// Partition the records that have a confidence by confidence level.
///
/// Levels are the ones [`confidences_used`] yields. Each record joins the
/// first level within `epsilon` of its own confidence, so no record lands in
/// two levels even when the levels themselves sit within `2 * epsilon`.
pub fn group_by_confidence(records: &[PredictionRecord], epsilon: f64) -> Vec<(f64, Vec<usize>)> {
    let mut groups: Vec<(f64, Vec<usize>)> = Vec::new();
    for (index, record) in records.iter().enumerate() {
        let Some(probability) = record.probability() else {
            continue;
        };
        match groups
            .iter_mut()
            .find(|(level, _)| (*level - probability).abs() <= epsilon)
        {
            Some((_, members)) => members.push(index),
            None => groups.push((probability, vec![index])),
        }
    }
    groups
}

/// Classify and aggregate the given members into one titled group.
///
/// Panics if the resulting unit's samples disagree with its scored tally.
pub fn aggregate(
    records: &[PredictionRecord],
    members: Vec<usize>,
    title: impl Into<String>,
    policy: ScoringPolicy,
    epsilon: f64,
) -> AnalyzedRecords {
    let mut unit = StatisticsUnit::new(title);
    for record in members.iter().filter_map(|&i| records.get(i)) {
        let classification = classify_with(record, policy, epsilon);
        unit.record(record, &classification);
    }
    unit.check_invariant();

    tracing::debug!(
        group = %unit.title,
        members = members.len(),
        scored = unit.scored(),
        brier_score = unit.brier_score(),
        "aggregated group"
    );

    AnalyzedRecords { unit, members }
}

/// Aggregate only the records `filter` keeps.
pub fn only<F>(
    records: &[PredictionRecord],
    filter: &F,
    policy: ScoringPolicy,
    epsilon: f64,
) -> AnalyzedRecords
where
    F: RecordFilter + ?Sized,
{
    aggregate(records, select(records, filter), "", policy, epsilon)
}

fn dedup_first_seen<T, I>(items: I) -> Vec<T>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

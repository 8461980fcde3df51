//! Prediction records and the key identifying where they came from.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::CONFIDENCE_SCALE;

/// Identity of the collection a record came from.
///
/// Built from a title and scope. The empty key is valid and means the record
/// has no parent collection.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct GroupKey(String);

impl GroupKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The "no parent" key.
    pub fn none() -> Self {
        Self(String::new())
    }

    /// Join the non-empty parts of a title and scope with a single space.
    pub fn from_title_and_scope(title: &str, scope: &str) -> Self {
        let parts: Vec<&str> = [title.trim(), scope.trim()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect();
        Self(parts.join(" "))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for the "no parent" key.
    pub fn is_none(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GroupKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for GroupKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// One forecast: a claim, how confident the predictor was, and what happened.
///
/// `confidence` is on the 0–100 scale. A missing confidence is not zero and
/// a missing outcome is not `false`; both mean "unknown".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictionRecord {
    /// What is predicted. Empty means the record cannot be scored.
    pub claim: String,
    /// Forecast probability on the 0–100 scale.
    pub confidence: Option<f64>,
    /// `None` until resolved, then whether the claim came true.
    pub outcome: Option<bool>,
    /// Why this record is deliberately left out of scoring.
    pub exclusion_cause: Option<String>,
    /// Labels in display order.
    pub tags: Vec<String>,
    /// The collection this record belongs to.
    pub group_key: GroupKey,
    /// Free-form notes. Never read by scoring or grouping.
    pub notes: Option<String>,
}

impl PredictionRecord {
    pub fn new(claim: impl Into<String>) -> Self {
        Self {
            claim: claim.into(),
            ..Default::default()
        }
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }

    pub fn with_outcome(mut self, happened: bool) -> Self {
        self.outcome = Some(happened);
        self
    }

    pub fn with_exclusion_cause(mut self, cause: impl Into<String>) -> Self {
        self.exclusion_cause = Some(cause.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_group_key(mut self, key: impl Into<GroupKey>) -> Self {
        self.group_key = key.into();
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn has_claim(&self) -> bool {
        !self.claim.is_empty()
    }

    /// Confidence normalized to [0, 1], if present.
    pub fn probability(&self) -> Option<f64> {
        self.confidence.map(|c| c / CONFIDENCE_SCALE)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// True when an exclusion cause is present and not blank.
    pub fn has_exclusion_cause(&self) -> bool {
        self.exclusion_cause
            .as_deref()
            .is_some_and(|cause| !cause.trim().is_empty())
    }
}

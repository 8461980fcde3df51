//! Record filters: predicates selecting which records a group holds.
//!
//! [`RecordFilter`] is the seam: the built-in [`Filter`] variants implement
//! it, and so does any `Fn(&PredictionRecord) -> bool`, so ad hoc queries
//! need no new types.

use brier_core::{GroupKey, PredictionRecord};

/// Selects records. A record is kept when `matches` returns true.
pub trait RecordFilter {
    fn matches(&self, record: &PredictionRecord) -> bool;
}

impl<F> RecordFilter for F
where
    F: Fn(&PredictionRecord) -> bool,
{
    fn matches(&self, record: &PredictionRecord) -> bool {
        self(record)
    }
}

/// Built-in filters plus combinators.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Keeps every record.
    Everything,
    /// Keeps records carrying this tag.
    MatchingTag(String),
    /// Keeps records from this source collection.
    MatchingKey(GroupKey),
    /// Keeps records whose normalized confidence is within `epsilon` of `probability`.
    /// Records without a confidence never match.
    MatchingConfidence { probability: f64, epsilon: f64 },
    /// Keeps records every inner filter keeps. Empty keeps everything.
    All(Vec<Filter>),
    /// Keeps records any inner filter keeps. Empty keeps nothing.
    Any(Vec<Filter>),
    Not(Box<Filter>),
}

impl Filter {
    pub fn matching_tag(tag: impl Into<String>) -> Self {
        Self::MatchingTag(tag.into())
    }

    pub fn matching_key(key: impl Into<GroupKey>) -> Self {
        Self::MatchingKey(key.into())
    }

    pub fn matching_confidence(probability: f64, epsilon: f64) -> Self {
        Self::MatchingConfidence {
            probability,
            epsilon,
        }
    }

    pub fn and(self, other: Filter) -> Self {
        match self {
            Self::All(mut filters) => {
                filters.push(other);
                Self::All(filters)
            }
            first => Self::All(vec![first, other]),
        }
    }

    pub fn or(self, other: Filter) -> Self {
        match self {
            Self::Any(mut filters) => {
                filters.push(other);
                Self::Any(filters)
            }
            first => Self::Any(vec![first, other]),
        }
    }

    pub fn negate(self) -> Self {
        Self::Not(Box::new(self))
    }
}

impl RecordFilter for Filter {
    fn matches(&self, record: &PredictionRecord) -> bool {
        match self {
            Self::Everything => true,
            Self::MatchingTag(tag) => record.has_tag(tag),
            Self::MatchingKey(key) => &record.group_key == key,
            Self::MatchingConfidence {
                probability,
                epsilon,
            } => record
                .probability()
                .is_some_and(|p| (p - probability).abs() <= *epsilon),
            Self::All(filters) => filters.iter().all(|f| f.matches(record)),
            Self::Any(filters) => filters.iter().any(|f| f.matches(record)),
            Self::Not(inner) => !inner.matches(record),
        }
    }
}

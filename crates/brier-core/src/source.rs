//! Sources: one originating collection of prediction records.
//!
//! A source is what a predictions file becomes once an external reader has
//! parsed it: a metadata header plus the records that follow. Reading and
//! parsing files is not done here.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::record::{GroupKey, PredictionRecord};

/// Header describing the records in a [`Source`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceMetadata {
    pub title: String,
    pub scope: String,
    pub notes: Option<String>,
}

impl SourceMetadata {
    pub fn new(title: impl Into<String>, scope: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            scope: scope.into(),
            notes: None,
        }
    }

    pub fn group_key(&self) -> GroupKey {
        GroupKey::from_title_and_scope(&self.title, &self.scope)
    }

    pub fn has_title_or_scope(&self) -> bool {
        !self.title.trim().is_empty() || !self.scope.trim().is_empty()
    }

    /// Human-readable heading: `title: scope`, or whichever part is present.
    pub fn display_title(&self) -> String {
        let title = self.title.trim();
        let scope = self.scope.trim();
        match (title.is_empty(), scope.is_empty()) {
            (false, false) => format!("{title}: {scope}"),
            (false, true) => title.to_string(),
            (true, false) => scope.to_string(),
            (true, true) => String::new(),
        }
    }
}

/// A metadata header and the ordered records beneath it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Source {
    pub filename: Option<PathBuf>,
    pub metadata: SourceMetadata,
    pub records: Vec<PredictionRecord>,
}

impl Source {
    /// Build a source, stamping every record with the metadata's group key.
    pub fn new(metadata: SourceMetadata, records: Vec<PredictionRecord>) -> Self {
        let key = metadata.group_key();
        let records = records
            .into_iter()
            .map(|mut r| {
                r.group_key = key.clone();
                r
            })
            .collect();
        Self {
            filename: None,
            metadata,
            records,
        }
    }

    pub fn with_filename(mut self, filename: impl AsRef<Path>) -> Self {
        self.filename = Some(filename.as_ref().to_path_buf());
        self
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Filename for diagnostics, or `None` for in-memory sources.
    pub fn origin(&self) -> Option<String> {
        self.filename.as_ref().map(|p| p.display().to_string())
    }
}

/// Concatenate the records of every source, in source order.
pub fn flatten(sources: &[Source]) -> Vec<PredictionRecord> {
    sources
        .iter()
        .flat_map(|s| s.records.iter().cloned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_stamps_group_key() {
        let source = Source::new(
            SourceMetadata::new("Life", "2019"),
            vec![
                PredictionRecord::new("a").with_group_key("stale"),
                PredictionRecord::new("b"),
            ],
        );
        assert!(source.records.iter().all(|r| r.group_key.as_str() == "Life 2019"));
    }

    #[test]
    fn display_title_variants() {
        assert_eq!(SourceMetadata::new("Life", "2019").display_title(), "Life: 2019");
        assert_eq!(SourceMetadata::new("", "today").display_title(), "today");
        assert_eq!(SourceMetadata::new("Life", "").display_title(), "Life");
        assert!(!SourceMetadata::default().has_title_or_scope());
    }

    #[test]
    fn flatten_keeps_order() {
        let a = Source::new(SourceMetadata::new("A", ""), vec![PredictionRecord::new("1")]);
        let b = Source::new(
            SourceMetadata::new("B", ""),
            vec![PredictionRecord::new("2"), PredictionRecord::new("3")],
        );
        let claims: Vec<String> = flatten(&[a, b]).into_iter().map(|r| r.claim).collect();
        assert_eq!(claims, ["1", "2", "3"]);
    }
}

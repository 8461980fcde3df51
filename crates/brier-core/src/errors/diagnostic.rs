//! Validation diagnostics: located findings about malformed records.
//!
//! A diagnostic names the rule that fired, how serious it is, and enough
//! context (filename plus nearby claim text) to find the offending record
//! among hundreds without rereading the whole file.

use serde::Serialize;

use super::error_code::{self, BrierErrorCode};

/// How serious a finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    pub fn is_error(self) -> bool {
        matches!(self, Self::Error)
    }
}

/// One finding from a validation rule.
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[error("{}[{id}]: {message}", location_prefix(.origin))]
pub struct Diagnostic {
    /// Rule identifier, e.g. `error.claim.missing`.
    pub id: &'static str,
    pub severity: Severity,
    /// Filename of the source, when known.
    pub origin: Option<String>,
    /// Index of the record within its source, when the finding is about one.
    pub index: Option<usize>,
    pub message: String,
}

fn location_prefix(origin: &Option<String>) -> String {
    match origin {
        Some(name) if !name.is_empty() => format!("{name}: "),
        _ => String::new(),
    }
}

impl BrierErrorCode for Diagnostic {
    fn error_code(&self) -> &'static str {
        match self.severity {
            Severity::Error => error_code::VALIDATION_ERROR,
            Severity::Warning => error_code::VALIDATION_WARNING,
        }
    }
}

/// A source failed validation with at least one error-severity diagnostic.
#[derive(Debug, thiserror::Error)]
#[error("{count} validation error(s) in {origin}; first: {first}")]
pub struct ValidationError {
    pub origin: String,
    pub count: usize,
    pub first: String,
    pub diagnostics: Vec<Diagnostic>,
}

impl ValidationError {
    /// Collect the error-severity diagnostics, or `None` if there are none.
    pub fn from_diagnostics(origin: impl Into<String>, diagnostics: &[Diagnostic]) -> Option<Self> {
        let errors: Vec<Diagnostic> = diagnostics
            .iter()
            .filter(|d| d.severity.is_error())
            .cloned()
            .collect();
        let first = errors.first()?.to_string();
        Some(Self {
            origin: origin.into(),
            count: errors.len(),
            first,
            diagnostics: errors,
        })
    }
}

impl BrierErrorCode for ValidationError {
    fn error_code(&self) -> &'static str {
        error_code::VALIDATION_ERROR
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diag(severity: Severity, origin: Option<&str>) -> Diagnostic {
        Diagnostic {
            id: "error.claim.missing",
            severity,
            origin: origin.map(str::to_string),
            index: Some(0),
            message: "first prediction has no claim".to_string(),
        }
    }

    #[test]
    fn display_includes_filename_and_id() {
        let d = diag(Severity::Error, Some("life.yaml"));
        assert_eq!(
            d.to_string(),
            "life.yaml: [error.claim.missing]: first prediction has no claim"
        );
        assert_eq!(
            diag(Severity::Error, None).to_string(),
            "[error.claim.missing]: first prediction has no claim"
        );
    }

    #[test]
    fn warnings_alone_do_not_fail() {
        let ds = vec![diag(Severity::Warning, None)];
        assert!(ValidationError::from_diagnostics("<memory>", &ds).is_none());
    }

    #[test]
    fn errors_are_collected() {
        let ds = vec![diag(Severity::Warning, None), diag(Severity::Error, Some("a.yaml"))];
        let err = ValidationError::from_diagnostics("a.yaml", &ds).unwrap();
        assert_eq!(err.count, 1);
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
        assert!(err.to_string().contains("a.yaml: [error.claim.missing]"));
    }
}

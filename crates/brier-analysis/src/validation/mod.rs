//! Validation: sanity checks over sources before they are analyzed.
//!
//! Many things can be wrong in one file at once and a user wants to hear
//! about all of them, so rules return every finding rather than stopping at
//! the first. Each finding is located by filename and nearby claim text.

pub mod locate;
pub mod rules;

use brier_core::{Diagnostic, Source, ValidationConfig, ValidationError};

pub use rules::{
    ClaimsPresent, ConfidencesInRange, ConfidencesPresent, ConfidencesSensible,
    OutcomesHaveConfidence, TitleOrScopePresent,
};

/// A single check over a source.
pub trait ValidationRule: Send + Sync {
    /// The rule's diagnostic id prefix, e.g. `error.claim.missing`.
    fn id(&self) -> &'static str;
    fn check(&self, source: &Source) -> Vec<Diagnostic>;
}

/// Runs validation rules over sources.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Run the given rules, concatenating their findings in rule order.
    pub fn run(&self, source: &Source, rules: &[&dyn ValidationRule]) -> Vec<Diagnostic> {
        let diagnostics: Vec<Diagnostic> = rules.iter().flat_map(|r| r.check(source)).collect();
        let origin = source.origin();
        tracing::debug!(
            origin = origin.as_deref().unwrap_or("<memory>"),
            rules = rules.len(),
            findings = diagnostics.len(),
            "validated source"
        );
        diagnostics
    }

    /// The bare minimum: every record has a claim and a confidence.
    pub fn run_minimal(&self, source: &Source) -> Vec<Diagnostic> {
        let rules: [&dyn ValidationRule; 2] = [&ClaimsPresent, &ConfidencesPresent];
        self.run(source, &rules)
    }

    /// Every known rule, minus any the configuration turns off.
    pub fn run_all(&self, source: &Source) -> Vec<Diagnostic> {
        let mut rules: Vec<&dyn ValidationRule> = Vec::new();
        if self.config.effective_require_title_or_scope() {
            rules.push(&TitleOrScopePresent);
        }
        rules.push(&ClaimsPresent);
        rules.push(&ConfidencesPresent);
        rules.push(&ConfidencesInRange);
        if self.config.effective_warn_on_certainty() {
            rules.push(&ConfidencesSensible);
        }
        rules.push(&OutcomesHaveConfidence);
        self.run(source, &rules)
    }

    /// Run every rule over every source.
    pub fn run_all_sources(&self, sources: &[Source]) -> Vec<Diagnostic> {
        sources.iter().flat_map(|s| self.run_all(s)).collect()
    }

    /// Run every rule; fail if any finding is an error, otherwise return the warnings.
    pub fn ensure_valid(&self, source: &Source) -> Result<Vec<Diagnostic>, ValidationError> {
        let diagnostics = self.run_all(source);
        let origin = source.origin().unwrap_or_else(|| "<memory>".to_string());
        match ValidationError::from_diagnostics(origin, &diagnostics) {
            Some(err) => Err(err),
            None => Ok(diagnostics),
        }
    }
}

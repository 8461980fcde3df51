//! Validation configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the record validation rules.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ValidationConfig {
    /// Warn about confidences of exactly 0% or 100%. Default: true.
    pub warn_on_certainty: Option<bool>,
    /// Require a title or scope in every source's metadata. Default: true.
    pub require_title_or_scope: Option<bool>,
}

impl ValidationConfig {
    pub fn effective_warn_on_certainty(&self) -> bool {
        self.warn_on_certainty.unwrap_or(true)
    }

    pub fn effective_require_title_or_scope(&self) -> bool {
        self.require_title_or_scope.unwrap_or(true)
    }
}

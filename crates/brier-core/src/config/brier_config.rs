//! Top-level Brier configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{AnalysisConfig, ScoringPolicy, ValidationConfig};
use crate::constants::PROJECT_CONFIG_FILENAME;
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`BRIER_*`)
/// 3. Project config (`brier.toml` in project root)
/// 4. User config (`~/.brier/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BrierConfig {
    pub analysis: AnalysisConfig,
    pub validation: ValidationConfig,
}

/// Overrides a command-line front end may apply on top of everything else.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub scoring_policy: Option<ScoringPolicy>,
    pub confidence_epsilon: Option<f64>,
    pub sort_tags: Option<bool>,
}

impl BrierConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // User config (lowest priority). Unreadable files are skipped, bad TOML is not.
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        tracing::warn!(path = %user_config_path.display(), error = %e, "skipping user config");
                    }
                }
            }
        }

        let project_config_path = root.join(PROJECT_CONFIG_FILENAME);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config);

        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &BrierConfig) -> Result<(), ConfigError> {
        if let Some(epsilon) = config.analysis.confidence_epsilon {
            if !(epsilon > 0.0 && epsilon < 1.0) {
                return Err(ConfigError::ValidationFailed {
                    field: "analysis.confidence_epsilon".to_string(),
                    message: "must be greater than 0.0 and less than 1.0".to_string(),
                });
            }
        }
        if let Some(level) = config.analysis.credible_level {
            if !(level > 0.0 && level < 1.0) {
                return Err(ConfigError::ValidationFailed {
                    field: "analysis.credible_level".to_string(),
                    message: "must be greater than 0.0 and less than 1.0".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Returns the user config path: `~/.brier/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(".brier").join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are ignored.
    fn merge_toml_file(config: &mut BrierConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: BrierConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; only `Some` values in `other` win.
    fn merge(base: &mut BrierConfig, other: &BrierConfig) {
        if other.analysis.confidence_epsilon.is_some() {
            base.analysis.confidence_epsilon = other.analysis.confidence_epsilon;
        }
        if other.analysis.scoring_policy.is_some() {
            base.analysis.scoring_policy = other.analysis.scoring_policy;
        }
        if other.analysis.credible_level.is_some() {
            base.analysis.credible_level = other.analysis.credible_level;
        }
        if other.analysis.sort_tags.is_some() {
            base.analysis.sort_tags = other.analysis.sort_tags;
        }
        if other.analysis.parallel.is_some() {
            base.analysis.parallel = other.analysis.parallel;
        }

        if other.validation.warn_on_certainty.is_some() {
            base.validation.warn_on_certainty = other.validation.warn_on_certainty;
        }
        if other.validation.require_title_or_scope.is_some() {
            base.validation.require_title_or_scope = other.validation.require_title_or_scope;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `BRIER_ANALYSIS_CONFIDENCE_EPSILON`, `BRIER_ANALYSIS_SCORING_POLICY`, etc.
    fn apply_env_overrides(config: &mut BrierConfig) {
        if let Ok(val) = std::env::var("BRIER_ANALYSIS_CONFIDENCE_EPSILON") {
            if let Ok(v) = val.parse::<f64>() {
                config.analysis.confidence_epsilon = Some(v);
            }
        }
        if let Ok(val) = std::env::var("BRIER_ANALYSIS_SCORING_POLICY") {
            match val.parse::<ScoringPolicy>() {
                Ok(v) => config.analysis.scoring_policy = Some(v),
                Err(e) => tracing::warn!(error = %e, "ignoring BRIER_ANALYSIS_SCORING_POLICY"),
            }
        }
        if let Ok(val) = std::env::var("BRIER_ANALYSIS_CREDIBLE_LEVEL") {
            if let Ok(v) = val.parse::<f64>() {
                config.analysis.credible_level = Some(v);
            }
        }
        if let Ok(val) = std::env::var("BRIER_VALIDATION_WARN_ON_CERTAINTY") {
            if let Ok(v) = val.parse::<bool>() {
                config.validation.warn_on_certainty = Some(v);
            }
        }
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut BrierConfig, cli: &CliOverrides) {
        if let Some(v) = cli.scoring_policy {
            config.analysis.scoring_policy = Some(v);
        }
        if let Some(v) = cli.confidence_epsilon {
            config.analysis.confidence_epsilon = Some(v);
        }
        if let Some(v) = cli.sort_tags {
            config.analysis.sort_tags = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}

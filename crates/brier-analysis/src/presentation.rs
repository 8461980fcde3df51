//! Per-record labels and number formatting for renderers.
//!
//! Renderers (HTML, terminal, whatever) live outside this crate. They get a
//! CSS-ish class, a short message, and a sentence explaining why a record
//! landed where it did.

use serde::Serialize;

use brier_core::PredictionRecord;

use crate::classify::{Classification, Disposition, Verdict};

/// Shown in place of an undefined statistic.
pub const NO_DATA: &str = "no data";

/// Display strings for one classified record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResultLabel {
    pub class: &'static str,
    pub message: &'static str,
    pub explanation: &'static str,
}

impl ResultLabel {
    const fn new(class: &'static str, message: &'static str, explanation: &'static str) -> Self {
        Self {
            class,
            message,
            explanation,
        }
    }
}

/// The label for a classification.
pub fn label(classification: &Classification) -> ResultLabel {
    if let Some(verdict) = classification.verdict {
        return verdict_label(verdict);
    }
    match classification.disposition {
        Disposition::Unscorable => ResultLabel::new(
            "unscorable",
            "unscorable",
            "it has no claim or no confidence level, so it cannot be scored",
        ),
        Disposition::Ongoing => ResultLabel::new(
            "ongoing",
            "ongoing",
            "it’s too soon to say whether this has happened or not",
        ),
        Disposition::Excluded => ResultLabel::new(
            "excluded",
            "excluded",
            "this prediction was deliberately excluded from consideration",
        ),
        Disposition::Resolved => ResultLabel::new(
            "resolved",
            "resolved",
            "whatever was predicted has come to pass, but if your prediction was that it had a \
             50/50 chance of happening, nobody can really say if your prediction was correct",
        ),
        Disposition::Called => {
            ResultLabel::new("called", "called it", "whatever was predicted has come to pass")
        }
        Disposition::Missed => {
            ResultLabel::new("missed", "missed it", "whatever was predicted did not come to pass")
        }
    }
}

fn verdict_label(verdict: Verdict) -> ResultLabel {
    match verdict {
        Verdict::TruePositive => ResultLabel::new(
            "true-positive",
            "called it",
            "you said this would happen, and it did",
        ),
        Verdict::TrueNegative => ResultLabel::new(
            "true-negative",
            "called it",
            "you said this wouldn’t happen, and it didn’t",
        ),
        Verdict::FalsePositive => ResultLabel::new(
            "false-positive",
            "missed it",
            "you said this would happen, but it didn’t",
        ),
        Verdict::FalseNegative => ResultLabel::new(
            "false-negative",
            "missed it",
            "you said this wouldn’t happen, but it did anyway",
        ),
    }
}

/// "“claim” is here because …", for tooltips and detail views.
pub fn explain(record: &PredictionRecord, classification: &Classification) -> String {
    format!(
        "“{}” is here because {}.",
        record.claim,
        label(classification).explanation
    )
}

/// Format a statistic to `decimals` places, or [`NO_DATA`] when undefined.
pub fn format_statistic(value: f64, decimals: usize) -> String {
    if value.is_nan() {
        NO_DATA.to_string()
    } else {
        format!("{value:.decimals$}")
    }
}

/// Like [`format_statistic`] with a trailing percent sign.
pub fn format_percentage(value: f64, decimals: usize) -> String {
    if value.is_nan() {
        NO_DATA.to_string()
    } else {
        format!("{value:.decimals$}%")
    }
}

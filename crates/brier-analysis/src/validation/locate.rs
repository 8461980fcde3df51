//! Diagnostic construction with record locations.
//!
//! A record is pointed at by its own claim when it has one, otherwise by the
//! claim of the record before it.

use brier_core::{Diagnostic, Severity, Source};

/// A finding about the source as a whole.
pub fn about_source(source: &Source, id: &'static str, severity: Severity, message: &str) -> Diagnostic {
    Diagnostic {
        id,
        severity,
        origin: source.origin(),
        index: None,
        message: message.to_string(),
    }
}

/// A finding about the record at `index`. `predicate` completes the sentence
/// "prediction … {predicate}", e.g. "has no confidence level specified".
pub fn about_record(
    source: &Source,
    index: usize,
    id: &'static str,
    severity: Severity,
    predicate: &str,
) -> Diagnostic {
    let claim = claim_at(source, index);
    let previous = previous_claim(source, index);

    let message = match (index, claim, previous) {
        (0, "", _) => format!("first prediction {predicate}"),
        (0, claim, _) => format!("first prediction, with claim “{claim}”, {predicate}"),
        (_, "", "") => {
            format!("prediction exists that {predicate}; neither it nor its predecessor have a claim")
        }
        (_, "", previous) => {
            format!("prediction after prediction with claim “{previous}” {predicate}")
        }
        (_, claim, _) => format!("prediction with claim “{claim}” {predicate}"),
    };

    Diagnostic {
        id,
        severity,
        origin: source.origin(),
        index: Some(index),
        message,
    }
}

/// A record without a claim can only be located by its neighbor.
pub fn missing_claim(source: &Source, index: usize, id: &'static str) -> Diagnostic {
    let message = match (index, previous_claim(source, index)) {
        (0, _) => "first prediction has no claim".to_string(),
        (_, "") => {
            "prediction exists that has no claim, and neither does the one before it".to_string()
        }
        (_, previous) => format!("prediction after “{previous}” has no claim"),
    };

    Diagnostic {
        id,
        severity: Severity::Error,
        origin: source.origin(),
        index: Some(index),
        message,
    }
}

fn claim_at(source: &Source, index: usize) -> &str {
    source
        .records
        .get(index)
        .map(|r| r.claim.as_str())
        .unwrap_or("")
}

fn previous_claim(source: &Source, index: usize) -> &str {
    match index.checked_sub(1) {
        Some(prev) => claim_at(source, prev),
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brier_core::{PredictionRecord, SourceMetadata};

    fn source(claims: &[&str]) -> Source {
        Source::new(
            SourceMetadata::new("Life", "2019"),
            claims.iter().map(|c| PredictionRecord::new(*c)).collect(),
        )
        .with_filename("life.yaml")
    }

    #[test]
    fn located_by_own_claim() {
        let s = source(&["a", "b"]);
        let d = about_record(&s, 1, "error.confidence.missing", Severity::Error, "has no confidence level specified");
        assert_eq!(
            d.to_string(),
            "life.yaml: [error.confidence.missing]: prediction with claim “b” has no confidence level specified"
        );
        assert_eq!(d.index, Some(1));
    }

    #[test]
    fn located_by_previous_claim() {
        let s = source(&["a", ""]);
        let d = about_record(&s, 1, "x", Severity::Warning, "is odd");
        assert_eq!(d.message, "prediction after prediction with claim “a” is odd");
    }

    #[test]
    fn first_and_unlocatable() {
        let s = source(&["a", "", ""]);
        assert_eq!(
            about_record(&s, 0, "x", Severity::Error, "is odd").message,
            "first prediction, with claim “a”, is odd"
        );
        assert_eq!(
            about_record(&s, 2, "x", Severity::Error, "is odd").message,
            "prediction exists that is odd; neither it nor its predecessor have a claim"
        );
    }

    #[test]
    fn missing_claim_messages() {
        let s = source(&["", "a", "", ""]);
        assert_eq!(missing_claim(&s, 0, "e").message, "first prediction has no claim");
        assert_eq!(missing_claim(&s, 2, "e").message, "prediction after “a” has no claim");
        assert_eq!(
            missing_claim(&s, 3, "e").message,
            "prediction exists that has no claim, and neither does the one before it"
        );
    }
}

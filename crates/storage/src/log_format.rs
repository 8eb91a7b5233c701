//! Line format of the result log: one self-contained JSON object per line.

use quiz_core::model::SessionOutcome;
use tracing::warn;

use crate::repository::StorageError;

/// Encode an outcome as a single log line (no trailing newline).
///
/// # Errors
///
/// Returns `StorageError::Serialization` if the outcome cannot be encoded.
pub fn encode_outcome(outcome: &SessionOutcome) -> Result<String, StorageError> {
    serde_json::to_string(outcome).map_err(|e| StorageError::Serialization(e.to_string()))
}

/// Parse the last non-blank line of the log.
///
/// Returns `None` for an empty log or a malformed last record; earlier records
/// are never consulted.
pub fn latest_outcome<'a>(lines: impl DoubleEndedIterator<Item = &'a str>) -> Option<SessionOutcome> {
    let last = lines.map(str::trim).rfind(|line| !line.is_empty())?;
    match serde_json::from_str::<SessionOutcome>(last) {
        Ok(outcome) => Some(outcome),
        Err(err) => {
            warn!(error = %err, "last result log entry is malformed; treating log as empty");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::QuestionId;
    use quiz_core::time::fixed_now;
    use std::collections::BTreeSet;

    fn outcome() -> SessionOutcome {
        SessionOutcome {
            timestamp: fixed_now(),
            score: 1.67,
            total: 3,
            wrong_ids: [QuestionId::new(4)].into_iter().collect(),
            skipped_ids: BTreeSet::new(),
            categories: ["Networking".to_string()].into_iter().collect(),
            elapsed_secs: 12,
        }
    }

    #[test]
    fn encoded_outcome_is_one_line() {
        let line = encode_outcome(&outcome()).unwrap();
        assert!(!line.contains('\n'));
        assert!(line.contains("\"wrong_ids\":[4]"));
    }

    #[test]
    fn trailing_blank_lines_are_ignored() {
        let line = encode_outcome(&outcome()).unwrap();
        let lines = [line.as_str(), "", "   "];
        assert_eq!(latest_outcome(lines.into_iter()), Some(outcome()));
    }

    #[test]
    fn malformed_last_line_hides_earlier_entries() {
        let line = encode_outcome(&outcome()).unwrap();
        let lines = [line.as_str(), "{\"timestamp\": 3"];
        assert_eq!(latest_outcome(lines.into_iter()), None);
    }

    #[test]
    fn missing_optional_fields_default() {
        let parsed = latest_outcome(
            ["{\"timestamp\":\"2023-11-14T22:13:20Z\",\"score\":1.0,\"total\":1}"].into_iter(),
        )
        .unwrap();
        assert!(parsed.recovery_ids().is_empty());
        assert_eq!(parsed.elapsed_secs, 0);
    }
}

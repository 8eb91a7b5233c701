use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unique identifier for a Question
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(u64);

impl QuestionId {
    /// Creates a new `QuestionId`
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying u64 value
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }

    /// Returns the id that follows this one in a monotonically assigned bank.
    #[must_use]
    pub fn next(&self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Debug for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QuestionId({})", self.0)
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error type for parsing ID from string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    raw: String,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse QuestionId from {:?}", self.raw)
    }
}

impl std::error::Error for ParseIdError {}

impl FromStr for QuestionId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(QuestionId::new)
            .map_err(|_| ParseIdError { raw: s.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_id_display() {
        let id = QuestionId::new(42);
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn test_question_id_from_str() {
        let id: QuestionId = " 123 ".parse().unwrap();
        assert_eq!(id, QuestionId::new(123));
    }

    #[test]
    fn test_question_id_from_str_invalid() {
        let result = "not-a-number".parse::<QuestionId>();
        assert!(result.is_err());
    }

    #[test]
    fn next_is_monotonic() {
        assert_eq!(QuestionId::new(7).next(), QuestionId::new(8));
        assert_eq!(QuestionId::new(u64::MAX).next(), QuestionId::new(u64::MAX));
    }

    #[test]
    fn serializes_as_bare_number() {
        let json = serde_json::to_string(&QuestionId::new(9)).unwrap();
        assert_eq!(json, "9");
    }
}

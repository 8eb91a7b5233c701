/// Aggregated view of session progress, rendered above each question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionProgress {
    /// 1-based position of the cursor.
    pub position: usize,
    pub total: usize,
    pub answered: usize,
    pub skipped: usize,
    pub unanswered: usize,
}

impl SessionProgress {
    #[must_use]
    pub fn is_fully_resolved(&self) -> bool {
        self.unanswered == 0
    }
}

use serde::{Deserialize, Serialize};

/// Outcome of a single quiz question.
///
/// Every question starts `Unanswered`; answering (or timing out) settles it
/// to `Correct` or `Incorrect` exactly once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnswerOutcome {
    #[default]
    Unanswered,
    Correct,
    Incorrect,
}

impl AnswerOutcome {
    #[must_use]
    pub fn is_settled(self) -> bool {
        !matches!(self, AnswerOutcome::Unanswered)
    }

    #[must_use]
    pub fn is_correct(self) -> bool {
        matches!(self, AnswerOutcome::Correct)
    }
}

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::AnswerOutcome;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizSummaryError {
    #[error("completed_at is before started_at")]
    InvalidTimeRange,

    #[error("quiz has {unanswered} unanswered questions")]
    Unsettled { unanswered: usize },

    #[error("score ({score}) does not match correct outcomes ({correct})")]
    ScoreMismatch { score: u32, correct: u32 },
}

/// Aggregate result of a completed quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSummary {
    started_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
    total: u32,
    correct: u32,
    incorrect: u32,
}

impl QuizSummary {
    /// Build a summary from the per-question outcome array.
    ///
    /// The caller's running score is cross-checked against the outcomes so a
    /// drifted counter cannot reach the results screen.
    ///
    /// # Errors
    ///
    /// Returns `QuizSummaryError::InvalidTimeRange` if `completed_at` is
    /// before `started_at`.
    /// Returns `QuizSummaryError::Unsettled` if any outcome is still
    /// `Unanswered`.
    /// Returns `QuizSummaryError::ScoreMismatch` if `score` disagrees with
    /// the number of `Correct` outcomes.
    pub fn from_outcomes(
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
        outcomes: &[AnswerOutcome],
        score: u32,
    ) -> Result<Self, QuizSummaryError> {
        if completed_at < started_at {
            return Err(QuizSummaryError::InvalidTimeRange);
        }

        let unanswered = outcomes.iter().filter(|o| !o.is_settled()).count();
        if unanswered > 0 {
            return Err(QuizSummaryError::Unsettled { unanswered });
        }

        let correct = u32::try_from(outcomes.iter().filter(|o| o.is_correct()).count())
            .unwrap_or(u32::MAX);
        if correct != score {
            return Err(QuizSummaryError::ScoreMismatch { score, correct });
        }
        let total = u32::try_from(outcomes.len()).unwrap_or(u32::MAX);

        Ok(Self {
            started_at,
            completed_at,
            total,
            correct,
            incorrect: total - correct,
        })
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn incorrect(&self) -> u32 {
        self.incorrect
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn summary_counts_outcomes() {
        let now = fixed_now();
        let outcomes = [
            AnswerOutcome::Correct,
            AnswerOutcome::Incorrect,
            AnswerOutcome::Correct,
        ];

        let summary = QuizSummary::from_outcomes(now, now, &outcomes, 2).unwrap();

        assert_eq!(summary.total(), 3);
        assert_eq!(summary.correct(), 2);
        assert_eq!(summary.incorrect(), 1);
    }

    #[test]
    fn unanswered_outcome_is_rejected() {
        let now = fixed_now();
        let outcomes = [AnswerOutcome::Correct, AnswerOutcome::Unanswered];

        let err = QuizSummary::from_outcomes(now, now, &outcomes, 1).unwrap_err();
        assert_eq!(err, QuizSummaryError::Unsettled { unanswered: 1 });
    }

    #[test]
    fn drifted_score_is_rejected() {
        let now = fixed_now();
        let outcomes = [AnswerOutcome::Correct, AnswerOutcome::Incorrect];

        let err = QuizSummary::from_outcomes(now, now, &outcomes, 2).unwrap_err();
        assert_eq!(err, QuizSummaryError::ScoreMismatch { score: 2, correct: 1 });
    }

    #[test]
    fn inverted_time_range_is_rejected() {
        let now = fixed_now();
        let earlier = now - chrono::Duration::seconds(30);

        let err = QuizSummary::from_outcomes(now, earlier, &[], 0).unwrap_err();
        assert_eq!(err, QuizSummaryError::InvalidTimeRange);
    }
}

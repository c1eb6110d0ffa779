use chrono::{DateTime, Utc};
use std::fmt;

use quiz_core::model::{AnswerOutcome, Question, QuizSummary};

use super::builder::QUESTIONS_PER_QUIZ;
use super::progress::QuizProgress;
use super::workflow::QuizConfig;
use crate::error::QuizError;

//
// ─── PHASES ────────────────────────────────────────────────────────────────────
//

/// Where the session currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    /// A question is on screen and accepting an answer.
    Active,
    /// The answer is shown; buttons are disabled until the advance fires.
    Revealed,
    /// All questions settled; the results view renders.
    Complete,
}

/// What a countdown tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Tick ignored: untimed quiz, paused timer, or reveal in progress.
    Idle,
    /// Countdown decremented; this many seconds remain.
    Counting(u32),
    /// Countdown hit zero: the question was settled as a no-answer miss.
    TimedOut,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// In-memory state machine for one quiz run.
///
/// All transitions are synchronous and pure; the timers that drive `tick` and
/// `advance` live with the controller that owns the session.
pub struct QuizSession {
    questions: Vec<Question>,
    config: QuizConfig,
    current: usize,
    score: u32,
    outcomes: Vec<AnswerOutcome>,
    selected: Option<String>,
    revealed: bool,
    remaining_secs: u32,
    timer_active: bool,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl QuizSession {
    /// Create a session over a full question set.
    ///
    /// `started_at` should come from the services layer clock to keep time
    /// deterministic.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::WrongQuestionCount` unless exactly
    /// [`QUESTIONS_PER_QUIZ`] questions are provided.
    pub fn new(
        questions: Vec<Question>,
        config: QuizConfig,
        started_at: DateTime<Utc>,
    ) -> Result<Self, QuizError> {
        if questions.len() != QUESTIONS_PER_QUIZ {
            return Err(QuizError::WrongQuestionCount {
                expected: QUESTIONS_PER_QUIZ,
                got: questions.len(),
            });
        }

        let outcomes = vec![AnswerOutcome::Unanswered; questions.len()];
        Ok(Self {
            questions,
            config,
            current: 0,
            score: 0,
            outcomes,
            selected: None,
            revealed: false,
            remaining_secs: config.countdown_secs,
            timer_active: config.timed,
            started_at,
            completed_at: None,
        })
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        if self.current >= self.questions.len() {
            QuizPhase::Complete
        } else if self.revealed {
            QuizPhase::Revealed
        } else {
            QuizPhase::Active
        }
    }

    #[must_use]
    pub fn config(&self) -> QuizConfig {
        self.config
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn outcomes(&self) -> &[AnswerOutcome] {
        &self.outcomes
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    #[must_use]
    pub fn selected_option(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    #[must_use]
    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    #[must_use]
    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    #[must_use]
    pub fn timer_active(&self) -> bool {
        self.timer_active
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.phase() == QuizPhase::Complete
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns a summary of the current progress.
    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        QuizProgress {
            total: self.questions.len(),
            answered: self.outcomes.iter().filter(|o| o.is_settled()).count(),
            correct: self.score,
            remaining: self.questions.len().saturating_sub(self.current),
            is_complete: self.is_complete(),
        }
    }

    /// Submit an answer for the current question.
    ///
    /// Grades by string equality, records the outcome, bumps the score on a
    /// hit, pauses the countdown, and enters the reveal phase.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Completed` once the quiz is over and
    /// `QuizError::AlreadyRevealed` while a reveal is in progress (which also
    /// covers the countdown having run out).
    pub fn select_answer(&mut self, option: &str) -> Result<AnswerOutcome, QuizError> {
        if self.is_complete() {
            return Err(QuizError::Completed);
        }
        if self.revealed {
            return Err(QuizError::AlreadyRevealed);
        }

        let correct = self.questions[self.current].is_correct(option);
        let outcome = if correct {
            self.score += 1;
            AnswerOutcome::Correct
        } else {
            AnswerOutcome::Incorrect
        };

        self.outcomes[self.current] = outcome;
        self.selected = Some(option.to_string());
        self.revealed = true;
        self.timer_active = false;
        Ok(outcome)
    }

    /// Advance the countdown by one second.
    ///
    /// Only does anything in the timed variant while a question is active and
    /// unanswered; a tick landing after a reveal (including the same-instant
    /// race with a manual answer) is reported as `Idle` and changes nothing.
    /// Hitting zero settles the question as an unanswered miss.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.config.timed || !self.timer_active || self.revealed || self.is_complete() {
            return TickOutcome::Idle;
        }

        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs > 0 {
            return TickOutcome::Counting(self.remaining_secs);
        }

        self.outcomes[self.current] = AnswerOutcome::Incorrect;
        self.selected = None;
        self.revealed = true;
        self.timer_active = false;
        TickOutcome::TimedOut
    }

    /// Leave the reveal phase: clear the selection, move to the next question
    /// or, after the last one, mark the session complete.
    ///
    /// `now` should come from the services layer clock.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Completed` if the quiz is already over and
    /// `QuizError::NotRevealed` if no reveal is in progress.
    pub fn advance(&mut self, now: DateTime<Utc>) -> Result<QuizPhase, QuizError> {
        if self.is_complete() {
            return Err(QuizError::Completed);
        }
        if !self.revealed {
            return Err(QuizError::NotRevealed);
        }

        self.selected = None;
        self.revealed = false;
        self.current += 1;

        if self.current >= self.questions.len() {
            self.completed_at = Some(now);
        } else {
            self.remaining_secs = self.config.countdown_secs;
            self.timer_active = self.config.timed;
        }
        Ok(self.phase())
    }

    /// Reset to question one on the same question set.
    ///
    /// Score, outcomes, selection, and countdown all return to their initial
    /// values; `now` becomes the new `started_at`.
    pub fn restart(&mut self, now: DateTime<Utc>) {
        self.current = 0;
        self.score = 0;
        self.outcomes.fill(AnswerOutcome::Unanswered);
        self.selected = None;
        self.revealed = false;
        self.remaining_secs = self.config.countdown_secs;
        self.timer_active = self.config.timed;
        self.started_at = now;
        self.completed_at = None;
    }

    /// Build the validated summary for a completed session.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Completed` when the session has not finished yet,
    /// or a `QuizSummaryError` if the outcome array is inconsistent.
    pub fn summary(&self) -> Result<QuizSummary, QuizError> {
        let Some(completed_at) = self.completed_at else {
            return Err(QuizError::Completed);
        };
        Ok(QuizSummary::from_outcomes(
            self.started_at,
            completed_at,
            &self.outcomes,
            self.score,
        )?)
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("questions", &self.questions.len())
            .field("current", &self.current)
            .field("score", &self.score)
            .field("revealed", &self.revealed)
            .field("remaining_secs", &self.remaining_secs)
            .field("timer_active", &self.timer_active)
            .field("completed_at", &self.completed_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

use services::{QuizConfig, QuizLoopService, QuizPhase, QuizSession, TickOutcome};

use crate::views::ViewError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizIntent {
    Select(String),
    PlayAgain,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizOutcome {
    Continue,
    Completed,
}

/// How an option button should be decorated during the reveal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionDecoration {
    Plain,
    Correct,
    WrongSelection,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub label: String,
    pub decoration: OptionDecoration,
    pub selected: bool,
    pub disabled: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MarkerVm {
    pub number: usize,
    pub filled: bool,
}

/// Presentation wrapper over the quiz session.
///
/// Everything here is a pure read of session state; the mutating methods are
/// thin forwards so the view never handles session errors directly.
pub struct QuizVm {
    session: QuizSession,
}

impl QuizVm {
    #[must_use]
    pub fn new(session: QuizSession) -> Self {
        Self { session }
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        self.session.phase()
    }

    #[must_use]
    pub fn config(&self) -> QuizConfig {
        self.session.config()
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.session.score()
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.session.total_questions()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.session.is_complete()
    }

    #[must_use]
    pub fn remaining_secs(&self) -> u32 {
        self.session.remaining_secs()
    }

    /// Countdown is only shown while a timed question is accepting answers.
    #[must_use]
    pub fn show_countdown(&self) -> bool {
        self.session.config().timed && self.phase() == QuizPhase::Active
    }

    #[must_use]
    pub fn correct_answer(&self) -> Option<String> {
        self.session
            .current_question()
            .map(|question| question.answer().to_string())
    }

    #[must_use]
    pub fn flag_url(&self) -> Option<String> {
        self.session
            .current_question()
            .map(|question| question.flag_url().as_str().to_string())
    }

    /// One marker per question, filled up to and including the current one.
    #[must_use]
    pub fn markers(&self) -> Vec<MarkerVm> {
        let current = self.session.current_index() + 1;
        (1..=self.session.total_questions())
            .map(|number| MarkerVm {
                number,
                filled: number <= current,
            })
            .collect()
    }

    #[must_use]
    pub fn options(&self) -> Vec<OptionVm> {
        let Some(question) = self.session.current_question() else {
            return Vec::new();
        };
        let revealed = self.session.is_revealed();
        let selected_option = self.session.selected_option();

        question
            .options()
            .iter()
            .map(|option| {
                let selected = selected_option == Some(option.as_str());
                let decoration = if !revealed {
                    OptionDecoration::Plain
                } else if question.is_correct(option) {
                    OptionDecoration::Correct
                } else if selected {
                    OptionDecoration::WrongSelection
                } else {
                    OptionDecoration::Plain
                };
                OptionVm {
                    label: option.clone(),
                    decoration,
                    selected,
                    disabled: revealed,
                }
            })
            .collect()
    }

    /// Submit an answer; returns whether the session accepted it.
    ///
    /// A rejected submission (reveal already showing, quiz over) is a benign
    /// race with the timers, not an error the user should see.
    pub fn select(&mut self, option: &str) -> bool {
        self.session.select_answer(option).is_ok()
    }

    /// Forward one countdown second into the session.
    pub fn tick(&mut self) -> TickOutcome {
        self.session.tick()
    }

    /// Leave the reveal phase. `None` means the advance lost a cancellation
    /// race and nothing changed.
    pub fn advance(&mut self, quiz_loop: &QuizLoopService) -> Option<QuizOutcome> {
        match quiz_loop.advance_current(&mut self.session) {
            Ok(QuizPhase::Complete) => Some(QuizOutcome::Completed),
            Ok(_) => Some(QuizOutcome::Continue),
            Err(_) => None,
        }
    }

    /// Restart on the same question set.
    pub fn play_again(&mut self, quiz_loop: &QuizLoopService) {
        quiz_loop.restart(&mut self.session);
    }
}

/// # Errors
///
/// Maps service failures into a `ViewError` the quiz page can render.
pub async fn start_quiz(quiz_loop: &QuizLoopService) -> Result<QuizVm, ViewError> {
    let session = quiz_loop.start_quiz().await.map_err(ViewError::from)?;
    Ok(QuizVm::new(session))
}

use std::sync::Arc;

use quiz_core::Clock;

use super::builder::QuizBuilder;
use super::session::{QuizPhase, QuizSession};
use crate::countries::CountrySource;
use crate::error::QuizError;

/// Tunable knobs for a quiz run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizConfig {
    /// Whether each question runs a countdown.
    pub timed: bool,
    /// Seconds on the countdown for each question (timed variant).
    pub countdown_secs: u32,
    /// Seconds the reveal stays on screen before advancing.
    pub reveal_secs: u64,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            timed: false,
            countdown_secs: 3,
            reveal_secs: 2,
        }
    }
}

impl QuizConfig {
    /// The timed variant with default seconds.
    #[must_use]
    pub fn timed() -> Self {
        Self {
            timed: true,
            ..Self::default()
        }
    }
}

/// Orchestrates quiz startup and clocked transitions.
///
/// Owns the clock and the country source so the UI never touches HTTP or
/// system time directly.
#[derive(Clone)]
pub struct QuizLoopService {
    clock: Clock,
    source: Arc<dyn CountrySource + Send + Sync>,
    config: QuizConfig,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(clock: Clock, source: Arc<dyn CountrySource + Send + Sync>) -> Self {
        Self {
            clock,
            source,
            config: QuizConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: QuizConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn config(&self) -> QuizConfig {
        self.config
    }

    /// Fetch countries, sample and build the question set, start a session.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Api` for fetch failures and
    /// `QuizError::NotEnoughCountries` when the validated list is too short.
    pub async fn start_quiz(&self) -> Result<QuizSession, QuizError> {
        let countries = self.source.fetch_all().await.map_err(QuizError::Api)?;
        log::debug!("building quiz from {} valid countries", countries.len());
        let questions = QuizBuilder::new().build(&countries)?;
        QuizSession::new(questions, self.config, self.clock.now())
    }

    /// Leave the reveal phase of the given session, stamping completion time
    /// from the service clock when the last question settles.
    ///
    /// # Errors
    ///
    /// Propagates `QuizError::Completed` / `QuizError::NotRevealed` from the
    /// session.
    pub fn advance_current(&self, session: &mut QuizSession) -> Result<QuizPhase, QuizError> {
        session.advance(self.clock.now())
    }

    /// Reset the given session to question one on the same question set.
    pub fn restart(&self, session: &mut QuizSession) {
        session.restart(self.clock.now());
    }
}

//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::{QuestionError, QuizSummaryError};

/// Errors emitted by country sources.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CountryApiError {
    #[error("country request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted by the quiz builder and session.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("not enough valid countries: got {got}, need {need}")]
    NotEnoughCountries { got: usize, need: usize },
    #[error("expected {expected} questions, got {got}")]
    WrongQuestionCount { expected: usize, got: usize },
    #[error("quiz already completed")]
    Completed,
    #[error("answer already revealed")]
    AlreadyRevealed,
    #[error("no revealed answer to advance from")]
    NotRevealed,
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Summary(#[from] QuizSummaryError),
    #[error(transparent)]
    Api(#[from] CountryApiError),
}

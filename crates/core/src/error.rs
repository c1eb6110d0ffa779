use thiserror::Error;

use crate::model::{CountryError, QuestionError, QuizSummaryError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Country(#[from] CountryError),
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Summary(#[from] QuizSummaryError),
}

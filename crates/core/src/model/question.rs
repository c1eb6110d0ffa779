use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Every question presents exactly this many choices, one of them correct.
pub const OPTIONS_PER_QUESTION: usize = 4;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("expected {expected} options, got {got}")]
    WrongOptionCount { expected: usize, got: usize },

    #[error("duplicate option: {0}")]
    DuplicateOption(String),

    #[error("answer {0:?} is not among the options")]
    AnswerNotInOptions(String),
}

/// One multiple-choice flag question.
///
/// The prompt is the flag image URL; the options are country names in display
/// order, already shuffled by the builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    flag_url: Url,
    options: Vec<String>,
    answer: String,
}

impl Question {
    /// Build a question, enforcing the option-set invariants.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::WrongOptionCount` unless exactly
    /// [`OPTIONS_PER_QUESTION`] options are given.
    /// Returns `QuestionError::DuplicateOption` if two options are equal.
    /// Returns `QuestionError::AnswerNotInOptions` if the answer is missing
    /// from the option set.
    pub fn new(
        flag_url: Url,
        options: Vec<String>,
        answer: impl Into<String>,
    ) -> Result<Self, QuestionError> {
        let answer = answer.into();
        if options.len() != OPTIONS_PER_QUESTION {
            return Err(QuestionError::WrongOptionCount {
                expected: OPTIONS_PER_QUESTION,
                got: options.len(),
            });
        }
        for (i, option) in options.iter().enumerate() {
            if options[..i].contains(option) {
                return Err(QuestionError::DuplicateOption(option.clone()));
            }
        }
        if !options.contains(&answer) {
            return Err(QuestionError::AnswerNotInOptions(answer));
        }

        Ok(Self {
            flag_url,
            options,
            answer,
        })
    }

    #[must_use]
    pub fn flag_url(&self) -> &Url {
        &self.flag_url
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    /// Grade a submitted option by string equality against the answer.
    #[must_use]
    pub fn is_correct(&self, option: &str) -> bool {
        self.answer == option
    }
}

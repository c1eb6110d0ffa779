mod country;
mod outcome;
mod question;
mod summary;

pub use country::{Country, CountryError};
pub use outcome::AnswerOutcome;
pub use question::{Question, QuestionError, OPTIONS_PER_QUESTION};
pub use summary::{QuizSummary, QuizSummaryError};

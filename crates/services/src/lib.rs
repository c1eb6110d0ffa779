#![forbid(unsafe_code)]

pub mod countries;
pub mod error;
pub mod quiz;
pub mod sampler;

pub use quiz_core::Clock;

pub use countries::{CountrySource, FixedCountrySource, RestCountriesClient};
pub use error::{CountryApiError, QuizError};

pub use quiz::{
    QuizBuilder, QuizConfig, QuizLoopService, QuizPhase, QuizProgress, QuizSession, TickOutcome,
    QUESTIONS_PER_QUIZ,
};

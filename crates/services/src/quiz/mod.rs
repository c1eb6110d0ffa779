mod builder;
mod progress;
mod session;
mod workflow;

// Public API of the quiz subsystem.
pub use crate::error::QuizError;
pub use builder::{QuizBuilder, QUESTIONS_PER_QUIZ};
pub use progress::QuizProgress;
pub use session::{QuizPhase, QuizSession, TickOutcome};
pub use workflow::{QuizConfig, QuizLoopService};

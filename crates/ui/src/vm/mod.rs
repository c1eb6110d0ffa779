mod quiz_vm;

pub use quiz_vm::{
    MarkerVm, OptionDecoration, OptionVm, QuizIntent, QuizOutcome, QuizVm, start_quiz,
};

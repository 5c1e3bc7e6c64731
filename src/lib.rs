// Library surface: vocabulary loading, question generation and the quiz session.
// The binary in main.rs is a thin line-oriented driver over these.
pub mod answer;
pub mod app_dirs;
pub mod config;
pub mod error;
pub mod generator;
pub mod session;
pub mod shuffle;
pub mod vocabulary;

pub use answer::check_answer;
pub use error::{SessionError, VocabularyError};
pub use generator::{
    generate_mixed_questions, generate_mixed_questions_with, GeneratorSettings,
    MixedQuestionGenerator, Question, QuestionKind,
};
pub use session::GameSession;
pub use vocabulary::{Topic, WordEntry};

//! JLPT grammar quiz generation built on the Conforma engine.
//!
//! A feature crate showing the engine in batch-accumulating use: quizzes are
//! requested in batches of at most five questions per generation call, each
//! batch is validated for structural completeness (every field populated,
//! exactly one correct choice per question), and accepted batches are
//! concatenated into one quiz. Accepted quizzes can be persisted as JSON.

mod generator;
mod model;
mod prompts;
mod schema;
mod store;

pub use generator::QuizGenerator;
pub use model::{Choice, GrammarQuestion, GrammarQuiz, JlptLevel};
pub use prompts::quiz_composer;
pub use schema::QuizSchema;
pub use store::QuizStore;

/// Largest question count requested from the model in one call.
pub const MAX_QUESTIONS_PER_REQUEST: usize = 5;

/// Smallest quiz a caller may request.
pub const MIN_QUESTIONS: usize = 1;

/// Largest quiz a caller may request.
pub const MAX_QUESTIONS: usize = 20;

//! Quiz generation on top of the engine.

use crate::model::{GrammarQuiz, JlptLevel};
use crate::prompts::quiz_composer;
use crate::schema::QuizSchema;
use crate::{MAX_QUESTIONS, MAX_QUESTIONS_PER_REQUEST, MIN_QUESTIONS};
use conforma_engine::{Engine, EngineConfig, EngineConfigBuilder};
use conforma_error::{ConfigError, ConformaResult};
use conforma_interface::{Cancellable, TextCompletion};
use tracing::{info, warn};

/// Generates JLPT grammar quizzes through the structured generation engine.
///
/// Questions are requested in batches of at most
/// [`MAX_QUESTIONS_PER_REQUEST`]; a batch that exhausts its retry budget
/// contributes nothing, and the quiz is assembled from whatever the
/// remaining batches produce.
pub struct QuizGenerator<C> {
    engine: Engine<C>,
}

impl<C: TextCompletion> QuizGenerator<C> {
    /// Create a generator with the default engine configuration.
    pub fn new(client: C) -> Self {
        let config = EngineConfigBuilder::default()
            .max_items_per_call(MAX_QUESTIONS_PER_REQUEST)
            .build()
            .expect("default quiz engine configuration is valid");
        Self::with_config(client, config)
    }

    /// Create a generator with a caller-supplied engine configuration.
    pub fn with_config(client: C, config: EngineConfig) -> Self {
        Self {
            engine: Engine::with_composer(client, config, quiz_composer()),
        }
    }

    /// Generate a quiz of `num_questions` questions for `level`.
    ///
    /// Best effort: the returned quiz may hold fewer questions than requested
    /// when a batch exhausts its retry budget, and may be empty when all do.
    /// Only configuration defects produce an error.
    pub async fn generate(
        &self,
        level: JlptLevel,
        num_questions: usize,
    ) -> ConformaResult<GrammarQuiz> {
        self.check_bounds(num_questions)?;

        let context = level.to_string();
        let harvest = self
            .engine
            .generate_items(&QuizSchema, &context, num_questions)
            .await?;

        Ok(Self::assemble(level, num_questions, harvest))
    }

    /// [`QuizGenerator::generate`] with a cooperative cancellation token.
    pub async fn generate_with_cancel(
        &self,
        level: JlptLevel,
        num_questions: usize,
        cancel: &dyn Cancellable,
    ) -> ConformaResult<GrammarQuiz> {
        self.check_bounds(num_questions)?;

        let context = level.to_string();
        let harvest = self
            .engine
            .generate_items_with_cancel(&QuizSchema, &context, num_questions, cancel)
            .await?;

        Ok(Self::assemble(level, num_questions, harvest))
    }

    fn check_bounds(&self, num_questions: usize) -> ConformaResult<()> {
        if !(MIN_QUESTIONS..=MAX_QUESTIONS).contains(&num_questions) {
            return Err(ConfigError::new(format!(
                "question count must be {}-{}, got {}",
                MIN_QUESTIONS, MAX_QUESTIONS, num_questions
            ))
            .into());
        }
        Ok(())
    }

    fn assemble(
        level: JlptLevel,
        requested: usize,
        harvest: conforma_engine::Harvest<crate::GrammarQuestion>,
    ) -> GrammarQuiz {
        if harvest.is_complete() {
            info!(
                level = %level,
                questions = harvest.items().len(),
                "Quiz generation complete"
            );
        } else {
            warn!(
                level = %level,
                requested,
                produced = harvest.items().len(),
                failed_batches = *harvest.failed_batches(),
                "Quiz generation degraded; returning partial quiz"
            );
        }

        GrammarQuiz {
            level: level.to_string(),
            questions: harvest.into_items(),
        }
    }
}

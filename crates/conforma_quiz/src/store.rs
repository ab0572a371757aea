//! JSON persistence for accepted quizzes.

use crate::model::{GrammarQuiz, JlptLevel};
use conforma_error::{ConformaResult, StorageError};
use std::path::{Path, PathBuf};
use tracing::info;

/// Stores quizzes as JSON files in a directory, one file per JLPT level.
///
/// Persistence is a caller-side concern layered on top of the engine; the
/// engine itself keeps no state between calls.
#[derive(Debug, Clone)]
pub struct QuizStore {
    dir: PathBuf,
}

impl QuizStore {
    /// Create a store rooted at `dir`. The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The file a quiz for `level` is stored at.
    pub fn path_for(&self, level: JlptLevel) -> PathBuf {
        self.dir.join(format!(
            "jlpt_{}_questions.json",
            level.to_string().to_lowercase()
        ))
    }

    /// Save a quiz, returning the path written.
    pub fn save(&self, level: JlptLevel, quiz: &GrammarQuiz) -> ConformaResult<PathBuf> {
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            StorageError::new(format!(
                "failed to create quiz directory '{}': {}",
                self.dir.display(),
                e
            ))
        })?;

        let path = self.path_for(level);
        let json = serde_json::to_string_pretty(quiz)
            .map_err(|e| StorageError::new(format!("failed to serialize quiz: {}", e)))?;
        std::fs::write(&path, json).map_err(|e| {
            StorageError::new(format!("failed to write '{}': {}", path.display(), e))
        })?;

        info!(path = %path.display(), questions = quiz.questions.len(), "Quiz saved");
        Ok(path)
    }

    /// Load the stored quiz for `level`.
    pub fn load(&self, level: JlptLevel) -> ConformaResult<GrammarQuiz> {
        let path = self.path_for(level);
        Self::load_path(&path)
    }

    fn load_path(path: &Path) -> ConformaResult<GrammarQuiz> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            StorageError::new(format!("failed to read '{}': {}", path.display(), e))
        })?;
        let quiz = serde_json::from_str(&json).map_err(|e| {
            StorageError::new(format!("failed to parse '{}': {}", path.display(), e))
        })?;
        Ok(quiz)
    }
}

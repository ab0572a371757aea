//! Quiz data model.

use conforma_error::ConfigError;
use serde::{Deserialize, Serialize};

/// A single answer choice in a grammar question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    /// Choice text, in Japanese
    pub text: String,
    /// Whether this is the correct answer
    pub is_correct: bool,
}

/// A single grammar question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammarQuestion {
    /// The grammar point being tested
    pub grammar_point: String,
    /// The multiple-choice question, in Japanese
    pub question: String,
    /// Answer choices; exactly one is marked correct
    pub choices: Vec<Choice>,
    /// Japanese explanation of the grammar usage
    pub explanation: String,
    /// Reasoning for why the correct answer is correct
    pub answer_reasoning: String,
    /// English explanation of the grammar point
    pub grammar_explanation_english: String,
}

/// A complete grammar quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammarQuiz {
    /// JLPT level label, e.g. `"N5"`
    pub level: String,
    /// The questions making up the quiz
    pub questions: Vec<GrammarQuestion>,
}

/// JLPT proficiency level, N5 (easiest) through N1 (hardest).
///
/// # Examples
///
/// ```
/// use conforma_quiz::JlptLevel;
///
/// let level = JlptLevel::try_from(5).unwrap();
/// assert_eq!(level, JlptLevel::N5);
/// assert_eq!(level.to_string(), "N5");
/// assert!(JlptLevel::try_from(6).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JlptLevel {
    /// Most basic grammar for beginners
    N5,
    /// Basic grammar for elementary learners
    N4,
    /// Intermediate grammar patterns
    N3,
    /// Upper-intermediate grammar structures
    N2,
    /// Advanced and nuanced grammar patterns
    N1,
}

impl JlptLevel {
    /// The numeric level, 1 through 5.
    pub fn numeric(&self) -> u8 {
        match self {
            JlptLevel::N1 => 1,
            JlptLevel::N2 => 2,
            JlptLevel::N3 => 3,
            JlptLevel::N4 => 4,
            JlptLevel::N5 => 5,
        }
    }
}

impl TryFrom<u8> for JlptLevel {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(JlptLevel::N1),
            2 => Ok(JlptLevel::N2),
            3 => Ok(JlptLevel::N3),
            4 => Ok(JlptLevel::N4),
            5 => Ok(JlptLevel::N5),
            other => Err(ConfigError::new(format!(
                "JLPT level must be 1-5, got {}",
                other
            ))),
        }
    }
}

impl std::fmt::Display for JlptLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "N{}", self.numeric())
    }
}

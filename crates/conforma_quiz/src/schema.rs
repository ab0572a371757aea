//! Schema descriptor for generated quizzes.

use crate::model::{GrammarQuestion, GrammarQuiz};
use conforma_interface::{BatchSchema, SchemaDescriptor};

/// Structural-completeness acceptance for quiz batches.
///
/// A batch is accepted only when every question has all text fields
/// populated, at least two choices, and exactly one choice marked correct.
/// Prompt guidance asks for four choices; choice count beyond the minimum is
/// not an acceptance rule.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuizSchema;

impl QuizSchema {
    fn check_question(index: usize, question: &GrammarQuestion) -> Result<(), String> {
        let fields = [
            ("grammar_point", &question.grammar_point),
            ("question", &question.question),
            ("explanation", &question.explanation),
            ("answer_reasoning", &question.answer_reasoning),
            (
                "grammar_explanation_english",
                &question.grammar_explanation_english,
            ),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(format!("question {} has empty {}", index + 1, name));
            }
        }

        if question.choices.len() < 2 {
            return Err(format!(
                "question {} has {} choice(s), need at least 2",
                index + 1,
                question.choices.len()
            ));
        }
        if question.choices.iter().any(|choice| choice.text.trim().is_empty()) {
            return Err(format!("question {} has an empty choice", index + 1));
        }

        let correct = question
            .choices
            .iter()
            .filter(|choice| choice.is_correct)
            .count();
        if correct != 1 {
            return Err(format!(
                "question {} has {} correct choices, need exactly 1",
                index + 1,
                correct
            ));
        }

        Ok(())
    }
}

impl SchemaDescriptor for QuizSchema {
    type Output = GrammarQuiz;

    fn name(&self) -> &str {
        "grammar_quiz"
    }

    fn format_instructions(&self) -> String {
        r#"{
  "level": "N5",
  "questions": [
    {
      "grammar_point": "string",
      "question": "string",
      "choices": [
        {"text": "string", "is_correct": true},
        {"text": "string", "is_correct": false},
        {"text": "string", "is_correct": false},
        {"text": "string", "is_correct": false}
      ],
      "explanation": "string (Japanese)",
      "answer_reasoning": "string",
      "grammar_explanation_english": "string"
    }
  ]
}"#
        .to_string()
    }

    fn accepts(&self, output: &GrammarQuiz) -> Result<(), String> {
        if output.questions.is_empty() {
            return Err("quiz contains no questions".to_string());
        }
        for (index, question) in output.questions.iter().enumerate() {
            Self::check_question(index, question)?;
        }
        Ok(())
    }
}

impl BatchSchema for QuizSchema {
    type Item = GrammarQuestion;

    fn into_items(output: GrammarQuiz) -> Vec<GrammarQuestion> {
        output.questions
    }
}

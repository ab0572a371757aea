//! Prompt text for quiz generation.

use conforma_engine::{PromptComposer, PromptComposerBuilder};

/// Default model for quiz generation.
pub const DEFAULT_MODEL: &str = "qwen/qwen3-32b";

/// System instruction prepended to the schema block.
const SYSTEM_MESSAGE: &str = "\
You are a JLPT grammar question generator that outputs Japanese grammar questions in JSON format.
Create quiz questions that test understanding of JLPT grammar points appropriate for the specified level.
Each question should have:
1. The grammar point being tested
2. A multiple-choice question in Japanese
3. Four answer choices with exactly one correct answer
4. A Japanese explanation of the grammar usage
5. A specific reasoning for why the correct answer is correct
6. An English explanation of the grammar point for learners

Adjust the difficulty based on the JLPT level:
- N5: Most basic grammar for beginners (simple particles, basic verb forms)
- N4: Basic grammar for elementary learners
- N3: Intermediate grammar patterns
- N2: Upper-intermediate grammar structures
- N1: Advanced and nuanced grammar patterns

The questions should reflect the appropriate complexity and vocabulary for each level.";

/// Per-batch user prompt; `{context}` is the level label, `{count}` the
/// batch size.
const USER_TEMPLATE: &str = "Generate {count} JLPT {context} grammar questions.";

/// The prompt composer for quiz generation.
pub fn quiz_composer() -> PromptComposer {
    PromptComposerBuilder::default()
        .system_preamble(Some(SYSTEM_MESSAGE.to_string()))
        .user_template(USER_TEMPLATE)
        .model(Some(DEFAULT_MODEL.to_string()))
        .build()
        .expect("quiz composer defaults are valid")
}

//! Quiz generation and persistence tests.

use async_trait::async_trait;
use conforma_core::{GenerateRequest, RawResponse, RetryPolicy};
use conforma_engine::EngineConfigBuilder;
use conforma_error::{ConformaErrorKind, ConformaResult, TransportError};
use conforma_interface::{SchemaDescriptor, TextCompletion};
use conforma_quiz::{
    GrammarQuiz, JlptLevel, QuizGenerator, QuizSchema, QuizStore, MAX_QUESTIONS_PER_REQUEST,
};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

/// Serve prepared replies; running out of script means the engine made more
/// calls than the test budgeted for.
struct ScriptedClient {
    replies: Mutex<VecDeque<ConformaResult<String>>>,
}

impl ScriptedClient {
    fn new(replies: Vec<ConformaResult<String>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
        }
    }
}

#[async_trait]
impl TextCompletion for ScriptedClient {
    async fn complete(&self, _request: &GenerateRequest) -> ConformaResult<RawResponse> {
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("scripted client ran out of replies")
            .map(RawResponse::new)
    }
}

/// A well-formed quiz payload with `count` questions.
fn quiz_json(level: &str, count: usize) -> String {
    let questions: Vec<serde_json::Value> = (0..count)
        .map(|i| {
            serde_json::json!({
                "grammar_point": format!("〜てから ({i})"),
                "question": "ご飯を食べ___、出かけます。",
                "choices": [
                    {"text": "てから", "is_correct": true},
                    {"text": "ながら", "is_correct": false},
                    {"text": "てみる", "is_correct": false},
                    {"text": "ておく", "is_correct": false}
                ],
                "explanation": "「てから」は動作の順序を表します。",
                "answer_reasoning": "The sentence describes one action after another.",
                "grammar_explanation_english": "Use てから to say 'after doing X'."
            })
        })
        .collect();
    serde_json::json!({"level": level, "questions": questions}).to_string()
}

fn parse_quiz(json: &str) -> GrammarQuiz {
    serde_json::from_str(json).unwrap()
}

fn fast_config(max_attempts: usize) -> conforma_engine::EngineConfig {
    EngineConfigBuilder::default()
        .policy(RetryPolicy {
            max_attempts,
            wait_interval: Duration::from_millis(10),
        })
        .max_items_per_call(MAX_QUESTIONS_PER_REQUEST)
        .build()
        .unwrap()
}

#[test]
fn well_formed_quiz_is_accepted() {
    let quiz = parse_quiz(&quiz_json("N5", 3));
    assert!(QuizSchema.accepts(&quiz).is_ok());
}

#[test]
fn two_correct_flags_are_rejected() {
    let mut quiz = parse_quiz(&quiz_json("N5", 2));
    quiz.questions[1].choices[1].is_correct = true;

    let reason = QuizSchema.accepts(&quiz).unwrap_err();
    assert!(reason.contains("2 correct choices"), "got: {}", reason);
}

#[test]
fn no_correct_flag_is_rejected() {
    let mut quiz = parse_quiz(&quiz_json("N5", 1));
    quiz.questions[0].choices[0].is_correct = false;

    assert!(QuizSchema.accepts(&quiz).is_err());
}

#[test]
fn empty_required_field_is_rejected() {
    let mut quiz = parse_quiz(&quiz_json("N4", 2));
    quiz.questions[0].answer_reasoning = "   ".to_string();

    let reason = QuizSchema.accepts(&quiz).unwrap_err();
    assert!(reason.contains("answer_reasoning"), "got: {}", reason);
}

#[test]
fn single_choice_question_is_rejected() {
    let mut quiz = parse_quiz(&quiz_json("N2", 1));
    quiz.questions[0].choices.truncate(1);

    assert!(QuizSchema.accepts(&quiz).is_err());
}

#[test]
fn empty_quiz_is_rejected() {
    let quiz = parse_quiz(r#"{"level": "N1", "questions": []}"#);
    assert!(QuizSchema.accepts(&quiz).is_err());
}

#[tokio::test(start_paused = true)]
async fn large_requests_are_batched_and_concatenated() {
    // 12 questions at 5 per call: batches of 5, 5, 2.
    let client = ScriptedClient::new(vec![
        Ok(quiz_json("N3", 5)),
        Ok(quiz_json("N3", 5)),
        Ok(quiz_json("N3", 2)),
    ]);
    let generator = QuizGenerator::with_config(client, fast_config(3));

    let quiz = generator.generate(JlptLevel::N3, 12).await.unwrap();

    assert_eq!(quiz.level, "N3");
    assert_eq!(quiz.questions.len(), 12);
}

#[tokio::test(start_paused = true)]
async fn failed_batch_yields_a_partial_quiz() {
    // Middle batch exhausts two attempts on transport failures.
    let client = ScriptedClient::new(vec![
        Ok(quiz_json("N5", 5)),
        Err(TransportError::new("connection reset").into()),
        Err(TransportError::with_status("service unavailable", 503).into()),
        Ok(quiz_json("N5", 2)),
    ]);
    let generator = QuizGenerator::with_config(client, fast_config(2));

    let quiz = generator.generate(JlptLevel::N5, 12).await.unwrap();

    assert_eq!(quiz.questions.len(), 7);
}

#[tokio::test(start_paused = true)]
async fn out_of_range_question_counts_fail_fast() {
    let client = ScriptedClient::new(vec![]);
    let generator = QuizGenerator::with_config(client, fast_config(3));

    for count in [0, 21] {
        let err = generator.generate(JlptLevel::N5, count).await.unwrap_err();
        assert!(matches!(err.kind(), ConformaErrorKind::Config(_)));
    }
}

#[tokio::test(start_paused = true)]
async fn quiz_wrapped_in_prose_is_still_parsed() {
    let wrapped = format!("Here is your quiz:\n{}\nGood luck!", quiz_json("N4", 2));
    let client = ScriptedClient::new(vec![Ok(wrapped)]);
    let generator = QuizGenerator::with_config(client, fast_config(3));

    let quiz = generator.generate(JlptLevel::N4, 2).await.unwrap();
    assert_eq!(quiz.questions.len(), 2);
}

#[test]
fn store_round_trips_a_quiz() {
    let dir = tempfile::tempdir().unwrap();
    let store = QuizStore::new(dir.path());
    let quiz = parse_quiz(&quiz_json("N5", 4));

    let path = store.save(JlptLevel::N5, &quiz).unwrap();
    assert!(path.ends_with("jlpt_n5_questions.json"));

    let loaded = store.load(JlptLevel::N5).unwrap();
    assert_eq!(loaded, quiz);
}

#[test]
fn loading_a_missing_quiz_is_a_storage_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = QuizStore::new(dir.path());

    let err = store.load(JlptLevel::N2).unwrap_err();
    assert!(matches!(err.kind(), ConformaErrorKind::Storage(_)));
}

#[test]
fn levels_parse_from_numbers_and_display_with_prefix() {
    for (number, label) in [(1, "N1"), (3, "N3"), (5, "N5")] {
        let level = JlptLevel::try_from(number).unwrap();
        assert_eq!(level.to_string(), label);
        assert_eq!(level.numeric(), number);
    }
    assert!(JlptLevel::try_from(0).is_err());
    assert!(JlptLevel::try_from(6).is_err());
}

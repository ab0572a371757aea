//! Structured generation engine with validated retry.
//!
//! The engine turns unreliable natural-language model output into
//! schema-conformant data: it composes a prompt that embeds the target
//! schema's formatting instructions, calls an external
//! [`TextCompletion`](conforma_interface::TextCompletion) client, validates
//! the raw text against the schema and its domain acceptance rule, and
//! retries with fixed waits and a cooling schedule until the output is
//! accepted or the attempt budget is exhausted.
//!
//! Exhaustion is a value, not an error: best-effort callers receive an
//! explicit [`Outcome::Exhausted`] or an empty contribution from a failed
//! batch, never a raised error. Only configuration defects escape
//! immediately, before any client call is made.

mod compose;
mod engine;
mod extract;
mod retry;
mod validate;

pub use compose::{batch_sizes, PromptComposer, PromptComposerBuilder};
pub use engine::{Engine, EngineConfig, EngineConfigBuilder, Harvest, Outcome};
pub use extract::extract_json;
pub use retry::{RetrySession, RetryState};
pub use validate::{validate, Rejection};

//! Prompt composition and batch planning.

use conforma_core::{GenerateRequest, SamplingParams};
use conforma_interface::SchemaDescriptor;
use derive_builder::Builder;

/// Default user prompt when the calling feature does not supply a template.
const DEFAULT_USER_TEMPLATE: &str =
    "{context}\n\nProduce exactly {count} item(s) matching the required schema.";

/// Builds the instruction sent to the generation model.
///
/// Deterministic and side-effect free: the same schema, context, batch size,
/// and sampling parameters always yield the same request. The system block
/// carries the schema's formatting instructions; the user block is rendered
/// from a template with `{context}` and `{count}` placeholders.
///
/// # Examples
///
/// ```
/// use conforma_engine::PromptComposerBuilder;
///
/// let composer = PromptComposerBuilder::default()
///     .user_template("Generate {count} questions about {context}.")
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct PromptComposer {
    /// Feature-level system instruction prepended to the schema block
    #[builder(default)]
    system_preamble: Option<String>,
    /// User prompt template with `{context}` and `{count}` placeholders
    #[builder(default = "DEFAULT_USER_TEMPLATE.to_string()")]
    user_template: String,
    /// Model override passed through to the client
    #[builder(default)]
    model: Option<String>,
    /// Output token cap passed through to the client
    #[builder(default)]
    max_tokens: Option<u32>,
}

impl Default for PromptComposer {
    fn default() -> Self {
        Self {
            system_preamble: None,
            user_template: DEFAULT_USER_TEMPLATE.to_string(),
            model: None,
            max_tokens: None,
        }
    }
}

impl PromptComposer {
    /// Compose one attempt's request for a batch of `batch_size` items.
    pub fn compose<S: SchemaDescriptor>(
        &self,
        schema: &S,
        context: &str,
        batch_size: usize,
        sampling: SamplingParams,
    ) -> GenerateRequest {
        let instructions = format!(
            "The response must be a single JSON value using this schema: {}",
            schema.format_instructions()
        );
        let system = match &self.system_preamble {
            Some(preamble) => format!("{}\n\n{}", preamble, instructions),
            None => instructions,
        };

        let prompt = self
            .user_template
            .replace("{context}", context)
            .replace("{count}", &batch_size.to_string());

        GenerateRequest {
            system: Some(system),
            prompt,
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            sampling,
        }
    }
}

/// Split a requested item count into per-call batch sizes.
///
/// # Examples
///
/// ```
/// use conforma_engine::batch_sizes;
///
/// assert_eq!(batch_sizes(12, 5), vec![5, 5, 2]);
/// assert_eq!(batch_sizes(4, 5), vec![4]);
/// assert_eq!(batch_sizes(0, 5), Vec::<usize>::new());
/// ```
pub fn batch_sizes(total: usize, max_per_call: usize) -> Vec<usize> {
    assert!(max_per_call > 0, "max_per_call must be positive");
    let mut sizes = Vec::with_capacity(total.div_ceil(max_per_call));
    let mut remaining = total;
    while remaining > 0 {
        let size = remaining.min(max_per_call);
        sizes.push(size);
        remaining -= size;
    }
    sizes
}

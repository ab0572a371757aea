//! Request and response types for one generation attempt.

use crate::SamplingParams;
use serde::{Deserialize, Serialize};

/// One attempt's request to the generation client.
///
/// Built fresh for every attempt by the prompt composer; the sampling
/// parameters are the only field that changes between attempts of the same
/// unit of work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// System instruction, including the schema formatting block
    pub system: Option<String>,
    /// User prompt for this batch
    pub prompt: String,
    /// Model override, when the client supports more than one
    pub model: Option<String>,
    /// Output token cap
    pub max_tokens: Option<u32>,
    /// Randomness for this attempt
    pub sampling: SamplingParams,
}

/// Unstructured text returned by the generation client for one request.
///
/// Ephemeral: consumed by the response validator and then discarded,
/// retained only in logs when the attempt is rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawResponse {
    text: String,
}

impl RawResponse {
    /// Wrap raw model output.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// The raw text.
    pub fn text(&self) -> &str {
        &self.text
    }
}

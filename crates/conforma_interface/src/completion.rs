//! Generation client trait definition.

use async_trait::async_trait;
use conforma_core::{GenerateRequest, RawResponse};
use conforma_error::ConformaResult;

/// Opaque call to an external text-generation service.
///
/// The engine treats any failure from this boundary as a retryable
/// [`TransportError`](conforma_error::TransportError), sharing the same
/// attempt budget as validation failures. Implementations live outside this
/// workspace (hosted model APIs); tests use scripted in-memory doubles.
#[async_trait]
pub trait TextCompletion: Send + Sync {
    /// Complete the given request, returning the model's raw text output.
    async fn complete(&self, request: &GenerateRequest) -> ConformaResult<RawResponse>;
}

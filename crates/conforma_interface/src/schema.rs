//! Schema descriptor trait definitions.

use serde::de::DeserializeOwned;

/// Declarative definition of the expected output shape and acceptance rule.
///
/// A descriptor is constructed once per use case, immutable, and owned by the
/// calling feature. Structural conformance is delegated to serde via
/// [`SchemaDescriptor::Output`]; `accepts` is the domain predicate evaluated
/// on top of a successful parse.
///
/// # Examples
///
/// ```
/// use conforma_interface::SchemaDescriptor;
/// use serde::Deserialize;
///
/// #[derive(Debug, Deserialize)]
/// struct Digest {
///     entries: Vec<String>,
/// }
///
/// struct DigestSchema;
///
/// impl SchemaDescriptor for DigestSchema {
///     type Output = Digest;
///
///     fn name(&self) -> &str {
///         "digest"
///     }
///
///     fn format_instructions(&self) -> String {
///         r#"Respond with a JSON object: {"entries": ["..."]}"#.to_string()
///     }
///
///     fn accepts(&self, output: &Digest) -> Result<(), String> {
///         if output.entries.len() > 1 {
///             Ok(())
///         } else {
///             Err(format!("expected more than one entry, got {}", output.entries.len()))
///         }
///     }
/// }
/// ```
pub trait SchemaDescriptor: Send + Sync {
    /// The declared output shape.
    type Output: DeserializeOwned + Send;

    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Machine-readable formatting instructions embedded in the prompt.
    ///
    /// Must be deterministic; the composer embeds this text verbatim.
    fn format_instructions(&self) -> String;

    /// Domain acceptance rule, evaluated after a successful structural parse.
    ///
    /// Pure function. The `Err` string is the rejection reason recorded in
    /// logs; it never reaches the caller except as an aggregate failure.
    fn accepts(&self, output: &Self::Output) -> Result<(), String>;
}

/// Schema whose output carries a list of items that can be accumulated
/// across batches.
///
/// Batch-oriented callers ask for more items than one generation call
/// reliably yields; the engine runs one retry session per batch and
/// concatenates the items of every accepted batch.
pub trait BatchSchema: SchemaDescriptor {
    /// The per-item type contributed to the aggregate.
    type Item: Send;

    /// Decompose an accepted output into its items.
    fn into_items(output: Self::Output) -> Vec<Self::Item>;
}

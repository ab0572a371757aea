//! Response validation: structural parse plus domain acceptance.

use crate::extract::extract_json;
use conforma_core::RawResponse;
use conforma_interface::SchemaDescriptor;

/// Why one attempt's output was not accepted.
///
/// Rejections drive the retry controller and never escape `generate()`;
/// callers only ever see an aggregate failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// Raw text could not be interpreted as the declared shape
    Parse(String),
    /// Parsed successfully but failed the acceptance rule
    Acceptance(String),
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rejection::Parse(reason) => write!(f, "parse rejection: {}", reason),
            Rejection::Acceptance(reason) => write!(f, "acceptance rejection: {}", reason),
        }
    }
}

/// Parse raw model output into the schema's declared shape and evaluate the
/// acceptance rule.
///
/// The parse is attempted on the trimmed text first; when that fails, the
/// outermost embedded JSON span is extracted and parsed instead. This
/// fallback is part of the contract, not polish: the upstream client does not
/// guarantee output free of surrounding prose.
pub fn validate<S: SchemaDescriptor>(
    schema: &S,
    raw: &RawResponse,
) -> Result<S::Output, Rejection> {
    let text = raw.text().trim();

    let parsed: S::Output = match serde_json::from_str(text) {
        Ok(value) => value,
        Err(direct_err) => {
            let span = extract_json(text).ok_or_else(|| {
                Rejection::Parse(format!("no JSON payload found in output: {}", direct_err))
            })?;
            serde_json::from_str(span)
                .map_err(|e| Rejection::Parse(format!("embedded payload malformed: {}", e)))?
        }
    };

    schema
        .accepts(&parsed)
        .map_err(Rejection::Acceptance)?;

    Ok(parsed)
}

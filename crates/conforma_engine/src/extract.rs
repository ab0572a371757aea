//! Locating a JSON payload embedded in surrounding prose.
//!
//! Generation clients are not guaranteed to emit bare JSON; models routinely
//! wrap the payload in explanation text or code fences. Before giving up on a
//! parse, the validator extracts the outermost well-formed JSON object or
//! array span from the raw text and parses that instead.

/// Extract the outermost balanced JSON object or array span from `raw`.
///
/// Scans from the first `{` or `[`, tracking string literals and escape
/// sequences so braces inside strings do not affect nesting. Returns `None`
/// when no candidate start exists or the payload is unterminated.
///
/// # Examples
///
/// ```
/// use conforma_engine::extract_json;
///
/// let raw = r#"Sure! Here is the JSON you asked for: {"items": [1, 2]} Hope it helps."#;
/// assert_eq!(extract_json(raw), Some(r#"{"items": [1, 2]}"#));
/// ```
pub fn extract_json(raw: &str) -> Option<&str> {
    let start = raw.find(['{', '['])?;
    let bytes = raw.as_bytes();

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, &byte) in bytes[start..].iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if byte == b'\\' {
                escaped = true;
            } else if byte == b'"' {
                in_string = false;
            }
            continue;
        }

        match byte {
            b'"' => in_string = true,
            b'{' | b'[' => depth += 1,
            b'}' | b']' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(&raw[start..=start + offset]);
                }
            }
            _ => {}
        }
    }

    None
}

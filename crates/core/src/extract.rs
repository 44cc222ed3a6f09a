//! Lenient extraction of JSON fragments embedded in model replies.
//!
//! Completion models are asked to answer in prose and to include a JSON
//! object or array somewhere in the reply. The scanner walks the text from
//! each candidate opening bracket, tracks nesting depth outside string
//! literals, and hands the balanced fragment to `serde_json`. The first
//! fragment that parses wins; unbalanced or malformed fragments are skipped.

use serde_json::Value as JsonValue;

use crate::error::AssistError;

/// Which kind of JSON value the caller is looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonShape {
    Object,
    Array,
    Any,
}

impl JsonShape {
    fn opens(self, byte: u8) -> bool {
        match self {
            JsonShape::Object => byte == b'{',
            JsonShape::Array => byte == b'[',
            JsonShape::Any => byte == b'{' || byte == b'[',
        }
    }

    fn name(self) -> &'static str {
        match self {
            JsonShape::Object => "object",
            JsonShape::Array => "array",
            JsonShape::Any => "value",
        }
    }
}

/// Find and parse the first balanced JSON fragment of the given shape.
pub fn extract_json(text: &str, shape: JsonShape) -> Result<JsonValue, AssistError> {
    let bytes = text.as_bytes();
    let mut from = 0;

    while let Some(offset) = bytes[from..].iter().position(|&b| shape.opens(b)) {
        let start = from + offset;
        if let Some(end) = balanced_end(bytes, start) {
            // Both ends are ASCII brackets, so the slice is on char boundaries.
            if let Ok(value) = serde_json::from_str::<JsonValue>(&text[start..=end]) {
                return Ok(value);
            }
        }
        from = start + 1;
    }

    Err(AssistError::ExtractionFailure(shape.name()))
}

/// Index of the bracket that closes the one at `start`.
///
/// Brackets inside string literals do not count. Mismatched bracket kinds are
/// left for the parser to reject.
fn balanced_end(bytes: &[u8], start: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, &b) in bytes.iter().enumerate().skip(start) {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }

        match b {
            b'"' => in_string = true,
            b'{' | b'[' => depth += 1,
            b'}' | b']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }

    None
}

//! Defensive JSON Extraction
//!
//! Collaborator output is free text that *may* contain a structured fragment,
//! often wrapped in prose or a Markdown code fence. The helpers here find the
//! first balanced `{...}` or `[...]` fragment that parses, and return `None` on
//! any failure. They never panic and never return an error.

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Find the end index (inclusive) of the balanced fragment starting at `start`.
///
/// Brackets inside JSON string literals are ignored. A mismatched closer
/// aborts the scan.
fn balanced_end(bytes: &[u8], start: usize) -> Option<usize> {
    let mut stack: Vec<u8> = Vec::new();
    let mut in_string = false;
    let mut escaped = false;

    for (offset, &b) in bytes[start..].iter().enumerate() {
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
            b'{' => stack.push(b'}'),
            b'[' => stack.push(b']'),
            b'}' | b']' => {
                if stack.pop() != Some(b) {
                    return None;
                }
                if stack.is_empty() {
                    return Some(start + offset);
                }
            }
            _ => {}
        }
    }

    None
}

/// Iterate over every balanced object/array-like fragment in `text`, in order
/// of their opening bracket.
pub fn fragments(text: &str) -> impl Iterator<Item = &str> + '_ {
    let bytes = text.as_bytes();
    bytes
        .iter()
        .enumerate()
        .filter(|(_, &b)| b == b'{' || b == b'[')
        .filter_map(move |(start, _)| balanced_end(bytes, start).map(|end| &text[start..=end]))
}

/// Extract the first balanced fragment of `text` that parses as JSON.
pub fn extract_json_fragment(text: &str) -> Option<Value> {
    fragments(text).find_map(|candidate| serde_json::from_str::<Value>(candidate).ok())
}

/// Extract the first fragment of `text` that deserializes into `T`.
///
/// The whole (trimmed) text is tried first, then each balanced fragment.
pub fn extract_typed<T: DeserializeOwned>(text: &str) -> Option<T> {
    if let Ok(parsed) = serde_json::from_str::<T>(text.trim()) {
        return Some(parsed);
    }

    fragments(text).find_map(|candidate| serde_json::from_str::<T>(candidate).ok())
}

//! Payload location in raw model text
//!
//! Models wrap their JSON in fenced code blocks, prose, or both. The fenced
//! block is preferred; failing that, the outermost balanced object is taken.

use once_cell::sync::Lazy;
use regex::Regex;

static FENCED_JSON: Lazy<Regex> = Lazy::new(|| {
    // Non-greedy so a response with several blocks yields the first.
    Regex::new(r"(?s)```(?:json)?\s*(\{.*?\})\s*```").expect("fenced-json regex compiles")
});

/// Locate the JSON payload within raw response text
///
/// Returns the fenced block's body when present, otherwise the outermost
/// brace-balanced object, otherwise `None`.
#[must_use]
pub fn locate_payload(text: &str) -> Option<&str> {
    if let Some(captures) = FENCED_JSON.captures(text) {
        if let Some(m) = captures.get(1) {
            return Some(m.as_str());
        }
    }
    balanced_object(text)
}

/// Find the first brace-balanced object, skipping braces inside strings
fn balanced_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let bytes = text.as_bytes();
    let mut depth = 0usize;
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
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=start + offset]);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_fenced_block() {
        let text = "Here is the document:\n```json\n{\"a\": 1}\n```\nRegards";
        assert_eq!(locate_payload(text), Some("{\"a\": 1}"));
    }

    #[test]
    fn fence_without_language_tag() {
        let text = "```\n{\"a\": 1}\n```";
        assert_eq!(locate_payload(text), Some("{\"a\": 1}"));
    }

    #[test]
    fn falls_back_to_balanced_object() {
        let text = "The scope follows {\"stages\": [{\"n\": 0}]} as requested";
        assert_eq!(locate_payload(text), Some("{\"stages\": [{\"n\": 0}]}"));
    }

    #[test]
    fn braces_inside_strings_do_not_confuse_the_scan() {
        let text = r#"{"note": "use {brackets} carefully", "n": 1}"#;
        assert_eq!(locate_payload(text), Some(text));
    }

    #[test]
    fn no_object_yields_none() {
        assert_eq!(locate_payload("no json here"), None);
        assert_eq!(locate_payload("unbalanced { object"), None);
    }
}

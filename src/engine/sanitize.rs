//! Input Sanitizer
//!
//! Normalizes and bounds raw text before anything else touches it.
//! Pure function, no side effects, never fails.

use once_cell::sync::Lazy;
use regex::Regex;

/// C0 and C1 control ranges plus DEL
static CONTROL_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\x00-\x1F\x7F-\x9F]").expect("control char pattern"));

/// Markup-tag-like substrings. The trailing `>` is optional so an
/// unterminated tag at the end of input is still stripped.
static MARKUP_TAGS: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>?").expect("markup pattern"));

/// Sanitize untrusted input text.
///
/// Applied in order: trim, truncate to `max_length` characters, remove
/// control characters, strip markup tags. A final trim keeps the function
/// idempotent when tag removal exposes edge whitespace.
pub fn sanitize(raw: &str, max_length: usize) -> String {
    let mut text = raw.trim().to_string();

    if text.chars().count() > max_length {
        text = text.chars().take(max_length).collect();
    }

    text = CONTROL_CHARS.replace_all(&text, "").into_owned();
    text = MARKUP_TAGS.replace_all(&text, "").into_owned();

    text.trim().to_string()
}

// ============================================================================
// TESTS
// ============================================================================

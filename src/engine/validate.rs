//! Safety Validator
//!
//! Rejects inputs carrying injection signatures before the pipeline runs.
//! Works on RAW input, before sanitization, so the patterns it looks for
//! cannot first be neutralized by sanitization.

/// Length below which SQL-control keywords are treated as unambiguous
/// attack signatures rather than legitimate content
const SHORT_INPUT_CHARS: usize = 50;

/// Outcome of the safety check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafetyVerdict {
    pub safe: bool,
    pub reason: Option<String>,
}

impl SafetyVerdict {
    fn safe() -> Self {
        Self {
            safe: true,
            reason: None,
        }
    }

    fn rejected(reason: &str) -> Self {
        Self {
            safe: false,
            reason: Some(reason.to_string()),
        }
    }
}

/// Validate whether raw input is safe to process.
///
/// Callers must not proceed to scoring on rejection.
pub fn check(raw: &str) -> SafetyVerdict {
    let lowercase = raw.to_lowercase();

    // Script-executing pseudo-protocol
    if lowercase.contains("javascript:") {
        return SafetyVerdict::rejected("Script injection pattern detected.");
    }

    // Data URIs that might carry payloads
    if lowercase.contains("data:") && lowercase.contains("base64") {
        return SafetyVerdict::rejected("Embedded data payloads are restricted.");
    }

    // SQL-control keywords in very short inputs
    if raw.chars().count() < SHORT_INPUT_CHARS
        && (lowercase.contains("select ") || lowercase.contains("drop table"))
    {
        return SafetyVerdict::rejected("Query injection pattern detected.");
    }

    SafetyVerdict::safe()
}

// ============================================================================
// TESTS
// ============================================================================

//! Heuristic Scoring Rules & Thresholds
//!
//! Point values, marker word lists, and label cut-offs for the local
//! heuristic scorer. No scoring logic here - just constants.
//!
//! The 20/60 label cut-offs are fixed constants carried over from the
//! reference behavior and are deliberately not configurable.

use super::types::ThreatLevel;

// ============================================================================
// LABEL CUT-OFFS
// ============================================================================

/// At or below this score = SAFE
pub const SUSPICIOUS_CUTOFF: u8 = 20;

/// Above this score = FRAUD, between = SUSPICIOUS
pub const FRAUD_CUTOFF: u8 = 60;

/// Derive a label from a score. The only place labels come from.
pub fn label_for_score(score: u8) -> ThreatLevel {
    if score > FRAUD_CUTOFF {
        ThreatLevel::Fraud
    } else if score > SUSPICIOUS_CUTOFF {
        ThreatLevel::Suspicious
    } else {
        ThreatLevel::Safe
    }
}

// ============================================================================
// POINT VALUES (additive, capped at 100)
// ============================================================================

/// Urgency language
pub const URGENCY_POINTS: u8 = 30;

/// Credential-harvesting language
pub const CREDENTIAL_POINTS: u8 = 25;

/// Financial-solicitation language
pub const FINANCIAL_POINTS: u8 = 20;

/// Base risk for any embedded URL
pub const URL_BASE_POINTS: u8 = 15;

/// URL add-on: high-risk top-level domain
pub const HIGH_RISK_TLD_POINTS: u8 = 20;

/// URL add-on: literal IP-address host
pub const IP_HOST_POINTS: u8 = 30;

/// URL add-on: internationalized-domain (punycode) prefix
pub const PUNYCODE_POINTS: u8 = 40;

// ============================================================================
// MARKER WORD LISTS (matched case-insensitively on sanitized input)
// ============================================================================

/// Social engineering urgency markers
pub const URGENCY_MARKERS: &[&str] = &["urgent", "immediate action", "within 24 hours"];

/// Credential harvesting markers
pub const CREDENTIAL_MARKERS: &[&str] = &["password", "account suspended", "verify your identity"];

/// Suspicious financial solicitation markers
pub const FINANCIAL_MARKERS: &[&str] = &["crypto", "bitcoin", "ethereum", "wire transfer"];

/// TLDs frequently associated with disposable infrastructure or phishing campaigns
pub const HIGH_RISK_TLDS: &[&str] = &[
    ".xyz", ".top", ".pw", ".bid", ".club", ".work", ".support", ".info", ".live", ".online",
    ".site", ".ninja",
];

// ============================================================================
// FALLBACK DISCLOSURE
// ============================================================================

/// Fixed explanation attached to every heuristic verdict.
/// Discloses that the result is local pattern matching, not AI-grounded.
pub const HEURISTIC_EXPLANATION: &str = "Forensic engine returned a heuristic-based fallback \
    report using enhanced local pattern matching. No real-time AI grounding was possible, \
    but signature analysis indicates potential risk.";

// ============================================================================
// TESTS
// ============================================================================

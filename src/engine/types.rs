//! Engine Types
//!
//! Core data model for the threat assessment engine.
//! No logic here beyond constructors and enum conversions - just data structures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// THREAT LEVEL
// ============================================================================

/// Categorical threat assessment
///
/// Derived solely from score cut-offs; never compared numerically by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ThreatLevel {
    /// No meaningful risk signals
    Safe,
    /// Risk signals present, needs user judgement
    Suspicious,
    /// Strong fraud/phishing signature
    Fraud,
}

impl ThreatLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThreatLevel::Safe => "SAFE",
            ThreatLevel::Suspicious => "SUSPICIOUS",
            ThreatLevel::Fraud => "FRAUD",
        }
    }

    /// Parse from the wire form. Anything outside the closed set is rejected.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "SAFE" => Some(ThreatLevel::Safe),
            "SUSPICIOUS" => Some(ThreatLevel::Suspicious),
            "FRAUD" => Some(ThreatLevel::Fraud),
            _ => None,
        }
    }
}

impl std::fmt::Display for ThreatLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// INDICATORS
// ============================================================================

/// Kind of detected signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum IndicatorKind {
    Url,
    Keyword,
    Behavior,
    Financial,
}

impl IndicatorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IndicatorKind::Url => "URL",
            IndicatorKind::Keyword => "KEYWORD",
            IndicatorKind::Behavior => "BEHAVIOR",
            IndicatorKind::Financial => "FINANCIAL",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "URL" => Some(IndicatorKind::Url),
            "KEYWORD" => Some(IndicatorKind::Keyword),
            "BEHAVIOR" => Some(IndicatorKind::Behavior),
            "FINANCIAL" => Some(IndicatorKind::Financial),
            _ => None,
        }
    }
}

/// Severity of a detected signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "LOW",
            Severity::Medium => "MEDIUM",
            Severity::High => "HIGH",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "LOW" => Some(Severity::Low),
            "MEDIUM" => Some(Severity::Medium),
            "HIGH" => Some(Severity::High),
            _ => None,
        }
    }
}

/// One detected signal contributing to the risk score
///
/// Insertion order is preserved and carries no ranking meaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Indicator {
    /// Wire field name is `type` per the analyzer contract
    #[serde(rename = "type")]
    pub kind: IndicatorKind,
    pub description: String,
    pub severity: Severity,
}

impl Indicator {
    pub fn new(kind: IndicatorKind, description: impl Into<String>, severity: Severity) -> Self {
        Self {
            kind,
            description: description.into(),
            severity,
        }
    }
}

// ============================================================================
// GROUNDING LINKS
// ============================================================================

/// External citation supporting the primary analyzer's verdict
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingLink {
    pub title: String,
    pub uri: String,
}

// ============================================================================
// ANALYSIS RESULT
// ============================================================================

/// The engine's sole output type
///
/// Immutable once constructed; the orchestrator is the only creator.
/// `grounding_links` is omitted (not an empty list) when the analyzer
/// returned no citations, so callers can distinguish "not checked" from
/// "checked, nothing found".
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Fresh unique identifier per analysis - never reused, never derived from input
    pub id: String,
    /// The sanitized text that was actually analyzed
    pub input: String,
    /// Risk score, 0-100 inclusive
    pub score: u8,
    pub label: ThreatLevel,
    /// Always non-empty
    pub explanation: String,
    pub indicators: Vec<Indicator>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grounding_links: Option<Vec<GroundingLink>>,
    /// Analysis completion instant (ISO-8601 on the wire)
    pub timestamp: DateTime<Utc>,
}

// ============================================================================
// SCORING VERDICT (internal)
// ============================================================================

/// A scoring outcome without identity
///
/// Both scoring strategies produce this; the orchestrator stamps `id` and
/// `timestamp` exactly once when the final result is committed.
#[derive(Debug, Clone)]
pub struct Verdict {
    pub score: u8,
    pub label: ThreatLevel,
    pub explanation: String,
    pub indicators: Vec<Indicator>,
    pub grounding_links: Option<Vec<GroundingLink>>,
}

// ============================================================================
// AUTOMATION PAYLOAD
// ============================================================================

/// Maximum snippet length before the truncation marker is appended
pub const SNIPPET_MAX_CHARS: usize = 150;

/// Read-only projection of [`AnalysisResult`] for the automation dispatcher
///
/// Created fresh per dispatch; never persisted by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutomationPayload {
    pub analysis_id: String,
    pub risk_score: u8,
    pub threat_label: ThreatLevel,
    /// Input truncated to 150 characters, "..." appended if truncated
    pub input_snippet: String,
    pub explanation: String,
    pub detected_at: DateTime<Utc>,
}

impl AutomationPayload {
    pub fn from_result(result: &AnalysisResult) -> Self {
        Self {
            analysis_id: result.id.clone(),
            risk_score: result.score,
            threat_label: result.label,
            input_snippet: snippet(&result.input),
            explanation: result.explanation.clone(),
            detected_at: result.timestamp,
        }
    }
}

/// Truncate to [`SNIPPET_MAX_CHARS`] characters, marking truncation with "..."
fn snippet(input: &str) -> String {
    if input.chars().count() > SNIPPET_MAX_CHARS {
        let truncated: String = input.chars().take(SNIPPET_MAX_CHARS).collect();
        format!("{}...", truncated)
    } else {
        input.to_string()
    }
}

// ============================================================================
// ERROR HANDLING
// ============================================================================

/// Caller-visible errors from [`assess`](crate::engine::orchestrator::ThreatEngine::assess)
///
/// Every other failure mode degrades gracefully to a still-useful result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Unsafe pattern matched - terminal, do not retry automatically
    InputRejected { reason: String },
    /// Blank after sanitization - terminal, user-correctable
    InputEmpty,
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::InputRejected { reason } => {
                write!(f, "Input rejected: {}", reason)
            }
            EngineError::InputEmpty => write!(f, "Input is empty after sanitization"),
        }
    }
}

impl std::error::Error for EngineError {}

/// Primary analyzer failure
///
/// Recovered internally by the orchestrator via the heuristic fallback;
/// never surfaced to callers.
#[derive(Debug, Clone)]
pub enum AnalysisUnavailable {
    /// No endpoint/credential configured
    NotConfigured,
    /// Transport failure, including timeout expiry
    Transport { message: String },
    /// Service replied with a non-success status
    HttpStatus { code: u16 },
    /// Empty or blank reply body
    EmptyReply,
    /// Reply body was not parseable
    MalformedReply { message: String },
    /// Reply parsed but violated the result schema (missing field,
    /// out-of-enum value, empty explanation)
    SchemaViolation { message: String },
}

impl std::fmt::Display for AnalysisUnavailable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisUnavailable::NotConfigured => {
                write!(f, "Analyzer not configured")
            }
            AnalysisUnavailable::Transport { message } => {
                write!(f, "Transport error: {}", message)
            }
            AnalysisUnavailable::HttpStatus { code } => {
                write!(f, "Analyzer returned HTTP {}", code)
            }
            AnalysisUnavailable::EmptyReply => write!(f, "Analyzer reply was empty"),
            AnalysisUnavailable::MalformedReply { message } => {
                write!(f, "Malformed analyzer reply: {}", message)
            }
            AnalysisUnavailable::SchemaViolation { message } => {
                write!(f, "Analyzer reply violated schema: {}", message)
            }
        }
    }
}

impl std::error::Error for AnalysisUnavailable {}

// ============================================================================
// TESTS
// ============================================================================

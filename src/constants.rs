//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! To change the default analyzer endpoint or thresholds, only edit this file.

/// Default grounded-intelligence API base URL
pub const DEFAULT_ANALYZER_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default analyzer model
pub const DEFAULT_ANALYZER_MODEL: &str = "gemini-2.0-flash";

/// Default analyzer request timeout (seconds)
pub const DEFAULT_ANALYZER_TIMEOUT_SECS: u64 = 20;

/// Automation fires when risk score reaches this value
pub const DEFAULT_AUTOMATION_THRESHOLD: u8 = 60;

/// Scores above this value are flagged for expedited escalation
pub const DEFAULT_CRITICAL_THRESHOLD: u8 = 80;

/// Default webhook delivery timeout (seconds)
///
/// Independent of the analyzer timeout: dispatch must never share a
/// timeout budget with the analysis call.
pub const DEFAULT_DISPATCH_TIMEOUT_SECS: u64 = 10;

/// Maximum accepted input length (characters)
pub const DEFAULT_MAX_INPUT_LENGTH: usize = 2000;

/// Source-identifying header sent with every automation webhook
pub const SOURCE_HEADER: &str = "X-PhishGuard-Source";

/// Value for [`SOURCE_HEADER`]
pub const SOURCE_HEADER_VALUE: &str = "Forensic-Engine-V3";

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "PhishGuard";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get analyzer endpoint from environment or use default
pub fn get_analyzer_endpoint() -> String {
    std::env::var("PHISHGUARD_ANALYZER_ENDPOINT")
        .unwrap_or_else(|_| DEFAULT_ANALYZER_ENDPOINT.to_string())
}

/// Get analyzer API key from environment (no default; None = analyzer disabled)
pub fn get_analyzer_api_key() -> Option<String> {
    std::env::var("PHISHGUARD_API_KEY")
        .ok()
        .filter(|k| !k.is_empty())
}

/// Get analyzer model from environment or use default
pub fn get_analyzer_model() -> String {
    std::env::var("PHISHGUARD_ANALYZER_MODEL")
        .unwrap_or_else(|_| DEFAULT_ANALYZER_MODEL.to_string())
}

/// Get automation webhook URL from environment (no default; None = dispatch disabled)
pub fn get_webhook_url() -> Option<String> {
    std::env::var("PHISHGUARD_WEBHOOK_URL")
        .ok()
        .filter(|u| !u.is_empty())
}

/// Get automation threshold from environment or use default
pub fn get_automation_threshold() -> u8 {
    std::env::var("PHISHGUARD_AUTOMATION_THRESHOLD")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_AUTOMATION_THRESHOLD)
}

/// Get maximum input length from environment or use default
pub fn get_max_input_length() -> usize {
    std::env::var("PHISHGUARD_MAX_INPUT_LENGTH")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_MAX_INPUT_LENGTH)
}

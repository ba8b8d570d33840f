//! Engine Configuration
//!
//! Explicit configuration values passed into constructors. Nothing in the
//! engine reads ambient process state after startup; `from_env` exists for
//! callers that want the environment-variable surface.

use crate::constants;

/// Grounded-intelligence analyzer settings
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// API base URL
    pub endpoint: String,
    pub api_key: String,
    pub model: String,
    /// Request timeout; expiry is treated as analyzer failure
    pub timeout_secs: u64,
}

impl AnalyzerConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            endpoint: constants::DEFAULT_ANALYZER_ENDPOINT.to_string(),
            api_key: api_key.into(),
            model: constants::DEFAULT_ANALYZER_MODEL.to_string(),
            timeout_secs: constants::DEFAULT_ANALYZER_TIMEOUT_SECS,
        }
    }
}

/// Automation webhook settings
#[derive(Debug, Clone)]
pub struct AutomationConfig {
    pub webhook_url: String,
    /// Dispatch fires when score reaches this value
    pub threshold: u8,
    /// Scores above this value are flagged for expedited escalation
    pub critical_threshold: u8,
    /// Delivery timeout, independent of the analyzer's budget
    pub timeout_secs: u64,
}

impl AutomationConfig {
    pub fn new(webhook_url: impl Into<String>) -> Self {
        Self {
            webhook_url: webhook_url.into(),
            threshold: constants::DEFAULT_AUTOMATION_THRESHOLD,
            critical_threshold: constants::DEFAULT_CRITICAL_THRESHOLD,
            timeout_secs: constants::DEFAULT_DISPATCH_TIMEOUT_SECS,
        }
    }
}

/// Process-wide engine configuration, fixed at startup
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// `None` runs the engine heuristic-only (valid degraded configuration)
    pub analyzer: Option<AnalyzerConfig>,
    /// `None` disables automation dispatch
    pub automation: Option<AutomationConfig>,
    pub max_input_length: usize,
}

impl EngineConfig {
    pub fn new() -> Self {
        Self {
            analyzer: None,
            automation: None,
            max_input_length: constants::DEFAULT_MAX_INPUT_LENGTH,
        }
    }

    /// Build configuration from `PHISHGUARD_*` environment variables.
    pub fn from_env() -> Self {
        let analyzer = constants::get_analyzer_api_key().map(|api_key| AnalyzerConfig {
            endpoint: constants::get_analyzer_endpoint(),
            api_key,
            model: constants::get_analyzer_model(),
            timeout_secs: constants::DEFAULT_ANALYZER_TIMEOUT_SECS,
        });

        let automation = constants::get_webhook_url().map(|webhook_url| AutomationConfig {
            webhook_url,
            threshold: constants::get_automation_threshold(),
            critical_threshold: constants::DEFAULT_CRITICAL_THRESHOLD,
            timeout_secs: constants::DEFAULT_DISPATCH_TIMEOUT_SECS,
        });

        Self {
            analyzer,
            automation,
            max_input_length: constants::get_max_input_length(),
        }
    }

    pub fn with_analyzer(mut self, analyzer: AnalyzerConfig) -> Self {
        self.analyzer = Some(analyzer);
        self
    }

    pub fn with_automation(mut self, automation: AutomationConfig) -> Self {
        self.automation = Some(automation);
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================

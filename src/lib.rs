//! PhishGuard Core - Threat Assessment Engine
//!
//! Assesses an arbitrary piece of untrusted text (a URL, SMS body, or email)
//! for phishing/fraud risk and produces a structured verdict: a 0-100 risk
//! score, a three-level label, a human-readable explanation, and a list of
//! typed indicators.
//!
//! Scoring is dual-strategy: an external grounded-intelligence analyzer is
//! tried first, and any failure degrades to a deterministic local heuristic.
//! Results over a configured threshold can be handed to the automation
//! dispatcher for downstream workflow delivery.
//!
//! ```no_run
//! use phishguard_core::{AutomationDispatcher, EngineConfig, ThreatEngine};
//!
//! let config = EngineConfig::from_env();
//! let engine = ThreatEngine::new(&config);
//!
//! let result = engine.assess("URGENT: verify your account at http://192.168.1.1/login")?;
//! println!("{} ({})", result.score, result.label);
//!
//! if let Some(automation) = config.automation {
//!     AutomationDispatcher::new(automation).dispatch(&result);
//! }
//! # Ok::<(), phishguard_core::EngineError>(())
//! ```
//!
//! Rendering, session storage, and result history are owned by callers.

pub mod constants;
pub mod engine;

pub use engine::{
    AnalysisResult, AnalysisStrategy, AnalysisUnavailable, AnalyzerConfig, AutomationConfig,
    AutomationDispatcher, AutomationPayload, DispatchStats, DispatchStatus, EngineConfig,
    EngineError, GroundingLink, Indicator, IndicatorKind, Severity, ThreatEngine, ThreatLevel,
    Verdict,
};

//! Threat Assessment Engine
//!
//! Pipeline per request, strictly linear:
//! Sanitizer -> Validator -> Orchestrator (primary-or-fallback) -> Dispatcher.
//!
//! - `sanitize` / `validate` - input sanitation and injection gating
//! - `heuristic` / `rules` - deterministic local scoring
//! - `intel` - external grounded-intelligence adapter
//! - `orchestrator` - strategy composition, result commit
//! - `dispatch` - threshold-driven automation webhook

pub mod config;
pub mod dispatch;
pub mod heuristic;
pub mod intel;
pub mod orchestrator;
pub mod rules;
pub mod sanitize;
pub mod types;
pub mod validate;

pub use config::{AnalyzerConfig, AutomationConfig, EngineConfig};
pub use dispatch::{AutomationDispatcher, DispatchStats, DispatchStatus};
pub use orchestrator::{AnalysisStrategy, ThreatEngine};
pub use types::{
    AnalysisResult, AnalysisUnavailable, AutomationPayload, EngineError, GroundingLink, Indicator,
    IndicatorKind, Severity, ThreatLevel, Verdict,
};

//! Threat Assessment Orchestrator
//!
//! Composes the pipeline: validate -> sanitize -> primary analysis ->
//! heuristic fallback. Holds an ordered list of scoring strategies and takes
//! the first success; the heuristic scorer is the terminal strategy and
//! cannot fail, so a primary-analysis failure is never surfaced to the
//! caller - degraded service is preferred over no answer.

use chrono::Utc;
use uuid::Uuid;

use super::config::EngineConfig;
use super::heuristic;
use super::intel::IntelClient;
use super::types::{AnalysisResult, AnalysisUnavailable, EngineError, Verdict};
use super::{sanitize, validate};

// ============================================================================
// STRATEGY SEAM
// ============================================================================

/// One way of producing a scoring verdict for sanitized input.
///
/// The orchestrator tries strategies in order and commits the first success.
pub trait AnalysisStrategy: Send + Sync {
    fn name(&self) -> &'static str;
    fn produce(&self, input: &str) -> Result<Verdict, AnalysisUnavailable>;
}

/// Delegates to the external grounded-intelligence service
struct PrimaryStrategy {
    client: IntelClient,
}

impl AnalysisStrategy for PrimaryStrategy {
    fn name(&self) -> &'static str {
        "primary"
    }

    fn produce(&self, input: &str) -> Result<Verdict, AnalysisUnavailable> {
        self.client.analyze(input)
    }
}

/// Deterministic local scoring; never fails
struct HeuristicStrategy;

impl AnalysisStrategy for HeuristicStrategy {
    fn name(&self) -> &'static str {
        "heuristic"
    }

    fn produce(&self, input: &str) -> Result<Verdict, AnalysisUnavailable> {
        Ok(heuristic::score(input))
    }
}

// ============================================================================
// ENGINE
// ============================================================================

/// The threat assessment engine
///
/// Stateless per request; safe under unlimited concurrent invocation.
pub struct ThreatEngine {
    strategies: Vec<Box<dyn AnalysisStrategy>>,
    max_input_length: usize,
}

impl ThreatEngine {
    /// Build an engine from explicit configuration.
    ///
    /// With no analyzer configured the engine runs heuristic-only.
    pub fn new(config: &EngineConfig) -> Self {
        let mut strategies: Vec<Box<dyn AnalysisStrategy>> = Vec::new();

        match &config.analyzer {
            Some(analyzer) => {
                strategies.push(Box::new(PrimaryStrategy {
                    client: IntelClient::new(analyzer),
                }));
            }
            None => {
                log::info!("No analyzer configured - running heuristic-only");
            }
        }
        strategies.push(Box::new(HeuristicStrategy));

        Self {
            strategies,
            max_input_length: config.max_input_length,
        }
    }

    /// Build an engine with injected strategies (test seam).
    ///
    /// The heuristic scorer still backstops the list: even if every injected
    /// strategy fails, `assess` returns a result.
    pub fn with_strategies(
        strategies: Vec<Box<dyn AnalysisStrategy>>,
        max_input_length: usize,
    ) -> Self {
        Self {
            strategies,
            max_input_length,
        }
    }

    /// Assess raw untrusted text and return a complete analysis result.
    ///
    /// The only caller-visible failures are [`EngineError::InputRejected`]
    /// and [`EngineError::InputEmpty`]; every scoring failure degrades to the
    /// heuristic fallback.
    pub fn assess(&self, raw_input: &str) -> Result<AnalysisResult, EngineError> {
        // VALIDATING - on raw input, before sanitization can hide an attack
        let safety = validate::check(raw_input);
        if !safety.safe {
            let reason = safety
                .reason
                .unwrap_or_else(|| "Unsafe input pattern detected.".to_string());
            log::warn!("Input rejected: {}", reason);
            return Err(EngineError::InputRejected { reason });
        }

        // SANITIZING
        let input = sanitize::sanitize(raw_input, self.max_input_length);
        if input.is_empty() {
            return Err(EngineError::InputEmpty);
        }

        // PRIMARY_ANALYSIS -> FALLBACK_ANALYSIS
        let mut verdict: Option<Verdict> = None;
        for strategy in &self.strategies {
            match strategy.produce(&input) {
                Ok(v) => {
                    log::debug!("Strategy '{}' produced score {}", strategy.name(), v.score);
                    verdict = Some(v);
                    break;
                }
                Err(e) => {
                    log::warn!("Strategy '{}' unavailable: {} - falling back", strategy.name(), e);
                }
            }
        }

        // The heuristic cannot fail, but an injected strategy list can be
        // exhausted; score locally rather than surface an error.
        let verdict = verdict.unwrap_or_else(|| heuristic::score(&input));

        // SUCCESS - identity assigned exactly once, at commit
        Ok(AnalysisResult {
            id: Uuid::new_v4().to_string(),
            input,
            score: verdict.score.min(100),
            label: verdict.label,
            explanation: verdict.explanation,
            indicators: verdict.indicators,
            grounding_links: verdict.grounding_links,
            timestamp: Utc::now(),
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::rules::HEURISTIC_EXPLANATION;
    use crate::engine::types::{Indicator, IndicatorKind, Severity, ThreatLevel};
    use std::collections::HashSet;

    struct FailingStrategy;

    impl AnalysisStrategy for FailingStrategy {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn produce(&self, _input: &str) -> Result<Verdict, AnalysisUnavailable> {
            Err(AnalysisUnavailable::Transport {
                message: "connection reset".to_string(),
            })
        }
    }

    struct FixedStrategy {
        score: u8,
    }

    impl AnalysisStrategy for FixedStrategy {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn produce(&self, _input: &str) -> Result<Verdict, AnalysisUnavailable> {
            Ok(Verdict {
                score: self.score,
                label: ThreatLevel::Fraud,
                explanation: "service verdict".to_string(),
                indicators: vec![Indicator::new(
                    IndicatorKind::Url,
                    "known scam domain",
                    Severity::High,
                )],
                grounding_links: None,
            })
        }
    }

    fn heuristic_only() -> ThreatEngine {
        ThreatEngine::new(&EngineConfig::new())
    }

    #[test]
    fn test_rejects_unsafe_input() {
        let engine = heuristic_only();
        match engine.assess("javascript:alert(1)") {
            Err(EngineError::InputRejected { reason }) => {
                assert!(reason.contains("Script injection"));
            }
            other => panic!("expected InputRejected, got {:?}", other.map(|r| r.score)),
        }
    }

    #[test]
    fn test_rejects_empty_after_sanitization() {
        let engine = heuristic_only();
        assert!(matches!(
            engine.assess("  <b></b>  "),
            Err(EngineError::InputEmpty)
        ));
        assert!(matches!(engine.assess(""), Err(EngineError::InputEmpty)));
    }

    #[test]
    fn test_heuristic_only_engine_assesses() {
        let engine = heuristic_only();
        let result = engine
            .assess("URGENT: verify your identity at http://192.168.1.1/login")
            .unwrap();

        assert!(result.score >= 85);
        assert_eq!(result.label, ThreatLevel::Fraud);
        assert!(!result.explanation.is_empty());
        assert!(!result.id.is_empty());
    }

    #[test]
    fn test_primary_failure_falls_back_to_heuristic() {
        let engine = ThreatEngine::with_strategies(
            vec![Box::new(FailingStrategy), Box::new(HeuristicStrategy)],
            2000,
        );

        let result = engine.assess("account suspended, act now").unwrap();
        assert_eq!(result.explanation, HEURISTIC_EXPLANATION);
        assert_eq!(result.score, 25);
    }

    #[test]
    fn test_first_success_wins() {
        let engine = ThreatEngine::with_strategies(
            vec![
                Box::new(FixedStrategy { score: 77 }),
                Box::new(HeuristicStrategy),
            ],
            2000,
        );

        let result = engine.assess("harmless text").unwrap();
        assert_eq!(result.score, 77);
        assert_eq!(result.explanation, "service verdict");
    }

    #[test]
    fn test_exhausted_strategy_list_still_returns_result() {
        let engine = ThreatEngine::with_strategies(vec![Box::new(FailingStrategy)], 2000);
        let result = engine.assess("wire transfer required").unwrap();
        assert_eq!(result.explanation, HEURISTIC_EXPLANATION);
    }

    #[test]
    fn test_result_carries_sanitized_input() {
        let engine = heuristic_only();
        let result = engine.assess("  <b>check</b> https://example.com  ").unwrap();
        assert_eq!(result.input, "check https://example.com");
    }

    #[test]
    fn test_score_always_within_bounds() {
        let engine = heuristic_only();
        let samples = [
            "hello",
            "URGENT password bitcoin http://192.168.1.1/ https://a.xyz/ xn--b.top/",
            "verify your identity",
        ];
        for sample in samples {
            let result = engine.assess(sample).unwrap();
            assert!(result.score <= 100);
        }
    }

    #[test]
    fn test_ids_unique_across_many_analyses() {
        let engine = heuristic_only();
        let mut seen = HashSet::new();
        for _ in 0..10_000 {
            let result = engine.assess("identical input every time").unwrap();
            assert!(seen.insert(result.id), "duplicate analysis id");
        }
    }
}

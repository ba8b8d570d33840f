//! End-to-end pipeline checks: raw text in, committed result out.

use phishguard_core::{
    AnalysisStrategy, AnalysisUnavailable, EngineConfig, EngineError, GroundingLink, Indicator,
    IndicatorKind, Severity, ThreatEngine, ThreatLevel, Verdict,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

struct FlakyPrimary;

impl AnalysisStrategy for FlakyPrimary {
    fn name(&self) -> &'static str {
        "flaky-primary"
    }

    fn produce(&self, _input: &str) -> Result<Verdict, AnalysisUnavailable> {
        Err(AnalysisUnavailable::Transport {
            message: "simulated timeout".to_string(),
        })
    }
}

struct GroundedPrimary;

impl AnalysisStrategy for GroundedPrimary {
    fn name(&self) -> &'static str {
        "grounded-primary"
    }

    fn produce(&self, _input: &str) -> Result<Verdict, AnalysisUnavailable> {
        Ok(Verdict {
            score: 92,
            label: ThreatLevel::Fraud,
            explanation: "Known campaign, cross-referenced against live reports.".to_string(),
            indicators: vec![Indicator::new(
                IndicatorKind::Url,
                "Domain reported in active phishing campaign",
                Severity::High,
            )],
            grounding_links: Some(vec![GroundingLink {
                title: "Scam database entry".to_string(),
                uri: "https://intel.example/report/42".to_string(),
            }]),
        })
    }
}

#[test]
fn unsafe_input_is_rejected_before_scoring() {
    init_logging();
    let engine = ThreatEngine::new(&EngineConfig::new());

    let err = engine.assess("javascript:alert(1)").unwrap_err();
    assert!(matches!(err, EngineError::InputRejected { .. }));
}

#[test]
fn phishing_sample_assessed_end_to_end() {
    init_logging();
    let engine = ThreatEngine::new(&EngineConfig::new());

    let result = engine
        .assess("  URGENT: verify your identity at http://192.168.1.1/login  ")
        .unwrap();

    assert_eq!(result.label, ThreatLevel::Fraud);
    assert!(result.score >= 85);
    assert_eq!(
        result.input,
        "URGENT: verify your identity at http://192.168.1.1/login"
    );
    assert!(result.grounding_links.is_none());

    // Serialized form honors the wire contract
    let json = serde_json::to_value(&result).unwrap();
    assert!(json["timestamp"].is_string());
    assert_eq!(json["label"], "FRAUD");
    assert!(json.get("groundingLinks").is_none());
}

#[test]
fn primary_timeout_degrades_to_heuristic_verdict() {
    init_logging();
    let engine = ThreatEngine::with_strategies(vec![Box::new(FlakyPrimary)], 2000);

    let result = engine.assess("your account suspended - act within 24 hours").unwrap();
    assert!(result.explanation.contains("heuristic"));
    // credential 25 + urgency 30
    assert_eq!(result.score, 55);
    assert_eq!(result.label, ThreatLevel::Suspicious);
}

#[test]
fn grounded_verdict_carries_citations_and_fresh_identity() {
    init_logging();
    let engine = ThreatEngine::with_strategies(vec![Box::new(GroundedPrimary)], 2000);

    let first = engine.assess("hxxp sample").unwrap();
    let second = engine.assess("hxxp sample").unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(first.score, 92);
    assert_eq!(first.grounding_links.as_ref().unwrap().len(), 1);
    assert!(second.timestamp >= first.timestamp);
}

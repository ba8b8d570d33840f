//! Heuristic Scorer
//!
//! Deterministic local analysis used standalone or as fallback when the
//! primary analyzer is unavailable. Additive point accumulation: each rule
//! contributes independently to both score and indicators.
//!
//! No network access, no blocking calls - safe to run inline.

use once_cell::sync::Lazy;
use regex::Regex;

use super::rules::{
    label_for_score, CREDENTIAL_MARKERS, CREDENTIAL_POINTS, FINANCIAL_MARKERS, FINANCIAL_POINTS,
    HEURISTIC_EXPLANATION, HIGH_RISK_TLDS, HIGH_RISK_TLD_POINTS, IP_HOST_POINTS, PUNYCODE_POINTS,
    URGENCY_MARKERS, URGENCY_POINTS, URL_BASE_POINTS,
};
use super::types::{Indicator, IndicatorKind, Severity, Verdict};

/// Generic URL pattern: optional protocol, then either a literal IPv4 host
/// or a dotted domain, plus optional port, path, query, and fragment.
static URL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(?:https?://)?(?:\d{1,3}(?:\.\d{1,3}){3}|(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z0-9][a-z0-9-]{0,61}[a-z0-9])(?::\d{1,5})?(?:/[^?\s#]*)?(?:\?[^#\s]*)?(?:#[^\s]*)?",
    )
    .expect("url pattern")
});

/// Literal IPv4 host, with or without protocol
static IP_HOST_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:https?://)?\d{1,3}(?:\.\d{1,3}){3}(?::\d{1,5})?(?:[/?#]|$)")
        .expect("ip host pattern")
});

/// Score sanitized input with local signature analysis.
///
/// Fully deterministic: identical input always yields an identical verdict.
pub fn score(input: &str) -> Verdict {
    let lowercase = input.to_lowercase();
    let mut total: u32 = 0;
    let mut indicators = Vec::new();

    // 1. Behavioral check: urgency
    if URGENCY_MARKERS.iter().any(|m| lowercase.contains(m)) {
        total += URGENCY_POINTS as u32;
        indicators.push(Indicator::new(
            IndicatorKind::Behavior,
            "Social engineering urgency pattern detected",
            Severity::Medium,
        ));
    }

    // 2. Keyword check: credential harvesting
    if CREDENTIAL_MARKERS.iter().any(|m| lowercase.contains(m)) {
        total += CREDENTIAL_POINTS as u32;
        indicators.push(Indicator::new(
            IndicatorKind::Keyword,
            "Potential credential harvesting signature",
            Severity::High,
        ));
    }

    // 3. Financial check: suspicious transaction requests
    if FINANCIAL_MARKERS.iter().any(|m| lowercase.contains(m)) {
        total += FINANCIAL_POINTS as u32;
        indicators.push(Indicator::new(
            IndicatorKind::Financial,
            "Suspicious financial solicitation detected",
            Severity::Medium,
        ));
    }

    // 4. URL structure analysis
    for url_match in URL_PATTERN.find_iter(input) {
        let url = url_match.as_str();
        let url_lower = url.to_lowercase();

        total += URL_BASE_POINTS as u32;
        indicators.push(Indicator::new(
            IndicatorKind::Url,
            format!("Active link detected: {}", preview(url)),
            Severity::Low,
        ));

        if HIGH_RISK_TLDS
            .iter()
            .any(|tld| url_lower.ends_with(tld) || url_lower.contains(&format!("{}/", tld)))
        {
            total += HIGH_RISK_TLD_POINTS as u32;
            indicators.push(Indicator::new(
                IndicatorKind::Url,
                "High-risk top-level domain detected in URL structure",
                Severity::Medium,
            ));
        }

        if IP_HOST_PATTERN.is_match(&url_lower) {
            total += IP_HOST_POINTS as u32;
            indicators.push(Indicator::new(
                IndicatorKind::Url,
                "Obfuscated IP-based URL detected (potential malware host)",
                Severity::High,
            ));
        }

        if url_lower.contains("xn--") {
            total += PUNYCODE_POINTS as u32;
            indicators.push(Indicator::new(
                IndicatorKind::Url,
                "Punycode/Homograph attack signature detected",
                Severity::High,
            ));
        }
    }

    let score = total.min(100) as u8;

    Verdict {
        score,
        label: label_for_score(score),
        explanation: HEURISTIC_EXPLANATION.to_string(),
        indicators,
        grounding_links: None,
    }
}

/// First 30 characters of a URL for indicator descriptions
fn preview(url: &str) -> String {
    if url.chars().count() > 30 {
        let head: String = url.chars().take(30).collect();
        format!("{}...", head)
    } else {
        url.to_string()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::types::ThreatLevel;

    #[test]
    fn test_benign_text_scores_zero() {
        let verdict = score("Hi Team, the Q3 report is on the drive. Best, Sarah.");
        assert_eq!(verdict.score, 0);
        assert_eq!(verdict.label, ThreatLevel::Safe);
        assert!(verdict.indicators.is_empty());
        assert!(verdict.grounding_links.is_none());
    }

    #[test]
    fn test_phishing_with_ip_url_is_fraud() {
        let verdict = score("URGENT: verify your identity at http://192.168.1.1/login");

        // urgency 30 + credential 25 + url base 15 + ip host 30
        assert!(verdict.score >= 85, "score was {}", verdict.score);
        assert_eq!(verdict.label, ThreatLevel::Fraud);

        let kinds: Vec<_> = verdict.indicators.iter().map(|i| i.kind).collect();
        assert!(kinds.contains(&IndicatorKind::Behavior));
        assert!(kinds.contains(&IndicatorKind::Keyword));
        assert!(kinds.contains(&IndicatorKind::Url));
        assert!(verdict
            .indicators
            .iter()
            .any(|i| i.kind == IndicatorKind::Url && i.severity == Severity::High));
    }

    #[test]
    fn test_urgency_alone_is_suspicious() {
        let verdict = score("Immediate action required on your parcel");
        assert_eq!(verdict.score, 30);
        assert_eq!(verdict.label, ThreatLevel::Suspicious);
        assert_eq!(verdict.indicators.len(), 1);
        assert_eq!(verdict.indicators[0].kind, IndicatorKind::Behavior);
    }

    #[test]
    fn test_financial_solicitation() {
        let verdict = score("Send the bitcoin now");
        assert_eq!(verdict.score, 20);
        assert_eq!(verdict.label, ThreatLevel::Safe);
        assert_eq!(verdict.indicators[0].kind, IndicatorKind::Financial);
    }

    #[test]
    fn test_high_risk_tld_add_on() {
        let verdict = score("login at https://secure-bank.xyz/verify");
        // url base 15 + high-risk tld 20
        assert_eq!(verdict.score, 35);
        assert!(verdict
            .indicators
            .iter()
            .any(|i| i.description.contains("High-risk top-level domain")));
    }

    #[test]
    fn test_punycode_add_on() {
        let verdict = score("see https://xn--pple-43d.com/account");
        assert_eq!(verdict.score, 15 + 40);
        assert!(verdict
            .indicators
            .iter()
            .any(|i| i.description.contains("Punycode") && i.severity == Severity::High));
    }

    #[test]
    fn test_score_capped_at_100() {
        let verdict = score(
            "URGENT: account suspended, verify your identity, send bitcoin wire transfer to \
             http://192.168.1.1/a and https://xn--evil.xyz/b within 24 hours",
        );
        assert_eq!(verdict.score, 100);
        assert_eq!(verdict.label, ThreatLevel::Fraud);
    }

    #[test]
    fn test_plain_domain_url_base_points_only() {
        let verdict = score("docs at https://example.com/guide");
        assert_eq!(verdict.score, 15);
        assert_eq!(verdict.label, ThreatLevel::Safe);
        assert_eq!(verdict.indicators.len(), 1);
        assert_eq!(verdict.indicators[0].severity, Severity::Low);
    }

    #[test]
    fn test_deterministic() {
        let input = "URGENT: crypto payment to https://wallet.top/send";
        let a = score(input);
        let b = score(input);
        assert_eq!(a.score, b.score);
        assert_eq!(a.label, b.label);
        assert_eq!(a.indicators, b.indicators);
        assert_eq!(a.explanation, b.explanation);
    }

    #[test]
    fn test_explanation_discloses_fallback() {
        let verdict = score("anything");
        assert!(!verdict.explanation.is_empty());
        assert!(verdict.explanation.contains("heuristic"));
    }
}

//! Automation Dispatcher
//!
//! Inspects a finished analysis result and, above the configured risk
//! threshold, delivers an automation payload to the downstream workflow
//! webhook. Best-effort and fire-and-forget: delivery errors are logged and
//! swallowed, never propagated to the caller, and never invalidate the
//! analysis result.

use std::time::Duration;

use chrono::Utc;
use parking_lot::RwLock;

use crate::constants::{SOURCE_HEADER, SOURCE_HEADER_VALUE};

use super::config::AutomationConfig;
use super::types::{AnalysisResult, AutomationPayload};

/// Bounded in-memory attempt history
const MAX_HISTORY: usize = 100;

// ============================================================================
// STATUS & HISTORY
// ============================================================================

/// Outcome of one dispatch call. Informational only - never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchStatus {
    /// Score below threshold, no delivery attempted
    Skipped,
    Delivered,
    /// Delivery attempted and failed; logged and swallowed
    Failed,
}

/// One recorded dispatch attempt.
///
/// Holds ids and outcomes only - results and payloads are never retained.
#[derive(Debug, Clone)]
pub struct DispatchRecord {
    pub analysis_id: String,
    pub score: u8,
    pub status: DispatchStatus,
    pub timestamp: i64,
}

/// Aggregate dispatch counters
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct DispatchStats {
    pub attempted: usize,
    pub delivered: usize,
    pub failed: usize,
    pub skipped: usize,
}

// ============================================================================
// DISPATCHER
// ============================================================================

pub struct AutomationDispatcher {
    agent: ureq::Agent,
    config: AutomationConfig,
    history: RwLock<Vec<DispatchRecord>>,
}

impl AutomationDispatcher {
    pub fn new(config: AutomationConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build();

        Self {
            agent,
            config,
            history: RwLock::new(Vec::new()),
        }
    }

    /// Dispatch an automation payload for a finished result.
    ///
    /// Fires only when `score >= threshold`. Scores above the critical
    /// cut-off are flagged for expedited escalation in the log record.
    pub fn dispatch(&self, result: &AnalysisResult) -> DispatchStatus {
        if result.score < self.config.threshold {
            log::debug!(
                "Risk score ({}) below automation threshold ({})",
                result.score,
                self.config.threshold
            );
            self.record(result, DispatchStatus::Skipped);
            return DispatchStatus::Skipped;
        }

        let payload = AutomationPayload::from_result(result);

        if result.score > self.config.critical_threshold {
            log::warn!(
                "[ALERT] Critical threat detected (ID: {}, Label: {}) - expedited escalation",
                result.id,
                result.label
            );
        } else {
            log::info!(
                "Threat analysis {} over threshold - triggering automation workflow",
                result.id
            );
        }

        let status = self.deliver(&payload);
        self.record(result, status);
        status
    }

    /// POST the payload to the configured webhook.
    fn deliver(&self, payload: &AutomationPayload) -> DispatchStatus {
        let body = match serde_json::to_string(payload) {
            Ok(body) => body,
            Err(e) => {
                log::error!("Failed to serialize automation payload: {}", e);
                return DispatchStatus::Failed;
            }
        };

        let response = self
            .agent
            .post(&self.config.webhook_url)
            .set("Content-Type", "application/json")
            .set(SOURCE_HEADER, SOURCE_HEADER_VALUE)
            .send_string(&body);

        match response {
            Ok(resp) => {
                log::info!(
                    "Automation webhook triggered for {} ({})",
                    payload.analysis_id,
                    resp.status()
                );
                DispatchStatus::Delivered
            }
            Err(e) => {
                log::error!("Automation webhook delivery failed: {}", e);
                DispatchStatus::Failed
            }
        }
    }

    fn record(&self, result: &AnalysisResult, status: DispatchStatus) {
        let mut history = self.history.write();
        history.push(DispatchRecord {
            analysis_id: result.id.clone(),
            score: result.score,
            status,
            timestamp: Utc::now().timestamp(),
        });

        if history.len() > MAX_HISTORY {
            let excess = history.len() - MAX_HISTORY;
            history.drain(0..excess);
        }
    }

    /// Recorded attempts, oldest first.
    pub fn recent(&self) -> Vec<DispatchRecord> {
        self.history.read().clone()
    }

    /// Aggregate counters over the recorded history.
    pub fn stats(&self) -> DispatchStats {
        let history = self.history.read();

        let mut stats = DispatchStats {
            attempted: 0,
            delivered: 0,
            failed: 0,
            skipped: 0,
        };

        for record in history.iter() {
            match record.status {
                DispatchStatus::Skipped => stats.skipped += 1,
                DispatchStatus::Delivered => {
                    stats.attempted += 1;
                    stats.delivered += 1;
                }
                DispatchStatus::Failed => {
                    stats.attempted += 1;
                    stats.failed += 1;
                }
            }
        }

        stats
    }
}

// ============================================================================
// TESTS
// ============================================================================

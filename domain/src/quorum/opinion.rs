//! Opinion: one judge's structured answer for one request

use super::decision::Decision;
use crate::core::judge::JudgeId;
use serde::{Deserialize, Serialize};

/// Failure reason recorded when a judge misses its deadline
pub const FAILURE_TIMEOUT: &str = "timeout";

/// Failure reason recorded when the verification is cancelled
pub const FAILURE_CANCELLED: &str = "cancelled";

/// A single judge's opinion in a verification
///
/// Exactly one opinion exists per dispatched judge, even when the judge
/// failed. Failed opinions are always `uncertain` with zero confidence.
///
/// # Example
///
/// ```
/// use veriquorum_domain::{Decision, JudgeId, Opinion};
///
/// let judge = JudgeId::try_new("judge-a").unwrap();
/// let opinion = Opinion::new(judge.clone(), Decision::Fake, 0.8, "Doctored quote");
/// assert!(opinion.is_successful());
///
/// let failed = Opinion::failed(judge, "timeout");
/// assert!(!failed.is_successful());
/// assert_eq!(failed.confidence, 0.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opinion {
    /// Judge that produced this opinion
    pub judge_id: JudgeId,
    pub decision: Decision,
    /// Confidence in `[0, 1]`
    pub confidence: f64,
    pub reasoning: String,
    /// Supporting evidence, in the order the judge listed it
    pub evidence: Vec<String>,
    /// Whether the judge failed to produce a usable answer
    pub failed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
}

impl Opinion {
    /// Create a successful opinion; confidence is clamped into `[0, 1]`
    pub fn new(
        judge_id: JudgeId,
        decision: Decision,
        confidence: f64,
        reasoning: impl Into<String>,
    ) -> Self {
        Self {
            judge_id,
            decision,
            confidence: clamp_confidence(confidence),
            reasoning: reasoning.into(),
            evidence: Vec::new(),
            failed: false,
            failure_reason: None,
        }
    }

    /// Placeholder opinion for a judge that timed out, errored or was cancelled
    pub fn failed(judge_id: JudgeId, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        Self {
            reasoning: format!("Judge {} failed: {}", judge_id, reason),
            judge_id,
            decision: Decision::Uncertain,
            confidence: 0.0,
            evidence: Vec::new(),
            failed: true,
            failure_reason: Some(reason),
        }
    }

    /// Placeholder opinion for a judge that missed its deadline
    pub fn timed_out(judge_id: JudgeId) -> Self {
        Self::failed(judge_id, FAILURE_TIMEOUT)
    }

    pub fn with_evidence(mut self, evidence: Vec<String>) -> Self {
        self.evidence = evidence;
        self
    }

    /// Counts towards the quorum: not failed and carries some confidence
    pub fn is_successful(&self) -> bool {
        !self.failed && self.confidence > 0.0
    }

    /// Whether the judge missed its deadline
    pub fn is_timeout(&self) -> bool {
        self.failure_reason.as_deref() == Some(FAILURE_TIMEOUT)
    }

    /// Why this opinion is excluded from the tally, if it is
    pub fn exclusion_reason(&self) -> Option<&str> {
        if self.failed {
            Some(self.failure_reason.as_deref().unwrap_or("unknown failure"))
        } else if self.confidence <= 0.0 {
            Some("zero confidence")
        } else {
            None
        }
    }

    /// Serialize into the JSON shape judges are asked to answer with
    ///
    /// Feeding this back through the strict parser yields an equivalent opinion.
    pub fn to_canonical_json(&self) -> String {
        serde_json::json!({
            "decision": self.decision,
            "confidence": self.confidence,
            "reasoning": self.reasoning,
            "evidence": self.evidence,
        })
        .to_string()
    }
}

/// Clamp a confidence into `[0, 1]`, mapping NaN to zero
pub(crate) fn clamp_confidence(confidence: f64) -> f64 {
    if confidence.is_nan() {
        0.0
    } else {
        confidence.clamp(0.0, 1.0)
    }
}

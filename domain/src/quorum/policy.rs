//! Consensus policy: the tunable thresholds of verdict aggregation

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Default minimum number of successful judges
pub const DEFAULT_MIN_QUORUM: usize = 2;

/// Default confidence a supporter needs for its class to win
pub const DEFAULT_MIN_CONFIDENCE_THRESHOLD: f64 = 0.6;

/// Thresholds used by the consensus aggregator
///
/// Both values are empirical; they are configuration, not law.
///
/// # Example
///
/// ```
/// use veriquorum_domain::ConsensusPolicy;
///
/// let policy = ConsensusPolicy::default();
/// assert!(policy.quorum_met(2));
/// assert!(!policy.quorum_met(1));
/// assert!(policy.is_high_confidence(0.6));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsensusPolicy {
    /// Minimum successful opinions before a non-uncertain decision is possible
    pub min_quorum: usize,
    /// Confidence at or above which an opinion can back a winning class
    pub min_confidence_threshold: f64,
}

impl Default for ConsensusPolicy {
    fn default() -> Self {
        Self {
            min_quorum: DEFAULT_MIN_QUORUM,
            min_confidence_threshold: DEFAULT_MIN_CONFIDENCE_THRESHOLD,
        }
    }
}

impl ConsensusPolicy {
    /// Create a validated policy
    pub fn new(min_quorum: usize, min_confidence_threshold: f64) -> Result<Self, DomainError> {
        let policy = Self {
            min_quorum,
            min_confidence_threshold,
        };
        policy.validate()?;
        Ok(policy)
    }

    pub fn with_min_quorum(mut self, min_quorum: usize) -> Self {
        self.min_quorum = min_quorum;
        self
    }

    pub fn with_min_confidence_threshold(mut self, threshold: f64) -> Self {
        self.min_confidence_threshold = threshold;
        self
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.min_quorum == 0 {
            return Err(DomainError::InvalidPolicy(
                "min_quorum must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.min_confidence_threshold) {
            return Err(DomainError::InvalidPolicy(format!(
                "min_confidence_threshold must be within [0, 1], got {}",
                self.min_confidence_threshold
            )));
        }
        Ok(())
    }

    /// Whether `successful` opinions are enough to aggregate
    pub fn quorum_met(&self, successful: usize) -> bool {
        successful >= self.min_quorum.max(1)
    }

    /// Whether an opinion with this confidence can back a winning class
    pub fn is_high_confidence(&self, confidence: f64) -> bool {
        confidence >= self.min_confidence_threshold
    }

    /// Human-readable description of this policy
    pub fn description(&self) -> String {
        format!(
            "quorum of {} successful judges, supporter confidence >= {:.2}",
            self.min_quorum, self.min_confidence_threshold
        )
    }
}

impl std::fmt::Display for ConsensusPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

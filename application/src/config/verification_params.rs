//! Verification parameters: dispatch and decision knobs.
//!
//! [`VerificationParams`] groups the static parameters that control one run
//! of [`VerifyContentUseCase`](crate::use_cases::verify_content::VerifyContentUseCase):
//! how long each judge may take, how the panel decides, and how a fake
//! verdict is rewarded.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use veriquorum_domain::{ConsensusPolicy, DomainError, RewardPolicy};

/// Default per-judge deadline
pub const DEFAULT_JUDGE_DEADLINE: Duration = Duration::from_secs(45);

/// Dispatch and decision parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationParams {
    /// Wall-clock limit for a single judge call.
    pub judge_deadline: Duration,
    /// Quorum and confidence thresholds.
    pub policy: ConsensusPolicy,
    /// Reward formula for fake verdicts.
    pub reward: RewardPolicy,
}

impl Default for VerificationParams {
    fn default() -> Self {
        Self {
            judge_deadline: DEFAULT_JUDGE_DEADLINE,
            policy: ConsensusPolicy::default(),
            reward: RewardPolicy::default(),
        }
    }
}

impl VerificationParams {
    // ==================== Builder Methods ====================

    pub fn with_judge_deadline(mut self, deadline: Duration) -> Self {
        self.judge_deadline = deadline;
        self
    }

    pub fn with_policy(mut self, policy: ConsensusPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_reward(mut self, reward: RewardPolicy) -> Self {
        self.reward = reward;
        self
    }

    /// Reject parameters no verification could run with
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.judge_deadline.is_zero() {
            return Err(DomainError::InvalidPolicy(
                "judge deadline must be greater than zero".to_string(),
            ));
        }
        self.policy.validate()
    }
}

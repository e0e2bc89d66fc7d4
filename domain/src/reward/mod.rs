//! Reward scaling for confirmed fakes
//!
//! A reporter who flags content that the panel judges `fake` receives a
//! reward that grows with how widely the content spread. Pure arithmetic,
//! no state.

pub mod popularity;

use crate::quorum::Verdict;
use serde::{Deserialize, Serialize};

pub use popularity::estimate_popularity;

/// Knobs of the reward formula
///
/// `reward = min(max_reward, base_fee * (1 + popularity * (max_multiplier - 1)))`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardPolicy {
    pub base_fee: f64,
    /// Multiplier applied at popularity 1.0
    pub max_multiplier: f64,
    /// Hard cap on any single reward
    pub max_reward: f64,
}

impl Default for RewardPolicy {
    fn default() -> Self {
        Self {
            base_fee: 0.05,
            max_multiplier: 5.0,
            max_reward: 1.0,
        }
    }
}

/// Reward computed for one fake verdict
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RewardAssessment {
    /// Popularity used, clamped into `[0, 1]`
    pub popularity: f64,
    pub multiplier: f64,
    pub reward: f64,
}

impl RewardPolicy {
    /// Multiplier for a popularity score, between 1 and `max_multiplier`
    pub fn multiplier(&self, popularity: f64) -> f64 {
        1.0 + clamp_unit(popularity) * (self.max_multiplier - 1.0)
    }

    /// Scale the base fee by popularity, capped at `max_reward`
    ///
    /// ```
    /// use veriquorum_domain::RewardPolicy;
    ///
    /// let policy = RewardPolicy::default();
    /// assert!((policy.scale(0.0) - 0.05).abs() < 1e-12);
    /// assert!((policy.scale(1.0) - 0.25).abs() < 1e-12);
    /// ```
    pub fn scale(&self, popularity: f64) -> f64 {
        (self.base_fee * self.multiplier(popularity)).min(self.max_reward)
    }

    /// Reward for a verdict: only `fake` verdicts earn one
    pub fn assess(&self, verdict: &Verdict, popularity: f64) -> Option<RewardAssessment> {
        if !verdict.is_fake() {
            return None;
        }
        let popularity = clamp_unit(popularity);
        Some(RewardAssessment {
            popularity,
            multiplier: self.multiplier(popularity),
            reward: self.scale(popularity),
        })
    }
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

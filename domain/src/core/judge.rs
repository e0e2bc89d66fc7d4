//! Judge identity value object

use serde::{Deserialize, Serialize};

/// Identity of one independent opinion source (Value Object)
///
/// Usually the backend model name (e.g. `"z-ai/glm-4.5-air:free"`), but any
/// non-empty label works: the core never interprets it beyond display.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JudgeId(String);

impl JudgeId {
    /// Create a judge id, returning `None` for an empty or blank label
    pub fn try_new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// Get the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short display name for compact output
    ///
    /// E.g., "mistralai/mistral-small-3.2-24b-instruct:free" -> "mistral-small-3.2-24b-instruct"
    pub fn short_name(&self) -> &str {
        let tail = self.0.rsplit('/').next().unwrap_or(&self.0);
        tail.split(':').next().unwrap_or(tail)
    }

    /// The panel consulted when no judges are configured
    pub fn default_panel() -> Vec<JudgeId> {
        [
            "nvidia/nemotron-nano-9b-v2:free",
            "z-ai/glm-4.5-air:free",
            "mistralai/mistral-small-3.2-24b-instruct:free",
            "cognitivecomputations/dolphin-mistral-24b-venice-edition:free",
            "moonshotai/kimi-dev-72b:free",
        ]
        .into_iter()
        .map(|id| JudgeId(id.to_string()))
        .collect()
    }
}

impl std::fmt::Display for JudgeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for JudgeId {
    type Err = crate::core::error::DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JudgeId::try_new(s).ok_or_else(|| {
            crate::core::error::DomainError::InvalidJudge("judge id cannot be empty".to_string())
        })
    }
}

//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod dispatch;
mod judges;
mod logging;
mod output;
mod provider;

pub use dispatch::FileDispatchConfig;
pub use judges::FileJudgesConfig;
pub use logging::FileLoggingConfig;
pub use output::FileOutputConfig;
pub use provider::{DEFAULT_API_KEY_ENV, DEFAULT_BASE_URL, FileProviderConfig};

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use veriquorum_application::VerificationParams;
use veriquorum_domain::{ConsensusPolicy, RewardPolicy};

/// Configuration validation errors
#[derive(Debug, Error, PartialEq)]
pub enum ConfigValidationError {
    #[error("dispatch.deadline_seconds cannot be 0")]
    InvalidDeadline,

    #[error("judge model name cannot be empty")]
    EmptyModelName,

    #[error("invalid consensus settings: {0}")]
    InvalidConsensus(String),

    #[error("reward.{0} cannot be negative")]
    NegativeReward(&'static str),

    #[error("provider.base_url cannot be empty")]
    EmptyBaseUrl,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Judge panel
    pub judges: FileJudgesConfig,
    /// Chat completions endpoint shared by all judges
    pub provider: FileProviderConfig,
    /// Quorum and confidence thresholds (uses domain type)
    pub consensus: ConsensusPolicy,
    /// Per-judge deadline
    pub dispatch: FileDispatchConfig,
    /// Reward formula (uses domain type)
    pub reward: RewardPolicy,
    /// Output settings
    pub output: FileOutputConfig,
    /// Audit log settings
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.dispatch.deadline_seconds == 0 {
            return Err(ConfigValidationError::InvalidDeadline);
        }

        if self.judges.models.iter().any(|m| m.trim().is_empty()) {
            return Err(ConfigValidationError::EmptyModelName);
        }

        self.consensus
            .validate()
            .map_err(|e| ConfigValidationError::InvalidConsensus(e.to_string()))?;

        let reward = &self.reward;
        for (name, value) in [
            ("base_fee", reward.base_fee),
            ("max_multiplier", reward.max_multiplier),
            ("max_reward", reward.max_reward),
        ] {
            if value.is_nan() || value < 0.0 {
                return Err(ConfigValidationError::NegativeReward(name));
            }
        }

        if self.provider.base_url.trim().is_empty() {
            return Err(ConfigValidationError::EmptyBaseUrl);
        }

        Ok(())
    }

    /// Validate and convert into the parameters the use case runs with
    pub fn to_verification_params(&self) -> Result<VerificationParams, ConfigValidationError> {
        self.validate()?;
        Ok(VerificationParams::default()
            .with_judge_deadline(Duration::from_secs(self.dispatch.deadline_seconds))
            .with_policy(self.consensus)
            .with_reward(self.reward))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use veriquorum_domain::OutputFormat;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[judges]
models = ["openai/gpt-4o-mini", "z-ai/glm-4.5-air:free"]

[provider]
base_url = "http://localhost:8080/v1"
api_key_env = "LOCAL_KEY"
temperature = 0.2
max_tokens = 512

[consensus]
min_quorum = 3
min_confidence_threshold = 0.75

[dispatch]
deadline_seconds = 20

[reward]
base_fee = 0.1

[output]
format = "json"
color = false

[logging]
verdict_log = "verdicts.jsonl"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.judges.models.len(), 2);
        assert_eq!(config.provider.base_url, "http://localhost:8080/v1");
        assert_eq!(config.provider.max_tokens, 512);
        assert_eq!(config.consensus.min_quorum, 3);
        assert_eq!(config.consensus.min_confidence_threshold, 0.75);
        assert_eq!(config.dispatch.deadline_seconds, 20);
        assert_eq!(config.reward.base_fee, 0.1);
        // Unset reward knobs keep their defaults
        assert_eq!(config.reward.max_multiplier, 5.0);
        assert_eq!(config.output.format, Some(OutputFormat::Json));
        assert!(!config.output.color);
        assert_eq!(
            config.logging.verdict_log,
            Some(std::path::PathBuf::from("verdicts.jsonl"))
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[consensus]
min_quorum = 1
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.consensus.min_quorum, 1);
        assert_eq!(config.consensus.min_confidence_threshold, 0.6);
        assert_eq!(config.dispatch.deadline_seconds, 45);
        assert!(config.judges.models.is_empty());
        assert!(config.output.color);
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = FileConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.judges.judge_ids().unwrap().len(), 5);
    }

    #[test]
    fn test_validate_zero_deadline() {
        let config: FileConfig = toml::from_str("[dispatch]\ndeadline_seconds = 0\n").unwrap();
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::InvalidDeadline)
        );
    }

    #[test]
    fn test_validate_empty_model_name() {
        let config: FileConfig =
            toml::from_str("[judges]\nmodels = [\"a/b\", \"\"]\n").unwrap();
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::EmptyModelName)
        );
        assert!(config.judges.judge_ids().is_none());
    }

    #[test]
    fn test_validate_zero_quorum() {
        let config: FileConfig = toml::from_str("[consensus]\nmin_quorum = 0\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidConsensus(_))
        ));
    }

    #[test]
    fn test_validate_threshold_out_of_range() {
        let config: FileConfig =
            toml::from_str("[consensus]\nmin_confidence_threshold = 1.2\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidConsensus(_))
        ));
    }

    #[test]
    fn test_validate_negative_reward() {
        let config: FileConfig = toml::from_str("[reward]\nmax_reward = -1.0\n").unwrap();
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::NegativeReward("max_reward"))
        );
    }

    #[test]
    fn test_to_verification_params() {
        let config: FileConfig = toml::from_str(
            "[dispatch]\ndeadline_seconds = 10\n[consensus]\nmin_quorum = 3\n",
        )
        .unwrap();
        let params = config.to_verification_params().unwrap();
        assert_eq!(params.judge_deadline, Duration::from_secs(10));
        assert_eq!(params.policy.min_quorum, 3);
        assert_eq!(params.reward, RewardPolicy::default());
    }
}

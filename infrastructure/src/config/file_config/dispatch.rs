//! Dispatch configuration from TOML (`[dispatch]` section)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDispatchConfig {
    /// Per-judge deadline in seconds
    pub deadline_seconds: u64,
}

impl Default for FileDispatchConfig {
    fn default() -> Self {
        Self {
            deadline_seconds: 45,
        }
    }
}

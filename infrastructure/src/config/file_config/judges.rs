//! Judge panel configuration from TOML (`[judges]` section)

use serde::{Deserialize, Serialize};
use veriquorum_domain::JudgeId;

/// Raw judge panel configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileJudgesConfig {
    /// Model identifiers, one judge each. Empty means the built-in panel.
    pub models: Vec<String>,
}

impl FileJudgesConfig {
    /// Resolve the panel, falling back to the built-in defaults when empty
    ///
    /// Returns `None` if any configured name is blank.
    pub fn judge_ids(&self) -> Option<Vec<JudgeId>> {
        if self.models.is_empty() {
            return Some(JudgeId::default_panel());
        }
        self.models.iter().map(JudgeId::try_new).collect()
    }
}

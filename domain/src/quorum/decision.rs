//! Decision classes a judge (and the panel) can reach

use serde::{Deserialize, Serialize};

/// Authenticity decision for one piece of content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Authentic,
    Fake,
    #[default]
    Uncertain,
}

impl Decision {
    /// All decision classes, in tally order
    pub const ALL: [Decision; 3] = [Decision::Authentic, Decision::Fake, Decision::Uncertain];

    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Authentic => "authentic",
            Decision::Fake => "fake",
            Decision::Uncertain => "uncertain",
        }
    }

    /// Parse a judge-supplied label, falling back to `Uncertain` for anything unknown
    pub fn from_label(label: &str) -> Self {
        label.parse().unwrap_or(Decision::Uncertain)
    }

    pub fn is_uncertain(&self) -> bool {
        matches!(self, Decision::Uncertain)
    }

    /// Index into per-class arrays (see [`Decision::ALL`])
    pub(crate) fn index(&self) -> usize {
        match self {
            Decision::Authentic => 0,
            Decision::Fake => 1,
            Decision::Uncertain => 2,
        }
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Decision {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "authentic" => Ok(Decision::Authentic),
            "fake" => Ok(Decision::Fake),
            "uncertain" => Ok(Decision::Uncertain),
            other => Err(format!(
                "Unknown decision: {}. Valid: authentic, fake, uncertain",
                other
            )),
        }
    }
}

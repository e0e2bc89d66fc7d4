//! Verdict: the aggregated answer for one verification

use super::consensus::{Resolution, Tally};
use super::decision::Decision;
use super::opinion::Opinion;
use serde::{Deserialize, Serialize};

/// Final result of a verification
///
/// Built exactly once by [`aggregate`](super::consensus::aggregate) and
/// never mutated. `opinions` holds one entry per dispatched judge, in
/// dispatch order, failed ones included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub decision: Decision,
    /// Mean confidence of the judges aligned with the decision
    pub confidence: f64,
    /// Share of successful judges in the larger authentic/fake camp
    pub consensus_score: f64,
    pub quorum_met: bool,
    pub resolution: Resolution,
    pub tally: Tally,
    pub opinions: Vec<Opinion>,
    /// Human-readable explanation, always present
    pub rationale: String,
}

impl Verdict {
    pub fn is_fake(&self) -> bool {
        self.decision == Decision::Fake
    }

    /// Opinions that counted towards the quorum
    pub fn successful_opinions(&self) -> impl Iterator<Item = &Opinion> {
        self.opinions.iter().filter(|o| o.is_successful())
    }

    /// Opinions excluded from the tally
    pub fn failed_opinions(&self) -> impl Iterator<Item = &Opinion> {
        self.opinions.iter().filter(|o| !o.is_successful())
    }

    /// Judges whose successful opinion matches the final decision
    pub fn agreeing_judges(&self) -> impl Iterator<Item = &Opinion> {
        self.successful_opinions()
            .filter(move |o| o.decision == self.decision)
    }

    /// Generate a visual summary of the panel (e.g., "[FFA?x]")
    ///
    /// `A` authentic, `F` fake, `?` uncertain, `x` failed.
    pub fn panel_summary(&self) -> String {
        let mut summary = String::from("[");
        for opinion in &self.opinions {
            summary.push(if !opinion.is_successful() {
                'x'
            } else {
                match opinion.decision {
                    Decision::Authentic => 'A',
                    Decision::Fake => 'F',
                    Decision::Uncertain => '?',
                }
            });
        }
        summary.push(']');
        summary
    }
}

//! Consensus aggregation
//!
//! Turns the opinions of one verification into a [`Verdict`]:
//!
//! 1. Drop failed and zero-confidence opinions, gate on quorum.
//! 2. Tally count and summed confidence per decision class.
//! 3. A strict confidence-weighted leader (authentic or fake) wins if at
//!    least one of its judges is high-confidence; otherwise the verdict is
//!    uncertain.
//! 4. Without a usable weighted leader, a strict vote-count leader wins
//!    under the same high-confidence condition.
//! 5. Anything else (ties, uncertain leading) is uncertain.

use super::decision::Decision;
use super::opinion::{Opinion, clamp_confidence};
use super::policy::ConsensusPolicy;
use super::rationale::build_rationale;
use super::verdict::Verdict;
use serde::{Deserialize, Serialize};

/// Count and summed confidence of one decision class
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassTally {
    pub count: usize,
    pub weight: f64,
}

/// Per-class tallies over the successful opinions of one verification
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Tally {
    pub authentic: ClassTally,
    pub fake: ClassTally,
    pub uncertain: ClassTally,
    /// Opinions that count towards the quorum
    pub successful: usize,
    /// All opinions, failed ones included
    pub total: usize,
}

impl Tally {
    /// Tally the successful opinions; failed ones only count towards `total`
    pub fn from_opinions(opinions: &[Opinion]) -> Self {
        let mut tally = Tally {
            total: opinions.len(),
            ..Tally::default()
        };
        for opinion in opinions.iter().filter(|o| o.is_successful()) {
            let class = tally.class_mut(opinion.decision);
            class.count += 1;
            class.weight += opinion.confidence;
            tally.successful += 1;
        }
        tally
    }

    pub fn class(&self, decision: Decision) -> &ClassTally {
        match decision {
            Decision::Authentic => &self.authentic,
            Decision::Fake => &self.fake,
            Decision::Uncertain => &self.uncertain,
        }
    }

    fn class_mut(&mut self, decision: Decision) -> &mut ClassTally {
        match decision {
            Decision::Authentic => &mut self.authentic,
            Decision::Fake => &mut self.fake,
            Decision::Uncertain => &mut self.uncertain,
        }
    }

    pub fn count(&self, decision: Decision) -> usize {
        self.class(decision).count
    }

    pub fn weight(&self, decision: Decision) -> f64 {
        self.class(decision).weight
    }

    pub fn failed(&self) -> usize {
        self.total - self.successful
    }

    /// Class whose summed confidence strictly exceeds both others
    pub fn weighted_leader(&self) -> Option<Decision> {
        strict_leader(Decision::ALL.map(|d| self.weight(d)))
    }

    /// Class whose count strictly exceeds both others
    pub fn count_leader(&self) -> Option<Decision> {
        strict_leader(Decision::ALL.map(|d| self.count(d)))
    }

    /// Share of successful judges in the larger of the authentic / fake camps
    pub fn consensus_score(&self) -> f64 {
        if self.successful == 0 {
            return 0.0;
        }
        let majority = self.authentic.count.max(self.fake.count);
        majority as f64 / self.successful as f64
    }
}

fn strict_leader<T: PartialOrd + Copy>(values: [T; 3]) -> Option<Decision> {
    Decision::ALL.into_iter().find(|d| {
        let i = d.index();
        values
            .iter()
            .enumerate()
            .all(|(j, v)| j == i || values[i] > *v)
    })
}

/// Tally that produced a majority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MajorityRule {
    /// Summed confidence per class
    Weighted,
    /// Number of judges per class
    Count,
}

impl MajorityRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            MajorityRule::Weighted => "confidence-weighted",
            MajorityRule::Count => "vote-count",
        }
    }
}

/// How the final decision was reached
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Resolution {
    /// Too few successful judges to aggregate
    InsufficientQuorum {
        successful: usize,
        total: usize,
        required: usize,
    },
    /// A class won and has a high-confidence supporter
    Majority { decision: Decision, rule: MajorityRule },
    /// A class led but none of its judges was confident enough
    LowConfidenceMajority { candidate: Decision, rule: MajorityRule },
    /// The leading class was `uncertain` itself
    UncertainMajority,
    /// No class strictly led by weight or count
    NoMajority,
}

impl Resolution {
    /// Final decision implied by this resolution
    pub fn decision(&self) -> Decision {
        match self {
            Resolution::Majority { decision, .. } => *decision,
            _ => Decision::Uncertain,
        }
    }

    pub fn quorum_met(&self) -> bool {
        !matches!(self, Resolution::InsufficientQuorum { .. })
    }

    /// One-sentence explanation of the decision, used in the rationale
    pub fn explain(&self, policy: &ConsensusPolicy) -> String {
        match self {
            Resolution::InsufficientQuorum {
                successful,
                total,
                required,
            } => format!(
                "Insufficient successful judge responses ({}/{}). Need at least {} successful judges for reliable consensus.",
                successful, total, required
            ),
            Resolution::Majority { decision, rule } => format!(
                "{} majority for {}, backed by at least one judge with confidence >= {:.2}.",
                capitalize(rule.as_str()),
                decision,
                policy.min_confidence_threshold
            ),
            Resolution::LowConfidenceMajority { candidate, rule } => format!(
                "{} majority leaned {}, but no judge in that class reached confidence {:.2}; low-confidence majority treated as uncertain.",
                capitalize(rule.as_str()),
                candidate,
                policy.min_confidence_threshold
            ),
            Resolution::UncertainMajority => {
                "Most judges answered uncertain; no authentic or fake majority.".to_string()
            }
            Resolution::NoMajority => {
                "No decision class holds a strict majority by confidence weight or vote count (tie); treated as uncertain.".to_string()
            }
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Aggregate the opinions of one verification into a verdict.
///
/// Total: every input, including an empty one, yields a verdict. The
/// opinions are moved into the verdict unchanged and in order.
///
/// # Example
///
/// ```
/// use veriquorum_domain::{aggregate, ConsensusPolicy, Decision, JudgeId, Opinion};
///
/// let judge = |id: &str| JudgeId::try_new(id).unwrap();
/// let opinions = vec![
///     Opinion::new(judge("a"), Decision::Fake, 0.8, "edited"),
///     Opinion::new(judge("b"), Decision::Fake, 0.7, "no source"),
///     Opinion::new(judge("c"), Decision::Authentic, 0.9, "looks fine"),
/// ];
///
/// let verdict = aggregate(opinions, &ConsensusPolicy::default());
/// assert_eq!(verdict.decision, Decision::Fake);
/// assert!(verdict.quorum_met);
/// ```
pub fn aggregate(opinions: Vec<Opinion>, policy: &ConsensusPolicy) -> Verdict {
    let tally = Tally::from_opinions(&opinions);
    let resolution = resolve(&opinions, &tally, policy);
    let decision = resolution.decision();

    let (confidence, consensus_score) = if resolution.quorum_met() {
        (
            verdict_confidence(&opinions, decision),
            tally.consensus_score(),
        )
    } else {
        (0.0, 0.0)
    };

    let rationale = build_rationale(decision, &resolution, &tally, &opinions, policy);

    Verdict {
        decision,
        confidence,
        consensus_score,
        quorum_met: resolution.quorum_met(),
        resolution,
        tally,
        opinions,
        rationale,
    }
}

fn resolve(opinions: &[Opinion], tally: &Tally, policy: &ConsensusPolicy) -> Resolution {
    if !policy.quorum_met(tally.successful) {
        return Resolution::InsufficientQuorum {
            successful: tally.successful,
            total: tally.total,
            required: policy.min_quorum.max(1),
        };
    }

    let backed = |decision: Decision| {
        opinions.iter().any(|o| {
            o.is_successful() && o.decision == decision && policy.is_high_confidence(o.confidence)
        })
    };
    let settle = |decision: Decision, rule: MajorityRule| {
        if backed(decision) {
            Resolution::Majority { decision, rule }
        } else {
            Resolution::LowConfidenceMajority {
                candidate: decision,
                rule,
            }
        }
    };

    match tally.weighted_leader() {
        Some(leader) if !leader.is_uncertain() => settle(leader, MajorityRule::Weighted),
        _ => match tally.count_leader() {
            Some(leader) if !leader.is_uncertain() => settle(leader, MajorityRule::Count),
            Some(_) => Resolution::UncertainMajority,
            None => Resolution::NoMajority,
        },
    }
}

/// Mean confidence of the judges aligned with `decision`, falling back to
/// the mean over all successful judges when none are aligned
fn verdict_confidence(opinions: &[Opinion], decision: Decision) -> f64 {
    let successful: Vec<&Opinion> = opinions.iter().filter(|o| o.is_successful()).collect();
    let aligned: Vec<f64> = successful
        .iter()
        .filter(|o| o.decision == decision)
        .map(|o| o.confidence)
        .collect();

    let mean = if aligned.is_empty() {
        mean(successful.iter().map(|o| o.confidence))
    } else {
        mean(aligned.into_iter())
    };
    clamp_confidence(mean)
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    if n == 0 { 0.0 } else { sum / n as f64 }
}

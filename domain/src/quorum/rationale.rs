//! Rationale text attached to every verdict

use super::consensus::{Resolution, Tally};
use super::decision::Decision;
use super::opinion::Opinion;
use super::policy::ConsensusPolicy;

/// Assemble the human-readable rationale for a verdict.
///
/// Sections: final decision and why, per-class counts and weights, failed
/// judges with their reasons, then one entry per successful judge flagged as
/// agreeing or disagreeing with the decision.
pub fn build_rationale(
    decision: Decision,
    resolution: &Resolution,
    tally: &Tally,
    opinions: &[Opinion],
    policy: &ConsensusPolicy,
) -> String {
    let mut parts = vec![
        format!("Group Decision: {}", decision.as_str().to_uppercase()),
        format!("Reason: {}", resolution.explain(policy)),
        format!(
            "Consensus: {} fake, {} authentic, {} uncertain",
            tally.fake.count, tally.authentic.count, tally.uncertain.count
        ),
        format!("Successful Judges: {}/{}", tally.successful, tally.total),
        format!(
            "Confidence Weighted: Fake {:.2}, Authentic {:.2}, Uncertain {:.2}",
            tally.fake.weight, tally.authentic.weight, tally.uncertain.weight
        ),
    ];

    let failed: Vec<&Opinion> = opinions.iter().filter(|o| !o.is_successful()).collect();
    if !failed.is_empty() {
        parts.push(format!("\nFailed Judges: {}", failed.len()));
        for opinion in failed {
            parts.push(format!(
                "- {}: {}",
                opinion.judge_id,
                opinion.exclusion_reason().unwrap_or("unknown failure")
            ));
        }
    }

    let successful: Vec<&Opinion> = opinions.iter().filter(|o| o.is_successful()).collect();
    if !successful.is_empty() {
        parts.push("\nIndividual Judge Analysis:".to_string());
        for opinion in successful {
            let stance = if opinion.decision == decision {
                "agrees"
            } else {
                "disagrees"
            };
            parts.push(format!(
                "\n[{}] {}: {} (confidence: {:.2})",
                stance,
                opinion.judge_id,
                opinion.decision.as_str().to_uppercase(),
                opinion.confidence
            ));
            parts.push(format!("Reasoning: {}", opinion.reasoning));
            if !opinion.evidence.is_empty() {
                parts.push(format!("Evidence: {}", opinion.evidence.join(", ")));
            }
        }
    }

    parts.join("\n")
}

#[cfg(test)]
mod tests {
    use crate::core::judge::JudgeId;
    use crate::quorum::{ConsensusPolicy, Decision, Opinion, aggregate};

    fn judge(id: &str) -> JudgeId {
        JudgeId::try_new(id).unwrap()
    }

    #[test]
    fn test_rationale_sections() {
        let opinions = vec![
            Opinion::new(judge("judge-a"), Decision::Fake, 0.8, "Photo is from 2015")
                .with_evidence(vec!["Reverse image match".into(), "Date mismatch".into()]),
            Opinion::new(judge("judge-b"), Decision::Fake, 0.7, "No outlet reported it"),
            Opinion::new(judge("judge-c"), Decision::Authentic, 0.9, "Looks plausible"),
            Opinion::failed(judge("judge-d"), "HTTP 502"),
        ];
        let verdict = aggregate(opinions, &ConsensusPolicy::default());
        let r = &verdict.rationale;

        assert!(r.starts_with("Group Decision: FAKE"));
        assert!(r.contains("Consensus: 2 fake, 1 authentic, 0 uncertain"));
        assert!(r.contains("Successful Judges: 3/4"));
        assert!(r.contains("Confidence Weighted: Fake 1.50, Authentic 0.90"));
        assert!(r.contains("Failed Judges: 1\n- judge-d: HTTP 502"));
        assert!(r.contains("[agrees] judge-a: FAKE (confidence: 0.80)"));
        assert!(r.contains("[disagrees] judge-c: AUTHENTIC (confidence: 0.90)"));
        assert!(r.contains("Evidence: Reverse image match, Date mismatch"));
    }

    #[test]
    fn test_uncertain_is_always_explained() {
        let quorum_miss = aggregate(
            vec![Opinion::timed_out(judge("a")), Opinion::timed_out(judge("b"))],
            &ConsensusPolicy::default(),
        );
        assert!(quorum_miss.rationale.contains("Insufficient successful judge responses (0/2)"));
        assert!(quorum_miss.rationale.contains("- a: timeout"));

        let tie = aggregate(
            vec![
                Opinion::new(judge("a"), Decision::Fake, 0.8, "r"),
                Opinion::new(judge("b"), Decision::Authentic, 0.8, "r"),
            ],
            &ConsensusPolicy::default(),
        );
        assert!(tie.rationale.contains("tie"));

        let weak = aggregate(
            vec![
                Opinion::new(judge("a"), Decision::Fake, 0.4, "r"),
                Opinion::new(judge("b"), Decision::Fake, 0.4, "r"),
            ],
            &ConsensusPolicy::default(),
        );
        assert!(weak.rationale.contains("low-confidence majority"));
    }
}

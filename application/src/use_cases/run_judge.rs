//! Judge task runner
//!
//! Runs one judge under a deadline and always comes back with an
//! [`Opinion`]: a parsed answer, or a failure placeholder saying why there
//! is none. Nothing a judge does can fail the verification as a whole.

use crate::ports::judge_client::{JudgeClient, JudgeError};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use veriquorum_domain::quorum::FAILURE_CANCELLED;
use veriquorum_domain::{JudgePrompt, Opinion, parse_opinion_with_tier};

/// Runs a single judge call with a deadline and optional cancellation
#[derive(Debug, Clone)]
pub struct JudgeTaskRunner {
    deadline: Duration,
    cancellation: Option<CancellationToken>,
}

impl JudgeTaskRunner {
    pub fn new(deadline: Duration) -> Self {
        Self {
            deadline,
            cancellation: None,
        }
    }

    /// Abandon in-flight calls when `token` is cancelled
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    /// Ask `judge` and turn whatever happens into an opinion
    ///
    /// The judge's future is dropped on deadline or cancellation, which is
    /// the only cancellation signal a client receives.
    pub async fn run(&self, judge: &dyn JudgeClient, prompt: &JudgePrompt) -> Opinion {
        let judge_id = judge.judge_id().clone();
        let call = tokio::time::timeout(self.deadline, judge.invoke(prompt));

        let outcome = match &self.cancellation {
            Some(token) => {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => {
                        debug!("Judge {} cancelled", judge_id);
                        return Opinion::failed(judge_id, FAILURE_CANCELLED);
                    }
                    outcome = call => outcome,
                }
            }
            None => call.await,
        };

        match outcome {
            Err(_) => {
                warn!(
                    "Judge {} timed out after {}s",
                    judge_id,
                    self.deadline.as_secs_f64()
                );
                Opinion::timed_out(judge_id)
            }
            Ok(Err(e)) => {
                warn!("Judge {} failed: {}", judge_id, e);
                Opinion::failed(judge_id, e.to_string())
            }
            Ok(Ok(raw)) if raw.trim().is_empty() => {
                warn!("Judge {} returned an empty response", judge_id);
                Opinion::failed(judge_id, JudgeError::EmptyResponse.to_string())
            }
            Ok(Ok(raw)) => {
                let (opinion, tier) = parse_opinion_with_tier(&judge_id, &raw);
                debug!(
                    "Judge {} answered {} ({:.2}) via {} parse",
                    judge_id,
                    opinion.decision,
                    opinion.confidence,
                    tier.as_str()
                );
                opinion
            }
        }
    }
}

//! Fan-out scheduler
//!
//! Launches every judge at once and collects exactly one opinion per judge,
//! in panel order, no matter how each call ends.

use crate::ports::judge_client::JudgeClient;
use crate::ports::progress::ProgressNotifier;
use crate::use_cases::run_judge::JudgeTaskRunner;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{info, warn};
use veriquorum_domain::{JudgePrompt, Opinion};

/// Failure reason for a judge task that ended without reporting back
pub const FAILURE_ABORTED: &str = "judge task aborted";

/// Concurrent dispatcher of one prompt to a panel of judges
///
/// Total latency is bounded by the slowest judge's deadline, not by the sum
/// of the deadlines. Dropping the future returned by [`dispatch`](Self::dispatch)
/// aborts every judge still running.
#[derive(Debug, Clone)]
pub struct FanOutScheduler {
    runner: JudgeTaskRunner,
}

impl FanOutScheduler {
    pub fn new(runner: JudgeTaskRunner) -> Self {
        Self { runner }
    }

    /// Dispatch `prompt` to every judge and return their opinions
    ///
    /// The result has one entry per judge, in the order of `judges`.
    pub async fn dispatch(
        &self,
        judges: &[Arc<dyn JudgeClient>],
        prompt: Arc<JudgePrompt>,
        progress: &dyn ProgressNotifier,
    ) -> Vec<Opinion> {
        let mut join_set = JoinSet::new();

        for (slot, judge) in judges.iter().enumerate() {
            let judge = Arc::clone(judge);
            let prompt = Arc::clone(&prompt);
            let runner = self.runner.clone();

            join_set.spawn(async move {
                let opinion = runner.run(judge.as_ref(), &prompt).await;
                (slot, opinion)
            });
        }

        progress.on_dispatch_start(judges.len());

        let mut slots: Vec<Option<Opinion>> = vec![None; judges.len()];

        while let Some(result) = join_set.join_next().await {
            match result {
                Ok((slot, opinion)) => {
                    info!("{}", completion_summary(&opinion));
                    progress.on_judge_complete(&opinion);
                    slots[slot] = Some(opinion);
                }
                Err(e) => {
                    warn!("Judge task join error: {}", e);
                }
            }
        }

        slots
            .into_iter()
            .zip(judges)
            .map(|(slot, judge)| {
                slot.unwrap_or_else(|| {
                    let opinion = Opinion::failed(judge.judge_id().clone(), FAILURE_ABORTED);
                    progress.on_judge_complete(&opinion);
                    opinion
                })
            })
            .collect()
    }
}

/// One-line log text for a finished judge; excluded opinions name the reason
fn completion_summary(opinion: &Opinion) -> String {
    match opinion.exclusion_reason() {
        Some(reason) => format!("Judge {} excluded: {}", opinion.judge_id, reason),
        None => format!(
            "Judge {} responded: {} ({:.2})",
            opinion.judge_id, opinion.decision, opinion.confidence
        ),
    }
}

//! Progress notification port
//!
//! Defines the interface for reporting progress during a verification.

use veriquorum_domain::{Opinion, Verdict};

/// Callback for progress updates during judge dispatch
///
/// Implementations live in the presentation layer. Callbacks run on the
/// task that joins the judges, never inside a judge task.
pub trait ProgressNotifier: Send + Sync {
    /// Called once all judges have been launched
    fn on_dispatch_start(&self, total_judges: usize);

    /// Called as each judge's opinion arrives (in completion order)
    fn on_judge_complete(&self, opinion: &Opinion);

    /// Called once the verdict has been aggregated
    fn on_dispatch_complete(&self, _verdict: &Verdict) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_dispatch_start(&self, _total_judges: usize) {}
    fn on_judge_complete(&self, _opinion: &Opinion) {}
}

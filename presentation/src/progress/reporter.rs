//! Progress reporting for judge dispatch

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use veriquorum_application::ProgressNotifier;
use veriquorum_domain::{Opinion, Verdict};

/// Reports progress during judge dispatch with a progress bar
pub struct ProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

/// One-line status of a finished judge
fn opinion_status(opinion: &Opinion) -> String {
    match opinion.exclusion_reason() {
        None => format!(
            "{} {} ({} {:.2})",
            "v".green(),
            opinion.judge_id.short_name(),
            opinion.decision,
            opinion.confidence
        ),
        Some(reason) => format!(
            "{} {} ({})",
            "x".red(),
            opinion.judge_id.short_name(),
            reason
        ),
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_dispatch_start(&self, total_judges: usize) {
        let pb = ProgressBar::new(total_judges as u64);
        pb.set_style(Self::bar_style());
        pb.set_prefix("Judging");
        pb.set_message("Waiting for judges...");

        if let Ok(mut bar) = self.bar.lock() {
            *bar = Some(pb);
        }
    }

    fn on_judge_complete(&self, opinion: &Opinion) {
        if let Ok(bar) = self.bar.lock()
            && let Some(pb) = bar.as_ref()
        {
            pb.set_message(opinion_status(opinion));
            pb.inc(1);
        }
    }

    fn on_dispatch_complete(&self, verdict: &Verdict) {
        if let Ok(mut bar) = self.bar.lock()
            && let Some(pb) = bar.take()
        {
            pb.finish_with_message(format!(
                "{} {}",
                "Verdict:".green(),
                verdict.decision.as_str().to_uppercase()
            ));
        }
    }
}

/// Simple text-based progress (no fancy UI), written to stderr
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_dispatch_start(&self, total_judges: usize) {
        eprintln!(
            "{} {} ({} judges)",
            "->".cyan(),
            "Dispatching".bold(),
            total_judges
        );
    }

    fn on_judge_complete(&self, opinion: &Opinion) {
        eprintln!("  {}", opinion_status(opinion));
    }

    fn on_dispatch_complete(&self, _verdict: &Verdict) {
        eprintln!();
    }
}

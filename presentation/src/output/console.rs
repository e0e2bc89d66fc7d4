//! Console output formatter for verification outcomes

use colored::{ColoredString, Colorize};
use veriquorum_application::VerificationOutcome;
use veriquorum_domain::{Decision, OutputFormat, Verdict};

/// Formats verification outcomes for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Render an outcome in the requested format
    pub fn render(outcome: &VerificationOutcome, format: OutputFormat) -> String {
        match format {
            OutputFormat::Full => Self::format(outcome),
            OutputFormat::Summary => Self::format_summary(outcome),
            OutputFormat::Json => Self::format_json(outcome),
        }
    }

    /// Format the complete outcome
    pub fn format(outcome: &VerificationOutcome) -> String {
        let verdict = &outcome.verdict;
        let mut output = String::new();

        output.push_str(&Self::header("Content Verification Verdict"));
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n",
            "Target:".cyan().bold(),
            outcome.request.target()
        ));
        output.push_str(&format!(
            "{} {} {}\n\n",
            "Judges:".cyan().bold(),
            verdict.opinions.len(),
            verdict.panel_summary().dimmed()
        ));

        output.push_str(&Self::scores(verdict));

        if let Some(reward) = &outcome.reward {
            output.push_str(&format!(
                "{} {:.4} (popularity {:.2}, x{:.2})\n",
                "Reward:".cyan().bold(),
                reward.reward,
                reward.popularity,
                reward.multiplier
            ));
        }

        output.push_str(&Self::section_header("Rationale"));
        output.push('\n');
        output.push_str(&verdict.rationale);
        output.push('\n');

        output.push_str(&Self::footer());
        output
    }

    /// Format decision and scores only (concise output)
    pub fn format_summary(outcome: &VerificationOutcome) -> String {
        let verdict = &outcome.verdict;
        let mut output = String::new();

        output.push_str(&format!("{}\n", "=== Verdict ===".cyan().bold()));
        output.push_str(&Self::scores(verdict));
        if let Some(reward) = &outcome.reward {
            output.push_str(&format!("{} {:.4}\n", "Reward:".cyan().bold(), reward.reward));
        }
        output
    }

    /// Format as JSON
    pub fn format_json(outcome: &VerificationOutcome) -> String {
        serde_json::to_string_pretty(outcome).unwrap_or_else(|_| "{}".to_string())
    }

    fn scores(verdict: &Verdict) -> String {
        let quorum = if verdict.quorum_met {
            "yes".green()
        } else {
            "no".red()
        };
        format!(
            "{} {}\n{} {:.2}\n{} {:.2}\n{} {} ({}/{} successful)\n",
            "Decision:".cyan().bold(),
            Self::decision_label(verdict.decision),
            "Confidence:".cyan().bold(),
            verdict.confidence,
            "Consensus:".cyan().bold(),
            verdict.consensus_score,
            "Quorum met:".cyan().bold(),
            quorum,
            verdict.tally.successful,
            verdict.tally.total
        )
    }

    fn decision_label(decision: Decision) -> ColoredString {
        let label = decision.as_str().to_uppercase();
        match decision {
            Decision::Authentic => label.green().bold(),
            Decision::Fake => label.red().bold(),
            Decision::Uncertain => label.yellow().bold(),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

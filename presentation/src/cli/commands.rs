//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use veriquorum_domain::EvidenceKind;

/// Output format for verification results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Verdict, scores, reward and the full rationale
    Full,
    /// Decision and scores only
    Summary,
    /// JSON output
    Json,
}

impl From<OutputFormat> for veriquorum_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => Self::Full,
            OutputFormat::Summary => Self::Summary,
            OutputFormat::Json => Self::Json,
        }
    }
}

/// One `--evidence KIND=FILE` argument
#[derive(Debug, Clone, PartialEq)]
pub struct EvidenceArg {
    pub kind: EvidenceKind,
    pub path: PathBuf,
}

/// Parse `KIND=FILE`; a bare `FILE` is evidence of kind `other`
pub fn parse_evidence_arg(raw: &str) -> Result<EvidenceArg, String> {
    match raw.split_once('=') {
        Some((kind, path)) => {
            if path.trim().is_empty() {
                return Err(format!("missing file in evidence argument '{}'", raw));
            }
            Ok(EvidenceArg {
                kind: kind.parse()?,
                path: PathBuf::from(path),
            })
        }
        None if !raw.trim().is_empty() => Ok(EvidenceArg {
            kind: EvidenceKind::Other,
            path: PathBuf::from(raw),
        }),
        None => Err("evidence argument cannot be empty".to_string()),
    }
}

/// CLI arguments for veriquorum
#[derive(Parser, Debug)]
#[command(name = "veriquorum")]
#[command(author, version, about = "Verify content with a quorum of independent AI judges")]
#[command(long_about = r#"
veriquorum asks a panel of independent AI judges whether a piece of content
is authentic or fake, and aggregates their opinions into one verdict.

Every judge gets the same prompt and its own deadline. Judges that time out
or fail are excluded. A verdict other than "uncertain" needs a quorum of
successful judges and at least one confident judge on the winning side.

Configuration files are loaded from (in priority order):
1. VERIQUORUM_<SECTION>__<KEY>   Environment overrides
2. --config <path>               Explicit config file
3. ./veriquorum.toml             Project-level config
4. ~/.config/veriquorum/config.toml   Global config

Example:
  veriquorum "Scientists confirm the moon is made of cheese"
  veriquorum --url https://example.com/story --evidence web_search=results.txt
  veriquorum -j openai/gpt-4o-mini -j z-ai/glm-4.5-air:free -o json "..."
"#)]
pub struct Cli {
    /// Text of the content to verify
    pub text: Option<String>,

    /// URL of the content (page text is fetched when no text is given)
    #[arg(short, long, value_name = "URL")]
    pub url: Option<String>,

    /// Image URL attached to the content (can be specified multiple times)
    #[arg(long, value_name = "URL")]
    pub image: Vec<String>,

    /// Evidence file, as KIND=FILE (image_analysis, manipulation_check,
    /// web_search, image_verification, other)
    #[arg(short, long, value_name = "KIND=FILE", value_parser = parse_evidence_arg)]
    pub evidence: Vec<EvidenceArg>,

    /// Read the whole request from a JSON file
    #[arg(short, long, value_name = "FILE")]
    pub request: Option<PathBuf>,

    /// Judge model (can be specified multiple times; replaces the configured panel)
    #[arg(short, long = "judge", value_name = "MODEL")]
    pub judges: Vec<String>,

    /// Per-judge deadline in seconds
    #[arg(long, value_name = "SECS")]
    pub deadline: Option<u64>,

    /// Minimum number of successful judges for a non-uncertain verdict
    #[arg(long, value_name = "N")]
    pub min_quorum: Option<usize>,

    /// Confidence at least one judge on the winning side must reach
    #[arg(long, value_name = "X")]
    pub min_confidence: Option<f64>,

    /// Popularity in [0, 1] used for the reward (estimated from the text by default)
    #[arg(long, value_name = "P")]
    pub popularity: Option<f64>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Append every opinion and verdict to a JSONL file
    #[arg(long, value_name = "PATH")]
    pub verdict_log: Option<PathBuf>,

    /// Also write diagnostic logs to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal() {
        let cli = Cli::try_parse_from(["veriquorum", "some claim"]).unwrap();
        assert_eq!(cli.text.as_deref(), Some("some claim"));
        assert!(cli.judges.is_empty());
        assert!(cli.output.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_parse_full() {
        let cli = Cli::try_parse_from([
            "veriquorum",
            "--url",
            "https://example.com/a",
            "--image",
            "https://example.com/a.jpg",
            "-e",
            "web_search=results.txt",
            "-j",
            "a/one",
            "-j",
            "b/two",
            "--deadline",
            "30",
            "--min-quorum",
            "3",
            "--min-confidence",
            "0.7",
            "--popularity",
            "0.9",
            "-o",
            "json",
            "-vv",
            "--verdict-log",
            "verdicts.jsonl",
        ])
        .unwrap();

        assert!(cli.text.is_none());
        assert_eq!(cli.url.as_deref(), Some("https://example.com/a"));
        assert_eq!(cli.image.len(), 1);
        assert_eq!(cli.evidence[0].kind, EvidenceKind::WebSearch);
        assert_eq!(cli.judges, vec!["a/one", "b/two"]);
        assert_eq!(cli.deadline, Some(30));
        assert_eq!(cli.min_quorum, Some(3));
        assert_eq!(cli.min_confidence, Some(0.7));
        assert_eq!(cli.popularity, Some(0.9));
        assert_eq!(cli.output, Some(OutputFormat::Json));
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.verdict_log, Some(PathBuf::from("verdicts.jsonl")));
    }

    #[test]
    fn test_parse_evidence_arg() {
        let arg = parse_evidence_arg("manipulation_check=ela.txt").unwrap();
        assert_eq!(arg.kind, EvidenceKind::ManipulationCheck);
        assert_eq!(arg.path, PathBuf::from("ela.txt"));

        let bare = parse_evidence_arg("notes.txt").unwrap();
        assert_eq!(bare.kind, EvidenceKind::Other);

        assert!(parse_evidence_arg("web_search=").is_err());
        assert!(parse_evidence_arg("").is_err());
    }

    #[test]
    fn test_unknown_output_format_is_rejected() {
        assert!(Cli::try_parse_from(["veriquorum", "-o", "xml", "claim"]).is_err());
    }

    #[test]
    fn test_output_format_maps_to_domain() {
        let format: veriquorum_domain::OutputFormat = OutputFormat::Summary.into();
        assert_eq!(format, veriquorum_domain::OutputFormat::Summary);
    }
}

//! CLI entrypoint for veriquorum
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Result, anyhow, bail};
use clap::Parser;
use std::path::Path;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use veriquorum_application::{VerifyContentInput, VerifyContentUseCase};
use veriquorum_infrastructure::{
    ConfigLoader, FileConfig, HtmlContentSource, JsonlVerificationLogger, JudgePanel,
};
use veriquorum_presentation::{Cli, ConsoleFormatter, OutputConfig, ProgressReporter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let _log_guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    // === Configuration ===
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    apply_cli_overrides(&mut config, &cli)?;

    let params = config.to_verification_params()?;
    let output = OutputConfig::resolve(&cli, config.output.format, config.output.color);
    output.apply_color();

    let request = cli.build_request()?;

    // === Dependency Injection ===
    let panel = JudgePanel::from_config(&config)?;
    let content_source = HtmlContentSource::new(params.judge_deadline)?;

    let cancellation = CancellationToken::new();
    spawn_interrupt_handler(cancellation.clone());

    info!(
        "Starting veriquorum with {} judges: {}",
        panel.len(),
        panel
            .judge_ids()
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );

    let mut use_case = VerifyContentUseCase::new(panel.clients())
        .with_params(params)
        .with_content_source(Arc::new(content_source))
        .with_cancellation(cancellation);

    if let Some(path) = cli.verdict_log.as_ref().or(config.logging.verdict_log.as_ref()) {
        match JsonlVerificationLogger::open(path) {
            Some(logger) => use_case = use_case.with_logger(Arc::new(logger)),
            None => warn!("Verdict log disabled: could not open {}", path.display()),
        }
    }

    let mut input = VerifyContentInput::new(request);
    if let Some(popularity) = cli.popularity {
        input = input.with_popularity(popularity);
    }

    // Execute with or without progress reporting
    let outcome = if output.show_progress {
        let progress = ProgressReporter::new();
        use_case.execute_with_progress(input, &progress).await?
    } else {
        use_case.execute(input).await?
    };

    println!("{}", ConsoleFormatter::render(&outcome, output.format));

    Ok(())
}

/// Initialize logging based on verbosity level; `RUST_LOG` takes precedence
///
/// Logs go to stderr so that stdout carries only the verdict. The returned
/// guard must stay alive for the file writer to flush.
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = || EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let stderr_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(filter());

    let Some(path) = log_file else {
        tracing_subscriber::registry().with(stderr_layer).init();
        return Ok(None);
    };

    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow!("--log-file must name a file: {}", path.display()))?;
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    std::fs::create_dir_all(dir)?;

    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(
        dir, file_name,
    ));
    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_writer(writer)
        .with_filter(filter());

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .init();
    Ok(Some(guard))
}

/// CLI flags are the highest-priority configuration layer
fn apply_cli_overrides(config: &mut FileConfig, cli: &Cli) -> Result<()> {
    if !cli.judges.is_empty() {
        config.judges.models = cli.judges.clone();
    }
    if let Some(deadline) = cli.deadline {
        config.dispatch.deadline_seconds = deadline;
    }
    if let Some(min_quorum) = cli.min_quorum {
        config.consensus.min_quorum = min_quorum;
    }
    if let Some(threshold) = cli.min_confidence {
        config.consensus.min_confidence_threshold = threshold;
    }
    if let Some(popularity) = cli.popularity
        && !(0.0..=1.0).contains(&popularity)
    {
        bail!("--popularity must be within [0, 1], got {}", popularity);
    }
    Ok(())
}

/// Cancel outstanding judges on Ctrl-C; the verdict is still produced
fn spawn_interrupt_handler(token: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling outstanding judges");
            token.cancel();
        }
    });
}

//! bazel-statter: flakiness and timing report across Bazel test logs
//!
//! Reads one log per build for a range of build numbers, aggregates the
//! per-target test outcomes and prints the targets that failed at least once.

use anyhow::{Context, Result};
use clap::Parser;
use statter::config::Config;
use statter::ingest::Ingestor;
use statter_aggregate::Report;
use statter_log::LinePatterns;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    // Logs go to stderr so the report can be piped
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(config.log_level().into()),
        )
        .init();

    config.validate().context("Invalid configuration")?;

    info!(
        start = config.start,
        end = config.end,
        log_dir = %config.log_dir.display(),
        builds = config.build_count(),
        "Reading build logs"
    );

    let ingestor = Ingestor::new(LinePatterns::new()).ignore_cached(config.ignore_cached);
    let summary = ingestor.ingest(config.log_sources()).await;

    if summary.files_read == 0 && !summary.failed_sources.is_empty() {
        warn!("No build log could be read");
    }

    let report = Report::build(summary.aggregator.into_results(), &config.report_options());

    if config.json {
        println!("{}", report.to_json().context("Failed to render report")?);
    } else {
        print!("{}", report.render_table());
    }

    info!(
        shown = report.rows().len(),
        hidden_successful = report.hidden_successful(),
        "Report complete"
    );

    Ok(())
}

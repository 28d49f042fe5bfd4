//! CLI entry point for the listing harvester.

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use harvester_core::{CrawlConfig, CrawlFailure, Crawler, HttpClient};
use tracing::{debug, info};

mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    debug!(?args, "CLI arguments parsed");

    tokio::fs::create_dir_all(&args.output_dir)
        .await
        .with_context(|| {
            format!(
                "failed to create output directory {}",
                args.output_dir.display()
            )
        })?;

    let config = CrawlConfig::new(&args.output_dir, usize::from(args.workers))?
        .with_politeness_delay(Duration::from_millis(args.delay_ms))
        .with_collision_policy(args.on_collision.into());

    info!(url = %args.url, "Starting download");
    info!(output_dir = %args.output_dir.display(), "Saving files");
    info!(workers = args.workers, "Using concurrent workers");

    let client = Arc::new(HttpClient::new()?);
    let mut crawler = Crawler::new(client, config);
    let report = crawler.crawl(&args.url).await;

    for failure in report.failures() {
        match failure {
            CrawlFailure::Directory(error) => debug!(error = %error, "directory failed"),
            CrawlFailure::File(failed) => debug!(
                url = %failed.task.source(),
                error = %failed.error,
                "file failed"
            ),
        }
    }

    info!(
        directories = report.directories_visited(),
        directories_failed = report.directories_failed(),
        attempted = report.files_attempted(),
        succeeded = report.files_succeeded(),
        failed = report.files_failed(),
        "Download completed!"
    );

    if args.fail_on_error && report.has_failures() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

//! Namescout main entry point
//!
//! Command-line interface for the personal-data exposure crawler.

use anyhow::Context;
use clap::Parser;
use namescout::config::load_config_with_hash;
use namescout::report::{
    print_summary, write_findings_csv, write_markdown_summary, CrawlSummary,
};
use namescout::{Crawler, NameValidator};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Namescout: finds publicly reachable personal names and photos on a domain
///
/// Namescout crawls a web domain and its subdomains breadth-first, extracts
/// candidate names and candidate personal photos from each page, and filters
/// the raw findings against reference first/last-name lists.
#[derive(Parser, Debug)]
#[command(name = "namescout")]
#[command(version)]
#[command(about = "Finds publicly reachable personal names and photos on a domain", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without fetching
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) =
        load_config_with_hash(&cli.config).context("failed to load configuration")?;
    tracing::info!("Configuration loaded (hash: {})", config_hash);

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    // Name lists are loaded before crawling: unreachable reference files are
    // a fatal configuration error
    let validator = NameValidator::from_files(
        Path::new(&config.names.first_names_path),
        Path::new(&config.names.last_names_path),
    )
    .context("failed to load name reference lists")?;

    let crawler = Crawler::new(config.crawler.clone()).context("failed to build crawler")?;
    let outcome = crawler.run().await.context("crawl failed")?;

    write_findings_csv(Path::new(&config.output.raw_report_path), &outcome.findings)
        .context("failed to write raw report")?;

    let validated = validator.validate_findings(&outcome.findings);
    write_findings_csv(Path::new(&config.output.validated_report_path), &validated)
        .context("failed to write validated report")?;

    let summary = CrawlSummary::from_results(&outcome, &validated);
    write_markdown_summary(&summary, Path::new(&config.output.summary_path))
        .context("failed to write summary")?;

    print_summary(&summary);

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("namescout=info,warn"),
            1 => EnvFilter::new("namescout=debug,info"),
            2 => EnvFilter::new("namescout=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles --dry-run: shows the effective crawl plan without fetching
fn handle_dry_run(config: &namescout::Config) {
    println!("=== Namescout Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Start URL: {}", config.crawler.start_url);
    println!("  Base host: {}", config.crawler.base_host);
    println!(
        "  Include subdomains: {}",
        config.crawler.include_subdomains
    );
    println!("  Concurrency: {}", config.crawler.concurrency);
    println!("  Deadline: {}s", config.crawler.deadline_secs);

    println!("\nName Lists:");
    println!("  First names: {}", config.names.first_names_path);
    println!("  Last names: {}", config.names.last_names_path);

    println!("\nOutput:");
    println!("  Raw report: {}", config.output.raw_report_path);
    println!("  Validated report: {}", config.output.validated_report_path);
    println!("  Summary: {}", config.output.summary_path);

    println!("\n✓ Configuration is valid");
}

//! Trapline main entry point
//!
//! This is the command-line interface for the Trapline crawl controller.

use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::atomic::Ordering;
use trapline::config::load_config_with_hash;
use trapline::corpus::FileCorpus;
use trapline::crawler::Coordinator;
use trapline::output::print_summary;
use tracing_subscriber::EnvFilter;

/// Trapline: a corpus-driven crawl controller with crawler-trap detection
///
/// Trapline walks a captured corpus from a set of seed URLs, validating
/// every discovered link through a stateful trap-detection policy, and
/// writes a plain-text report of domains, traps, and the best-linked page.
#[derive(Parser, Debug)]
#[command(name = "trapline")]
#[command(version = "1.0.0")]
#[command(about = "A corpus-driven crawl controller", long_about = None)]
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

    /// Validate config and show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_crawl(config).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("trapline=info,warn"),
            1 => EnvFilter::new("trapline=debug,info"),
            2 => EnvFilter::new("trapline=trace,debug"),
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

/// Handles the --dry-run mode: validates config and shows what would be crawled
fn handle_dry_run(config: &trapline::config::Config) {
    println!("=== Trapline Dry Run ===\n");

    println!("Link policy:");
    println!("  Domain scope: {}", config.crawler.allowed_domain_suffix);
    println!("  Max URL length: {}", config.crawler.max_url_length);
    println!(
        "  Query similarity threshold: {}",
        config.crawler.query_similarity_threshold
    );
    println!(
        "  Ignored extensions: {}",
        config.crawler.ignored_extensions.len()
    );

    println!("\nCorpus:");
    println!("  Content dir: {}", config.corpus.content_dir);

    println!("\nOutput:");
    println!("  Report: {}", config.output.report_path);

    println!("\nSeeds ({}):", config.crawler.seeds.len());
    for seed in &config.crawler.seeds {
        println!("  - {}", seed);
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
async fn handle_crawl(config: trapline::config::Config) -> anyhow::Result<()> {
    let corpus = FileCorpus::open(Path::new(&config.corpus.content_dir))
        .context("failed to open corpus")?;

    let mut coordinator = Coordinator::new(&config, corpus);

    // Ctrl-C stops the loop between iterations; the report still gets written
    let abort = coordinator.abort_flag();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, finishing current page");
            abort.store(true, Ordering::Relaxed);
        }
    });

    let report = coordinator.run().await?;

    let report_path = Path::new(&config.output.report_path);
    report
        .write_to(report_path)
        .with_context(|| format!("failed to write report to {}", report_path.display()))?;
    tracing::info!("Report written to {}", report_path.display());

    print_summary(&report);

    Ok(())
}

//! docs-digest main entry point
//!
//! This is the command-line interface for the documentation crawler and
//! summarizer.

use anyhow::{Context, Result};
use clap::Parser;
use docs_digest::config::{load_config_with_hash, validate, Config};
use docs_digest::crawler::crawl;
use docs_digest::output::log_statistics;
use docs_digest::pipeline;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

/// docs-digest: crawl a documentation site and summarize every unique page
///
/// docs-digest walks every page under the configured base URL, drops pages
/// whose content duplicates one already seen, summarizes the rest through an
/// OpenAI-compatible API and writes a Markdown report.
#[derive(Parser, Debug)]
#[command(name = "docs-digest")]
#[command(version)]
#[command(about = "Crawl and summarize a documentation site", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Summary detail level (1 = brief, 2 = moderate, 3 = detailed)
    #[arg(long, value_name = "N")]
    detail: Option<u8>,

    /// Maximum number of unique pages to crawl
    #[arg(long, value_name = "N")]
    max_pages: Option<usize>,

    /// Where to write the Markdown report
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Crawl and print statistics without summarizing
    #[arg(long, conflicts_with = "dry_run")]
    crawl_only: bool,

    /// Validate config and show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    /// Applies command-line overrides on top of the file configuration
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(detail) = self.detail {
            config.summarizer.detail_level = detail;
        }
        if let Some(max_pages) = self.max_pages {
            config.crawler.max_pages = max_pages;
        }
        if let Some(output) = &self.output {
            config.output.report_path = output.display().to_string();
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (mut config, hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", hash);

    cli.apply_overrides(&mut config);
    validate(&config).context("invalid configuration after command-line overrides")?;

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    let cancel = CancellationToken::new();
    spawn_interrupt_handler(cancel.clone());

    if cli.crawl_only {
        handle_crawl_only(&config, cancel).await
    } else {
        handle_digest(&config, cancel).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("docs_digest=info,warn"),
            1 => EnvFilter::new("docs_digest=debug,info"),
            2 => EnvFilter::new("docs_digest=trace,debug"),
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

/// Cancels the crawl on the first Ctrl-C
fn spawn_interrupt_handler(cancel: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, finishing with the pages collected so far");
            cancel.cancel();
        }
    });
}

/// Handles the --dry-run mode: shows the effective configuration
fn handle_dry_run(config: &Config) {
    println!("=== docs-digest Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Base URL: {}", config.crawler.base_url);
    println!("  Max pages: {}", config.crawler.max_pages);
    println!("  Discover timeout: {}s", config.crawler.discover_timeout_secs);
    println!("  Extract timeout: {}s", config.crawler.extract_timeout_secs);
    match config.crawler.max_discovery_fetches {
        Some(cap) => println!("  Max discovery fetches: {}", cap),
        None => println!("  Max discovery fetches: unlimited"),
    }

    println!("\nUser Agent:");
    println!("  Name: {}", config.user_agent.crawler_name);
    println!("  Version: {}", config.user_agent.crawler_version);

    println!("\nSummarizer:");
    println!("  Endpoint: {}", config.summarizer.endpoint);
    println!("  Model: {}", config.summarizer.model);
    println!("  API key variable: {}", config.summarizer.api_key_env);
    println!("  Detail level: {}", config.summarizer.detail_level);
    println!(
        "  Attempts: {} (backoff {}ms..{}ms)",
        config.summarizer.max_attempts, config.summarizer.base_delay_ms, config.summarizer.max_delay_ms
    );

    println!("\nOutput:");
    println!("  Report: {}", config.output.report_path);

    println!("\n✓ Configuration is valid");
}

/// Handles the --crawl-only mode: crawls and reports statistics
async fn handle_crawl_only(config: &Config, cancel: CancellationToken) -> Result<()> {
    tracing::info!("Starting crawl of {}", config.crawler.base_url);

    let outcome = crawl(&config.crawler, &config.user_agent, cancel)
        .await
        .context("crawl failed")?;
    log_statistics(&outcome.stats);

    for page in &outcome.pages {
        println!("{}\t{}", page.url, page.title);
    }

    Ok(())
}

/// Handles the main operation: crawl, summarize and write the report
async fn handle_digest(config: &Config, cancel: CancellationToken) -> Result<()> {
    tracing::info!(
        "Starting digest of {} (max {} pages)",
        config.crawler.base_url,
        config.crawler.max_pages
    );

    let outcome = pipeline::run(config, cancel).await.context("digest failed")?;

    if outcome.crawl.cancelled {
        tracing::warn!("Run was interrupted; the report covers a partial crawl");
    }
    println!(
        "✓ Summarized {} pages into {}",
        outcome.summaries.len(),
        outcome.report_path.display()
    );

    Ok(())
}

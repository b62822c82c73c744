//! End-to-end pipeline: crawl, summarize, report
//!
//! The crawl result is final before summarization starts; a page whose
//! summary fails after all retries is reported with the error in place of a
//! summary instead of aborting the run.

use crate::config::{Config, SummarizerConfig};
use crate::crawler::{self, CrawlOutcome};
use crate::output::{log_statistics, write_report, PageSummary, Report};
use crate::state::Page;
use crate::summarizer::{ChatSummarizer, DetailLevel, RetryPolicy, RetryingSummarizer, Summarizer};
use crate::DigestError;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;

/// Result of a full pipeline run
#[derive(Debug)]
pub struct PipelineOutcome {
    pub crawl: CrawlOutcome,
    pub summaries: Vec<PageSummary>,
    pub report_path: PathBuf,
}

/// Builds the production summarizer from configuration
///
/// The API key is read from the environment variable named by
/// `api-key-env`; a missing key is reported before any crawling starts.
pub fn build_summarizer(
    config: &SummarizerConfig,
) -> Result<RetryingSummarizer<ChatSummarizer>, DigestError> {
    let api_key = std::env::var(&config.api_key_env)
        .map_err(|_| DigestError::MissingApiKey(config.api_key_env.clone()))?;
    let client = ChatSummarizer::new(&api_key, config)?;
    Ok(RetryingSummarizer::new(
        client,
        RetryPolicy::from_config(config),
    ))
}

/// Runs the whole pipeline with the configured HTTP summarizer
pub async fn run(config: &Config, cancel: CancellationToken) -> Result<PipelineOutcome, DigestError> {
    let summarizer = build_summarizer(&config.summarizer)?;
    run_with(config, &summarizer, cancel).await
}

/// Runs the whole pipeline with the given summarizer
pub async fn run_with<S: Summarizer + ?Sized>(
    config: &Config,
    summarizer: &S,
    cancel: CancellationToken,
) -> Result<PipelineOutcome, DigestError> {
    let level = DetailLevel::try_from(config.summarizer.detail_level)?;

    let crawl = crawler::crawl(&config.crawler, &config.user_agent, cancel.clone()).await?;
    log_statistics(&crawl.stats);

    let summaries = summarize_pages(summarizer, &crawl.pages, level, &cancel).await;

    let report_path = PathBuf::from(&config.output.report_path);
    let report = Report {
        base_url: &config.crawler.base_url,
        generated_at: chrono::Utc::now(),
        detail_level: level,
        stats: &crawl.stats,
        summaries: &summaries,
    };
    write_report(&report, &report_path)?;
    tracing::info!("Report written to {}", report_path.display());

    Ok(PipelineOutcome {
        crawl,
        summaries,
        report_path,
    })
}

/// Summarizes pages in order
///
/// Stops early if `cancel` is triggered, returning the summaries produced so
/// far.
pub async fn summarize_pages<S: Summarizer + ?Sized>(
    summarizer: &S,
    pages: &[Page],
    level: DetailLevel,
    cancel: &CancellationToken,
) -> Vec<PageSummary> {
    let mut summaries = Vec::with_capacity(pages.len());

    for (index, page) in pages.iter().enumerate() {
        if cancel.is_cancelled() {
            tracing::warn!(
                "Summarization cancelled after {} of {} pages",
                index,
                pages.len()
            );
            break;
        }

        tracing::info!("Summarizing [{}/{}]: {}", index + 1, pages.len(), page.title);
        let summary = match summarizer.summarize(&page.content, level).await {
            Ok(summary) => summary,
            Err(e) => {
                tracing::error!("Failed to summarize {}: {}", page.url, e);
                format!("Summary unavailable: {}", e)
            }
        };

        summaries.push(PageSummary {
            title: page.title.clone(),
            url: page.url.clone(),
            summary,
        });
    }

    summaries
}

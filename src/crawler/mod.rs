//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching behind the `Fetcher` trait
//! - HTML link extraction and main-content extraction
//! - Content fingerprinting for duplicate detection
//! - The explicit-stack crawl engine

mod engine;
mod extractor;
mod fetcher;
mod fingerprint;
mod parser;
mod stack;

pub use engine::{CrawlOptions, CrawlOutcome, Crawler};
pub use extractor::{extract_content, extract_title, normalize_text};
pub use fetcher::{build_http_client, FetchError, Fetcher, FetcherConfig, HttpFetcher};
pub use fingerprint::Fingerprint;
pub use parser::{extract_links, parse_links};
pub use stack::{CrawlTarget, Stage, WorkStack};

use crate::config::{CrawlerConfig, UserAgentConfig};
use crate::DigestError;
use tokio_util::sync::CancellationToken;

/// Runs a complete crawl over HTTP
///
/// This is the main entry point for crawling a site from configuration. It
/// will:
/// 1. Build the HTTP fetcher
/// 2. Validate the base URL
/// 3. Traverse and deduplicate pages until the page cap, the end of the
///    site, or cancellation
///
/// # Arguments
///
/// * `crawler_config` - Base URL, page cap and timeouts
/// * `user_agent` - Identification sent with every request
/// * `cancel` - Stops the crawl early when triggered
///
/// # Returns
///
/// * `Ok(CrawlOutcome)` - Pages and statistics (possibly partial if cancelled)
/// * `Err(DigestError)` - Invalid base URL or HTTP client setup failure
pub async fn crawl(
    crawler_config: &CrawlerConfig,
    user_agent: &UserAgentConfig,
    cancel: CancellationToken,
) -> Result<CrawlOutcome, DigestError> {
    let fetcher = HttpFetcher::new(&FetcherConfig::from_user_agent(user_agent))?;
    let crawler = Crawler::new(
        fetcher,
        &crawler_config.base_url,
        CrawlOptions::from_config(crawler_config),
    )?;
    Ok(crawler.crawl_until(cancel).await)
}

//! Crawl engine - depth-first traversal with content deduplication
//!
//! This module contains the main crawl loop, which:
//! - Walks same-origin pages from a base URL using an explicit work stack
//! - Discovers links in one pass and extracts content in a second
//! - Drops pages whose normalized content was already accepted
//! - Stops once the configured number of unique pages is reached
//!
//! Every per-URL failure is logged and skipped; nothing short of
//! cancellation ends a crawl early.

use crate::config::CrawlerConfig;
use crate::crawler::extractor::{extract_content, extract_title};
use crate::crawler::fetcher::{FetchError, Fetcher};
use crate::crawler::fingerprint::Fingerprint;
use crate::crawler::parser::extract_links;
use crate::crawler::stack::{CrawlTarget, Stage, WorkStack};
use crate::output::CrawlStats;
use crate::state::{Acceptance, CrawlState, Page};
use crate::url::{in_scope, parse_base_url};
use crate::UrlError;
use scraper::Html;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use url::Url;

/// Bounds and timeouts for a crawl
#[derive(Debug, Clone)]
pub struct CrawlOptions {
    /// Maximum number of unique pages to accept
    pub max_pages: usize,

    /// Timeout for link-discovery fetches
    pub discover_timeout: Duration,

    /// Timeout for content-extraction fetches
    pub extract_timeout: Duration,

    /// Optional cap on distinct URLs fetched for discovery (unbounded if None)
    pub max_discovery_fetches: Option<usize>,
}

impl CrawlOptions {
    pub fn from_config(config: &CrawlerConfig) -> Self {
        Self {
            max_pages: config.max_pages,
            discover_timeout: config.discover_timeout(),
            extract_timeout: config.extract_timeout(),
            max_discovery_fetches: config.max_discovery_fetches,
        }
    }
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            max_pages: 50,
            discover_timeout: Duration::from_secs(5),
            extract_timeout: Duration::from_secs(10),
            max_discovery_fetches: None,
        }
    }
}

/// Everything a crawl produces
#[derive(Debug, Clone)]
pub struct CrawlOutcome {
    /// Unique pages in acceptance order
    pub pages: Vec<Page>,

    /// Statistics derived from `pages`
    pub stats: CrawlStats,

    /// Fetches that failed at either stage
    pub failed_fetches: usize,

    /// Distinct URLs fetched for link discovery
    pub discovery_fetches: usize,

    /// Whether the crawl was stopped by its cancellation token
    pub cancelled: bool,
}

/// Per-run counters that are not part of [`CrawlState`]
#[derive(Debug, Default)]
struct RunCounters {
    failed_fetches: usize,
    discovery_fetches: usize,
    cancelled: bool,
}

/// Main crawler structure
pub struct Crawler<F> {
    fetcher: F,
    base_url: Url,
    options: CrawlOptions,
}

impl<F: Fetcher> Crawler<F> {
    /// Creates a new crawler
    ///
    /// # Arguments
    ///
    /// * `fetcher` - Retrieves documents; owned by the crawler
    /// * `base_url` - Crawl origin and prefix filter
    /// * `options` - Page cap and timeouts
    ///
    /// # Returns
    ///
    /// * `Ok(Crawler)` - Ready to crawl
    /// * `Err(UrlError)` - `base_url` is not an absolute http(s) URL
    pub fn new(fetcher: F, base_url: &str, options: CrawlOptions) -> Result<Self, UrlError> {
        Ok(Self {
            fetcher,
            base_url: parse_base_url(base_url)?,
            options,
        })
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Runs a complete crawl
    pub async fn crawl(&self) -> CrawlOutcome {
        self.crawl_until(CancellationToken::new()).await
    }

    /// Runs a crawl that stops early when `cancel` is triggered
    ///
    /// # Traversal
    ///
    /// 1. Push `(base, Discover)`
    /// 2. While the stack is non-empty and fewer than `max_pages` pages are
    ///    accepted, pop the top entry:
    ///    - Discover: skip visited URLs; otherwise mark visited, fetch, push
    ///      `(link, Discover)` for each in-scope link in document order, then
    ///      push `(url, Extract)`
    ///    - Extract: fetch again, extract title and content, fingerprint, and
    ///      accept unless the fingerprint was already seen
    /// 3. Derive statistics from the accepted pages
    ///
    /// On cancellation the in-flight fetch is abandoned and the pages
    /// accepted so far are returned.
    pub async fn crawl_until(&self, cancel: CancellationToken) -> CrawlOutcome {
        let start_time = Instant::now();
        let mut state = CrawlState::new();
        let mut counters = RunCounters::default();

        if self.options.max_pages == 0 {
            tracing::info!("max_pages is 0, nothing to crawl");
            return finish(state, counters);
        }

        tracing::info!(
            "Starting crawl of {} (max {} pages)",
            self.base_url,
            self.options.max_pages
        );

        let mut stack = WorkStack::seeded(self.base_url.clone());

        while state.page_count() < self.options.max_pages {
            if cancel.is_cancelled() {
                counters.cancelled = true;
                break;
            }

            let Some(target) = stack.pop() else {
                tracing::debug!("Work stack is empty, crawl complete");
                break;
            };

            tracing::debug!(
                "Popped {:?} {} ({} left on stack)",
                target.stage,
                target.url,
                stack.len()
            );

            let keep_going = match target.stage {
                Stage::Discover => {
                    self.discover(target.url, &mut state, &mut stack, &mut counters, &cancel)
                        .await
                }
                Stage::Extract => {
                    self.extract(target.url, &mut state, &mut counters, &cancel)
                        .await
                }
            };

            if !keep_going {
                counters.cancelled = true;
                break;
            }
        }

        if counters.cancelled {
            tracing::warn!(
                "Crawl cancelled after {} pages",
                state.page_count()
            );
        }

        tracing::info!(
            "Crawl finished: {} pages accepted, {} duplicates removed, {} failed fetches in {:?}",
            state.page_count(),
            state.duplicates_removed(),
            counters.failed_fetches,
            start_time.elapsed()
        );

        finish(state, counters)
    }

    /// Handles a Discover entry
    ///
    /// Returns `false` only when the crawl was cancelled mid-fetch.
    async fn discover(
        &self,
        url: Url,
        state: &mut CrawlState,
        stack: &mut WorkStack,
        counters: &mut RunCounters,
        cancel: &CancellationToken,
    ) -> bool {
        if state.is_visited(url.as_str()) {
            return true;
        }

        if let Some(cap) = self.options.max_discovery_fetches {
            if state.visited_count() >= cap {
                tracing::debug!("Discovery cap of {} reached, skipping {}", cap, url);
                return true;
            }
        }

        state.mark_visited(url.as_str());
        counters.discovery_fetches += 1;

        let body = match self.fetch(&url, self.options.discover_timeout, cancel).await {
            Some(Ok(body)) => body,
            Some(Err(e)) => {
                tracing::warn!("Failed to discover links on {}: {}", url, e);
                counters.failed_fetches += 1;
                return true;
            }
            None => return false,
        };

        let mut pushed = 0;
        for link in extract_links(&body, &self.base_url) {
            if in_scope(&self.base_url, &link) {
                stack.push(CrawlTarget::discover(link));
                pushed += 1;
            }
        }
        tracing::debug!("Found {} in-scope links on {}", pushed, url);

        stack.push(CrawlTarget::extract(url));
        true
    }

    /// Handles an Extract entry
    ///
    /// Returns `false` only when the crawl was cancelled mid-fetch.
    async fn extract(
        &self,
        url: Url,
        state: &mut CrawlState,
        counters: &mut RunCounters,
        cancel: &CancellationToken,
    ) -> bool {
        let body = match self.fetch(&url, self.options.extract_timeout, cancel).await {
            Some(Ok(body)) => body,
            Some(Err(e)) => {
                tracing::warn!("Failed to extract content from {}: {}", url, e);
                counters.failed_fetches += 1;
                return true;
            }
            None => return false,
        };

        let (title, content) = extract_page(&body);
        let fingerprint = Fingerprint::of(&content);
        let page = Page::new(title, url.as_str(), content);
        let title = page.title.clone();

        match state.accept(fingerprint, page) {
            Acceptance::Accepted => {
                tracing::info!("Crawled {} - title: {}", url, title);
            }
            Acceptance::Duplicate => {
                tracing::debug!("Duplicate content at {} ({})", url, fingerprint);
            }
        }

        true
    }

    /// Fetches with an engine-side timeout and cancellation
    ///
    /// Returns `None` if the crawl was cancelled before the fetch finished.
    /// The timeout is enforced here as well as in the fetcher, so a fetcher
    /// that ignores its deadline still cannot stall the crawl.
    async fn fetch(
        &self,
        url: &Url,
        timeout: Duration,
        cancel: &CancellationToken,
    ) -> Option<Result<String, FetchError>> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => None,
            result = tokio::time::timeout(timeout, self.fetcher.fetch(url, timeout)) => {
                Some(result.unwrap_or(Err(FetchError::Timeout(timeout))))
            }
        }
    }
}

/// Parses a document and returns its title and normalized content
fn extract_page(body: &str) -> (Option<String>, String) {
    let mut document = Html::parse_document(body);
    let title = extract_title(&document);
    let content = extract_content(&mut document);
    (title, content)
}

/// Converts final run state into a [`CrawlOutcome`]
fn finish(state: CrawlState, counters: RunCounters) -> CrawlOutcome {
    let (pages, duplicates_removed) = state.into_parts();
    let stats = CrawlStats::from_pages(&pages, duplicates_removed);

    CrawlOutcome {
        pages,
        stats,
        failed_fetches: counters.failed_fetches,
        discovery_fetches: counters.discovery_fetches,
        cancelled: counters.cancelled,
    }
}

//! Crawl statistics
//!
//! Statistics are derived from the final page list once a crawl finishes;
//! only the duplicate counter is accumulated during the run.

use crate::state::Page;

/// Page and content-length statistics of a crawl
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlStats {
    /// Number of accepted pages
    pub total_pages: usize,

    /// Content length (characters) of each page, in page order
    pub content_lengths: Vec<usize>,

    /// Sum of all content lengths
    pub total_length: usize,

    /// Number of extracted pages dropped because their content was already seen
    pub duplicates_removed: usize,
}

impl CrawlStats {
    /// Derives statistics from the accepted pages
    pub fn from_pages(pages: &[Page], duplicates_removed: usize) -> Self {
        let content_lengths: Vec<usize> = pages.iter().map(Page::content_length).collect();
        let total_length = content_lengths.iter().sum();

        Self {
            total_pages: pages.len(),
            content_lengths,
            total_length,
            duplicates_removed,
        }
    }

    /// Shortest page content, if any page was accepted
    pub fn min_length(&self) -> Option<usize> {
        self.content_lengths.iter().copied().min()
    }

    /// Longest page content, if any page was accepted
    pub fn max_length(&self) -> Option<usize> {
        self.content_lengths.iter().copied().max()
    }

    /// Mean content length rounded down, if any page was accepted
    pub fn average_length(&self) -> Option<usize> {
        if self.total_pages == 0 {
            None
        } else {
            Some(self.total_length / self.total_pages)
        }
    }
}

/// Logs statistics at info level
pub fn log_statistics(stats: &CrawlStats) {
    tracing::info!("Crawled {} unique pages", stats.total_pages);
    tracing::info!("Removed {} duplicate pages", stats.duplicates_removed);

    if let (Some(min), Some(max), Some(avg)) = (
        stats.min_length(),
        stats.max_length(),
        stats.average_length(),
    ) {
        tracing::info!("Content length statistics:");
        tracing::info!("- Shortest: {} characters", min);
        tracing::info!("- Longest: {} characters", max);
        tracing::info!("- Average: {} characters", avg);
        tracing::info!("- Total: {} characters", stats.total_length);
    }
}

use crate::crawler::Fingerprint;
use crate::state::Page;
use std::collections::HashSet;

/// Result of offering an extracted page to the crawl state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acceptance {
    /// The fingerprint was new; the page was appended
    Accepted,

    /// The fingerprint was already present; the page was discarded
    Duplicate,
}

/// Mutable state of a single crawl run
///
/// Holds the visited-URL set, the accepted-fingerprint set and the accepted
/// pages. Every check-then-insert on the two sets happens inside a single
/// `&mut self` method, so the state can never admit a URL twice for discovery
/// or two pages with the same fingerprint.
#[derive(Debug, Default)]
pub struct CrawlState {
    /// URLs already dequeued for link discovery
    visited: HashSet<String>,

    /// Fingerprints of accepted pages
    fingerprints: HashSet<Fingerprint>,

    /// Accepted pages in insertion order
    pages: Vec<Page>,

    /// Number of extracted pages discarded as duplicates
    duplicates_removed: usize,
}

impl CrawlState {
    /// Creates an empty state; every run starts from here
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a URL as visited for discovery
    ///
    /// Returns `true` if the URL had not been visited before.
    pub fn mark_visited(&mut self, url: &str) -> bool {
        self.visited.insert(url.to_string())
    }

    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    /// Number of distinct URLs dequeued for discovery so far
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Offers an extracted page
    ///
    /// The page is appended only if no accepted page shares its fingerprint;
    /// otherwise the duplicate counter is incremented exactly once.
    pub fn accept(&mut self, fingerprint: Fingerprint, page: Page) -> Acceptance {
        if self.fingerprints.insert(fingerprint) {
            self.pages.push(page);
            Acceptance::Accepted
        } else {
            self.duplicates_removed += 1;
            Acceptance::Duplicate
        }
    }

    /// Number of accepted pages
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn duplicates_removed(&self) -> usize {
        self.duplicates_removed
    }

    /// Consumes the state, returning the accepted pages and duplicate count
    pub fn into_parts(self) -> (Vec<Page>, usize) {
        (self.pages, self.duplicates_removed)
    }
}

//! Work stack for depth-first traversal
//!
//! The crawl engine never recurses; every pending unit of work is a
//! [`CrawlTarget`] on an explicit LIFO stack, so traversal depth is limited
//! only by memory.

use url::Url;

/// Processing stage of a stack entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Fetch the page and push its in-scope links
    Discover,

    /// Fetch the page again and extract its content
    Extract,
}

/// A URL waiting on the work stack
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlTarget {
    /// The URL to process
    pub url: Url,

    /// What to do with it when popped
    pub stage: Stage,
}

impl CrawlTarget {
    pub fn discover(url: Url) -> Self {
        Self {
            url,
            stage: Stage::Discover,
        }
    }

    pub fn extract(url: Url) -> Self {
        Self {
            url,
            stage: Stage::Extract,
        }
    }
}

/// LIFO stack of crawl targets
///
/// The most recently pushed target is always processed next. This ordering
/// decides which of two identical pages is kept, so it must not change.
#[derive(Debug, Default)]
pub struct WorkStack {
    entries: Vec<CrawlTarget>,
}

impl WorkStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a stack holding a single discovery target
    pub fn seeded(url: Url) -> Self {
        Self {
            entries: vec![CrawlTarget::discover(url)],
        }
    }

    pub fn push(&mut self, target: CrawlTarget) {
        self.entries.push(target);
    }

    pub fn pop(&mut self) -> Option<CrawlTarget> {
        self.entries.pop()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

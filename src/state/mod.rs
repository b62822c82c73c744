//! State module for tracking crawl progress
//!
//! This module provides the per-run state owned by the crawl engine.
//!
//! # Components
//!
//! - `Page`: A uniquely-fingerprinted, successfully extracted document
//! - `CrawlState`: The visited-URL set, the accepted-fingerprint set and the
//!   accepted page list for a single crawl run

mod crawl_state;
mod page;

// Re-export main types
pub use crawl_state::{Acceptance, CrawlState};
pub use page::{Page, UNTITLED};

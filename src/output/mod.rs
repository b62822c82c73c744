//! Output module for crawl statistics and reports
//!
//! This module handles:
//! - Deriving statistics from the accepted pages
//! - Logging those statistics
//! - Rendering the Markdown summary report

pub mod report;
pub mod stats;

pub use report::{format_report, write_report, PageSummary, Report};
pub use stats::{log_statistics, CrawlStats};

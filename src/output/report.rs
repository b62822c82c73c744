//! Markdown report generation
//!
//! This module renders the final report: crawl statistics followed by one
//! section per summarized page.

use crate::output::CrawlStats;
use crate::summarizer::DetailLevel;
use chrono::{DateTime, Utc};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Summary of a single page, ready for the report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSummary {
    pub title: String,
    pub url: String,
    pub summary: String,
}

/// Everything the report shows
#[derive(Debug, Clone)]
pub struct Report<'a> {
    /// Crawl origin
    pub base_url: &'a str,

    /// When the report was produced
    pub generated_at: DateTime<Utc>,

    /// Verbosity the summaries were requested at
    pub detail_level: DetailLevel,

    /// Crawl statistics
    pub stats: &'a CrawlStats,

    /// Page summaries in crawl order
    pub summaries: &'a [PageSummary],
}

/// Writes a markdown report to disk
///
/// # Arguments
///
/// * `report` - The report data
/// * `output_path` - Path where the markdown file should be written
pub fn write_report(report: &Report<'_>, output_path: &Path) -> std::io::Result<()> {
    let markdown = format_report(report);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats a report as markdown
pub fn format_report(report: &Report<'_>) -> String {
    let mut md = String::new();
    let stats = report.stats;

    md.push_str("# Documentation Summary Report\n\n");

    md.push_str(&format!("- **Source**: {}\n", report.base_url));
    md.push_str(&format!(
        "- **Generated**: {}\n",
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    md.push_str(&format!("- **Detail Level**: {}\n\n", report.detail_level));

    md.push_str("## Statistics\n\n");
    md.push_str(&format!("- **Pages Crawled**: {}\n", stats.total_pages));
    md.push_str(&format!(
        "- **Duplicates Removed**: {}\n",
        stats.duplicates_removed
    ));

    // Length lines only make sense with at least one page
    if let (Some(min), Some(max), Some(avg)) = (
        stats.min_length(),
        stats.max_length(),
        stats.average_length(),
    ) {
        md.push_str(&format!("- **Shortest Content**: {} characters\n", min));
        md.push_str(&format!("- **Longest Content**: {} characters\n", max));
        md.push_str(&format!("- **Average Content**: {} characters\n", avg));
    }
    md.push_str(&format!(
        "- **Total Content**: {} characters\n\n",
        stats.total_length
    ));

    md.push_str("## Page Summaries\n\n");
    if report.summaries.is_empty() {
        md.push_str("*No pages were crawled.*\n");
    }

    for page in report.summaries {
        md.push_str(&format!("### {}\n\n", page.title));
        md.push_str(&format!("- **URL**: {}\n\n", page.url));
        md.push_str(page.summary.trim());
        md.push_str("\n\n");
    }

    md
}

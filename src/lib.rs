//! docs-digest: crawl a documentation site, drop duplicate pages, summarize the rest
//!
//! This crate implements a depth-first documentation crawler that extracts the
//! main text of every same-origin page, suppresses pages whose content is
//! identical to one already seen, and hands the unique pages to an LLM
//! summarizer before writing a Markdown report.

pub mod config;
pub mod crawler;
pub mod output;
pub mod pipeline;
pub mod state;
pub mod summarizer;
pub mod url;

use thiserror::Error;

/// Main error type for docs-digest operations
#[derive(Debug, Error)]
pub enum DigestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Summarization error: {0}")]
    Summarize(#[from] summarizer::SummarizeError),

    #[error("API key not found in environment variable {0}")]
    MissingApiKey(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),
}

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CrawlOutcome, Crawler};
pub use output::CrawlStats;
pub use state::Page;
pub use summarizer::{DetailLevel, Summarizer};

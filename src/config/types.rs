use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for docs-digest
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub summarizer: SummarizerConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawl engine configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Crawl origin; only links starting with this prefix are followed
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Maximum number of unique pages to accept
    #[serde(rename = "max-pages", default = "default_max_pages")]
    pub max_pages: usize,

    /// Timeout for link-discovery fetches (seconds)
    #[serde(rename = "discover-timeout-secs", default = "default_discover_timeout")]
    pub discover_timeout_secs: u64,

    /// Timeout for content-extraction fetches (seconds)
    #[serde(rename = "extract-timeout-secs", default = "default_extract_timeout")]
    pub extract_timeout_secs: u64,

    /// Optional cap on the number of distinct URLs fetched for discovery
    #[serde(rename = "max-discovery-fetches", default)]
    pub max_discovery_fetches: Option<usize>,
}

impl CrawlerConfig {
    pub fn discover_timeout(&self) -> Duration {
        Duration::from_secs(self.discover_timeout_secs)
    }

    pub fn extract_timeout(&self) -> Duration {
        Duration::from_secs(self.extract_timeout_secs)
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "docs-digest".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Summarization client configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SummarizerConfig {
    /// Base URL of an OpenAI-compatible API
    pub endpoint: String,

    /// Chat model name
    pub model: String,

    /// Environment variable holding the API key
    #[serde(rename = "api-key-env")]
    pub api_key_env: String,

    /// Summary verbosity tier (1-3)
    #[serde(rename = "detail-level")]
    pub detail_level: u8,

    /// Total attempts per page, including the first
    #[serde(rename = "max-attempts")]
    pub max_attempts: u32,

    /// Backoff base delay (milliseconds)
    #[serde(rename = "base-delay-ms")]
    pub base_delay_ms: u64,

    /// Backoff ceiling (milliseconds)
    #[serde(rename = "max-delay-ms")]
    pub max_delay_ms: u64,

    /// Input is truncated to this many characters before submission
    #[serde(rename = "max-input-chars")]
    pub max_input_chars: usize,

    /// Per-request timeout for the summarization API (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.deepseek.com".to_string(),
            model: "deepseek-chat".to_string(),
            api_key_env: "DEEPSEEK_API_KEY".to_string(),
            detail_level: 2,
            max_attempts: 3,
            base_delay_ms: 1000,
            max_delay_ms: 10_000,
            max_input_chars: 100_000,
            request_timeout_secs: 120,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the markdown report file
    #[serde(rename = "report-path")]
    pub report_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            report_path: "summary.md".to_string(),
        }
    }
}

fn default_max_pages() -> usize {
    50
}

fn default_discover_timeout() -> u64 {
    5
}

fn default_extract_timeout() -> u64 {
    10
}

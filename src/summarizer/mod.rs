//! Summarization module
//!
//! This module turns crawled page text into summaries:
//! - `Summarizer` is the interface the pipeline consumes
//! - `ChatSummarizer` talks to an OpenAI-compatible chat completions API
//! - `RetryingSummarizer` adds bounded retries with capped exponential backoff
//! - `DetailLevel` maps summary verbosity to a token budget

mod client;
mod prompt;
mod retry;

pub use client::ChatSummarizer;
pub use prompt::{build_prompt, truncate_chars, SYSTEM_PROMPT};
pub use retry::{RetryPolicy, RetryingSummarizer};

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// Errors produced while summarizing
#[derive(Debug, Error)]
pub enum SummarizeError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("API response contained no summary")]
    EmptyResponse,

    #[error("invalid summarizer configuration: {0}")]
    Config(String),

    #[error("summarization failed after {attempts} attempts: {last_error}")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        last_error: Box<SummarizeError>,
    },
}

/// Summary verbosity tier
///
/// Higher levels allow longer output: `Brief < Moderate < Detailed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum DetailLevel {
    Brief = 1,
    #[default]
    Moderate = 2,
    Detailed = 3,
}

impl DetailLevel {
    /// Upper bound on generated tokens for this level
    pub fn max_tokens(self) -> u32 {
        match self {
            Self::Brief => 2000,
            Self::Moderate => 5000,
            Self::Detailed => 10_000,
        }
    }

    /// Instruction phrase placed in the prompt
    pub fn instruction(self) -> &'static str {
        match self {
            Self::Brief => "give a brief summary",
            Self::Moderate => "summarize the main content",
            Self::Detailed => "give a detailed summary that keeps the key details",
        }
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for DetailLevel {
    type Error = SummarizeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Brief),
            2 => Ok(Self::Moderate),
            3 => Ok(Self::Detailed),
            other => Err(SummarizeError::Config(format!(
                "detail level must be 1, 2 or 3, got {}",
                other
            ))),
        }
    }
}

impl fmt::Display for DetailLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Brief => "brief",
            Self::Moderate => "moderate",
            Self::Detailed => "detailed",
        };
        write!(f, "{} ({})", self.as_u8(), name)
    }
}

/// Produces a summary of a page's text
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, text: &str, level: DetailLevel) -> Result<String, SummarizeError>;
}

//! Bounded retry with capped exponential backoff

use crate::config::SummarizerConfig;
use crate::summarizer::{DetailLevel, SummarizeError, Summarizer};
use async_trait::async_trait;
use std::time::Duration;

/// How often and how patiently to retry a failed summarization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,

    /// Backoff unit; the delay after failed attempt `n` is `base_delay * 2^n`
    pub base_delay: Duration,

    /// Ceiling for any single delay
    pub max_delay: Duration,
}

impl RetryPolicy {
    pub fn from_config(config: &SummarizerConfig) -> Self {
        Self {
            max_attempts: config.max_attempts,
            base_delay: Duration::from_millis(config.base_delay_ms),
            max_delay: Duration::from_millis(config.max_delay_ms),
        }
    }

    /// Delay to wait after the given failed attempt (1-based)
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let factor = 2u32.checked_pow(attempt).unwrap_or(u32::MAX);
        self.base_delay
            .checked_mul(factor)
            .unwrap_or(self.max_delay)
            .min(self.max_delay)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(10),
        }
    }
}

/// Decorator that retries an inner [`Summarizer`]
///
/// Every failure is retried until `max_attempts` is reached; the final error
/// wraps the last underlying failure. No delay follows the last attempt.
#[derive(Debug, Clone)]
pub struct RetryingSummarizer<S> {
    inner: S,
    policy: RetryPolicy,
}

impl<S: Summarizer> RetryingSummarizer<S> {
    pub fn new(inner: S, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

#[async_trait]
impl<S: Summarizer> Summarizer for RetryingSummarizer<S> {
    async fn summarize(&self, text: &str, level: DetailLevel) -> Result<String, SummarizeError> {
        let max_attempts = self.policy.max_attempts.max(1);
        let mut last_error = None;

        for attempt in 1..=max_attempts {
            match self.inner.summarize(text, level).await {
                Ok(summary) => return Ok(summary),
                Err(e) => {
                    tracing::warn!(
                        "Summarization failed (attempt {}/{}): {}",
                        attempt,
                        max_attempts,
                        e
                    );
                    last_error = Some(e);

                    if attempt < max_attempts {
                        tokio::time::sleep(self.policy.delay_after(attempt)).await;
                    }
                }
            }
        }

        Err(SummarizeError::RetriesExhausted {
            attempts: max_attempts,
            last_error: Box::new(last_error.unwrap_or(SummarizeError::EmptyResponse)),
        })
    }
}

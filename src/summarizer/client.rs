//! OpenAI-compatible chat completions client

use crate::config::SummarizerConfig;
use crate::summarizer::prompt::{build_prompt, SYSTEM_PROMPT};
use crate::summarizer::{DetailLevel, SummarizeError, Summarizer};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const TEMPERATURE: f32 = 0.7;

/// Single-attempt summarizer backed by a chat completions endpoint
///
/// Wrap it in [`RetryingSummarizer`](crate::summarizer::RetryingSummarizer)
/// for retries.
#[derive(Debug, Clone)]
pub struct ChatSummarizer {
    client: Client,
    endpoint: String,
    model: String,
    max_input_chars: usize,
}

impl ChatSummarizer {
    /// Builds a client for `{endpoint}/chat/completions`
    ///
    /// # Arguments
    ///
    /// * `api_key` - Bearer token for the API
    /// * `config` - Endpoint, model, input cap and request timeout
    pub fn new(api_key: &str, config: &SummarizerConfig) -> Result<Self, SummarizeError> {
        if api_key.trim().is_empty() {
            return Err(SummarizeError::Config("API key is empty".to_string()));
        }

        let mut headers = HeaderMap::new();
        let auth = format!("Bearer {}", api_key.trim());
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&auth)
                .map_err(|_| SummarizeError::Config("API key is not a valid header value".to_string()))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", config.endpoint.trim_end_matches('/')),
            model: config.model.clone(),
            max_input_chars: config.max_input_chars,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Summarizer for ChatSummarizer {
    async fn summarize(&self, text: &str, level: DetailLevel) -> Result<String, SummarizeError> {
        let prompt = build_prompt(text, level, self.max_input_chars);
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt,
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: level.max_tokens(),
        };

        let response = self.client.post(&self.endpoint).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SummarizeError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or(SummarizeError::EmptyResponse)
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

//! Integration tests for the summarization client
//!
//! A wiremock server stands in for the chat completions API.

use docs_digest::config::SummarizerConfig;
use docs_digest::summarizer::{
    build_prompt, ChatSummarizer, DetailLevel, RetryPolicy, RetryingSummarizer, SummarizeError,
    Summarizer, SYSTEM_PROMPT,
};
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config(server: &MockServer) -> SummarizerConfig {
    SummarizerConfig {
        endpoint: server.uri(),
        model: "test-model".to_string(),
        request_timeout_secs: 5,
        ..SummarizerConfig::default()
    }
}

fn completion(content: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "id": "chatcmpl-1",
        "choices": [
            {
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }
        ]
    }))
}

fn fast_policy(max_attempts: u32) -> RetryPolicy {
    RetryPolicy {
        max_attempts,
        base_delay: Duration::from_millis(1),
        max_delay: Duration::from_millis(5),
    }
}

#[tokio::test]
async fn test_successful_summary() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(json!({
            "model": "test-model",
            "max_tokens": 5000
        })))
        .respond_with(completion("  The page explains setup.  "))
        .expect(1)
        .mount(&server)
        .await;

    let summarizer = ChatSummarizer::new("test-key", &test_config(&server)).unwrap();
    let summary = summarizer
        .summarize("Install the tool, then run it.", DetailLevel::Moderate)
        .await
        .expect("Summarization failed");

    assert_eq!(summary, "The page explains setup.");
}

#[tokio::test]
async fn test_request_carries_prompt_and_budget() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(completion("ok"))
        .mount(&server)
        .await;

    let config = SummarizerConfig {
        max_input_chars: 10,
        ..test_config(&server)
    };
    let text = "0123456789 and everything after the cut";

    let summarizer = ChatSummarizer::new("test-key", &config).unwrap();
    summarizer.summarize(text, DetailLevel::Detailed).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);

    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["max_tokens"], 10_000);
    assert_eq!(body["messages"][0]["role"], "system");
    assert_eq!(body["messages"][0]["content"], SYSTEM_PROMPT);
    assert_eq!(body["messages"][1]["role"], "user");
    assert_eq!(
        body["messages"][1]["content"],
        build_prompt(text, DetailLevel::Detailed, 10)
    );
    assert!(!body["messages"][1]["content"]
        .as_str()
        .unwrap()
        .contains("after the cut"));
}

#[tokio::test]
async fn test_error_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
        .mount(&server)
        .await;

    let summarizer = ChatSummarizer::new("test-key", &test_config(&server)).unwrap();
    let error = summarizer
        .summarize("text", DetailLevel::Brief)
        .await
        .unwrap_err();

    match error {
        SummarizeError::Status { status, body } => {
            assert_eq!(status, 401);
            assert_eq!(body, "bad key");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_empty_choices() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let summarizer = ChatSummarizer::new("test-key", &test_config(&server)).unwrap();
    let result = summarizer.summarize("text", DetailLevel::Brief).await;

    assert!(matches!(result, Err(SummarizeError::EmptyResponse)));
}

#[tokio::test]
async fn test_retry_recovers_from_server_errors() {
    let server = MockServer::start().await;

    // First two calls fail, then the API recovers
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(completion("Recovered summary"))
        .mount(&server)
        .await;

    let client = ChatSummarizer::new("test-key", &test_config(&server)).unwrap();
    let summarizer = RetryingSummarizer::new(client, fast_policy(3));

    let summary = summarizer
        .summarize("text", DetailLevel::Moderate)
        .await
        .expect("Retry should recover");

    assert_eq!(summary, "Recovered summary");
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 3);
}

#[tokio::test]
async fn test_retry_exhaustion() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .expect(2)
        .mount(&server)
        .await;

    let client = ChatSummarizer::new("test-key", &test_config(&server)).unwrap();
    let summarizer = RetryingSummarizer::new(client, fast_policy(2));

    let error = summarizer
        .summarize("text", DetailLevel::Moderate)
        .await
        .unwrap_err();

    match error {
        SummarizeError::RetriesExhausted {
            attempts,
            last_error,
        } => {
            assert_eq!(attempts, 2);
            assert!(matches!(
                *last_error,
                SummarizeError::Status { status: 503, .. }
            ));
        }
        other => panic!("unexpected error: {other}"),
    }
}

//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and run the full
//! crawl cycle end-to-end over real HTTP.

use async_trait::async_trait;
use docs_digest::config::{parse_config, CrawlerConfig, UserAgentConfig};
use docs_digest::crawler::{
    crawl, CrawlOptions, Crawler, FetchError, Fetcher, FetcherConfig, HttpFetcher,
};
use docs_digest::pipeline;
use docs_digest::summarizer::{DetailLevel, SummarizeError, Summarizer};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use url::Url;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Serves `html` for GET requests to `route`
async fn mount_page(server: &MockServer, route: &str, html: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_raw(html, "text/html"))
        .mount(server)
        .await;
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<html><head><title>{}</title></head><body><main>{}</main></body></html>",
        title, body
    )
}

fn test_crawler_config(base_url: &str, max_pages: usize) -> CrawlerConfig {
    CrawlerConfig {
        base_url: base_url.to_string(),
        max_pages,
        discover_timeout_secs: 2,
        extract_timeout_secs: 2,
        max_discovery_fetches: None,
    }
}

fn test_user_agent() -> UserAgentConfig {
    UserAgentConfig {
        crawler_name: "docs-digest-test".to_string(),
        crawler_version: "9.9".to_string(),
    }
}

fn test_fetcher() -> HttpFetcher {
    HttpFetcher::new(&FetcherConfig::from_user_agent(&test_user_agent()))
        .expect("Failed to build HTTP fetcher")
}

#[tokio::test]
async fn test_duplicate_page_is_dropped() {
    let server = MockServer::start().await;
    let base = server.uri();

    // "/" and "/a" render identical content
    let home = page(
        "Home",
        r#"<p>Welcome to the docs</p><a href="/a">A</a><a href="/b">B</a>"#,
    );
    mount_page(&server, "/", home.clone()).await;
    mount_page(&server, "/a", home).await;
    mount_page(&server, "/b", page("B", "<p>Something else entirely</p>")).await;

    let outcome = crawl(
        &test_crawler_config(&base, 50),
        &test_user_agent(),
        CancellationToken::new(),
    )
    .await
    .expect("Crawl failed");

    let urls: Vec<&str> = outcome.pages.iter().map(|p| p.url.as_str()).collect();
    assert_eq!(urls, vec![format!("{}/", base), format!("{}/b", base)]);
    assert_eq!(outcome.pages[0].title, "Home");
    assert_eq!(outcome.pages[1].title, "B");
    assert_eq!(outcome.stats.total_pages, 2);
    assert_eq!(outcome.stats.duplicates_removed, 1);
    assert_eq!(outcome.discovery_fetches, 3);
    assert_eq!(outcome.failed_fetches, 0);
    assert!(!outcome.cancelled);
}

#[tokio::test]
async fn test_zero_max_pages_sends_no_requests() {
    let server = MockServer::start().await;
    mount_page(&server, "/", page("Home", "<p>hello</p>")).await;

    let outcome = crawl(
        &test_crawler_config(&server.uri(), 0),
        &test_user_agent(),
        CancellationToken::new(),
    )
    .await
    .expect("Crawl failed");

    assert!(outcome.pages.is_empty());
    assert_eq!(outcome.stats.total_pages, 0);
    assert_eq!(outcome.stats.min_length(), None);

    let requests = server.received_requests().await.unwrap_or_default();
    assert!(requests.is_empty());
}

#[tokio::test]
async fn test_other_origin_is_never_fetched() {
    let site = MockServer::start().await;
    let elsewhere = MockServer::start().await;

    mount_page(
        &site,
        "/",
        page(
            "Home",
            &format!(
                r#"<p>home</p><a href="{}/external">External</a><a href="/guide">Guide</a>"#,
                elsewhere.uri()
            ),
        ),
    )
    .await;
    mount_page(&site, "/guide", page("Guide", "<p>guide</p>")).await;
    mount_page(&elsewhere, "/external", page("External", "<p>external</p>")).await;

    let outcome = crawl(
        &test_crawler_config(&site.uri(), 50),
        &test_user_agent(),
        CancellationToken::new(),
    )
    .await
    .expect("Crawl failed");

    assert_eq!(outcome.pages.len(), 2);
    assert!(outcome
        .pages
        .iter()
        .all(|p| p.url.starts_with(&site.uri())));

    let requests = elsewhere.received_requests().await.unwrap_or_default();
    assert!(requests.is_empty());
}

#[tokio::test]
async fn test_broken_links_are_tolerated() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        page(
            "Home",
            r#"<p>home</p><a href="/missing">Missing</a><a href="/ok">Ok</a>"#,
        ),
    )
    .await;
    mount_page(&server, "/ok", page("Ok", "<p>fine</p>")).await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let outcome = crawl(
        &test_crawler_config(&server.uri(), 50),
        &test_user_agent(),
        CancellationToken::new(),
    )
    .await
    .expect("Crawl failed");

    let titles: Vec<&str> = outcome.pages.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["Home", "Ok"]);
    assert_eq!(outcome.failed_fetches, 1);
}

#[tokio::test]
async fn test_page_cap_stops_crawl() {
    let server = MockServer::start().await;

    let links: String = (0..10)
        .map(|i| format!(r#"<a href="/p{}">p{}</a>"#, i, i))
        .collect();
    mount_page(&server, "/", page("Home", &format!("<p>index</p>{}", links))).await;
    for i in 0..10 {
        mount_page(
            &server,
            &format!("/p{}", i),
            page(&format!("P{}", i), &format!("<p>page number {}</p>", i)),
        )
        .await;
    }

    let outcome = crawl(
        &test_crawler_config(&server.uri(), 3),
        &test_user_agent(),
        CancellationToken::new(),
    )
    .await
    .expect("Crawl failed");

    let titles: Vec<&str> = outcome.pages.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["Home", "P9", "P8"]);
    assert_eq!(outcome.stats.total_pages, 3);
}

#[tokio::test]
async fn test_invalid_base_url_is_fatal() {
    let result = crawl(
        &test_crawler_config("not a url", 5),
        &test_user_agent(),
        CancellationToken::new(),
    )
    .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_fetcher_sends_user_agent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("user-agent", "docs-digest-test/9.9"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<p>ok</p>", "text/html"))
        .mount(&server)
        .await;

    let url = Url::parse(&format!("{}/", server.uri())).unwrap();
    let body = test_fetcher()
        .fetch(&url, Duration::from_secs(2))
        .await
        .expect("Fetch failed");

    assert_eq!(body, "<p>ok</p>");
}

#[tokio::test]
async fn test_fetcher_reports_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let url = Url::parse(&format!("{}/broken", server.uri())).unwrap();
    let result = test_fetcher().fetch(&url, Duration::from_secs(2)).await;

    assert!(matches!(result, Err(FetchError::Status(500))));
}

#[tokio::test]
async fn test_fetcher_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("<p>late</p>", "text/html")
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let url = Url::parse(&format!("{}/slow", server.uri())).unwrap();
    let result = test_fetcher().fetch(&url, Duration::from_millis(200)).await;

    assert!(matches!(result, Err(FetchError::Timeout(_))));
}

#[tokio::test]
async fn test_slow_page_is_skipped() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        page("Home", r#"<p>home</p><a href="/slow">Slow</a>"#),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(page("Slow", "<p>slow</p>"), "text/html")
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let options = CrawlOptions {
        max_pages: 10,
        discover_timeout: Duration::from_millis(300),
        extract_timeout: Duration::from_millis(300),
        max_discovery_fetches: None,
    };
    let crawler = Crawler::new(test_fetcher(), &server.uri(), options).unwrap();
    let outcome = crawler.crawl().await;

    assert_eq!(outcome.pages.len(), 1);
    assert_eq!(outcome.pages[0].title, "Home");
    assert_eq!(outcome.failed_fetches, 1);
}

/// Summarizer that reports the content length instead of calling an API
struct LengthSummarizer;

#[async_trait]
impl Summarizer for LengthSummarizer {
    async fn summarize(&self, text: &str, level: DetailLevel) -> Result<String, SummarizeError> {
        Ok(format!("{} characters at level {}", text.chars().count(), level.as_u8()))
    }
}

#[tokio::test]
async fn test_pipeline_writes_report() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/",
        page("Home", r#"<p>abcd</p><a href="/guide">x</a>"#),
    )
    .await;
    mount_page(&server, "/guide", page("Guide", "<p>ab</p>")).await;

    let dir = tempfile::tempdir().unwrap();
    let report_path = dir.path().join("digest.md");
    let config = parse_config(&format!(
        r#"
[crawler]
base-url = "{}"
max-pages = 10

[summarizer]
detail-level = 1

[output]
report-path = '{}'
"#,
        server.uri(),
        report_path.display()
    ))
    .expect("Failed to parse config");

    let outcome = pipeline::run_with(&config, &LengthSummarizer, CancellationToken::new())
        .await
        .expect("Pipeline failed");

    assert_eq!(outcome.summaries.len(), 2);
    assert_eq!(outcome.report_path, report_path);

    let report = std::fs::read_to_string(&report_path).unwrap();
    assert!(report.contains("- **Pages Crawled**: 2\n"));
    assert!(report.contains("- **Detail Level**: 1 (brief)\n"));
    assert!(report.contains("### Home\n"));
    assert!(report.contains("### Guide\n"));
    assert!(report.contains("2 characters at level 1"));
}

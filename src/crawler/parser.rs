//! HTML link extraction
//!
//! This module collects the outbound links of a page:
//! - Links to follow come from `<a href="...">` tags
//! - Relative links are resolved against the crawl base URL, whichever page
//!   they appear on
//! - Fragments are dropped so anchors within a page share one URL

use crate::url::canonicalize;
use scraper::{Html, Selector};
use url::Url;

/// Extracts all followable links from the HTML document
///
/// # Link Extraction Rules
///
/// **Include:**
/// - `<a href="...">` tags anywhere in the document
///
/// **Exclude:**
/// - `<a href="..." download>`
/// - `javascript:`, `mailto:`, `tel:` links
/// - Data URIs
/// - Fragment-only links (same page anchors)
/// - Anything that does not resolve to HTTP(S)
///
/// Links are returned in document order; duplicates are kept, since the
/// crawl engine's visited set already ignores repeats.
///
/// # Example
///
/// ```
/// use docs_digest::crawler::parse_links;
/// use scraper::Html;
/// use url::Url;
///
/// let document = Html::parse_document(r#"<a href="guide#install">Guide</a>"#);
/// let base_url = Url::parse("https://ex.com/docs/").unwrap();
/// let links = parse_links(&document, &base_url);
/// assert_eq!(links[0].as_str(), "https://ex.com/docs/guide");
/// ```
pub fn parse_links(document: &Html, base_url: &Url) -> Vec<Url> {
    let Ok(a_selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&a_selector)
        .filter(|element| element.value().attr("download").is_none())
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_link(href, base_url))
        .collect()
}

/// Parses an HTML string and extracts its links
pub fn extract_links(html: &str, base_url: &Url) -> Vec<Url> {
    let document = Html::parse_document(html);
    parse_links(&document, base_url)
}

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - Fragment-only hrefs
/// - Invalid URLs
/// - Non-HTTP(S) URLs after resolution
fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lower = href.to_ascii_lowercase();
    if lower.starts_with("javascript:")
        || lower.starts_with("mailto:")
        || lower.starts_with("tel:")
        || lower.starts_with("data:")
    {
        return None;
    }

    let absolute_url = base_url.join(href).ok()?;
    match absolute_url.scheme() {
        "http" | "https" => Some(canonicalize(absolute_url)),
        _ => None,
    }
}

//! Main-content extraction
//!
//! This module turns a parsed HTML document into the normalized plain text
//! used for fingerprinting and summarization:
//! - Page chrome (scripts, styles, navigation, headers, footers, sidebars,
//!   embedded frames) is detached from the tree first
//! - The most specific content container is selected
//! - Text nodes are trimmed and joined into non-blank lines

use scraper::{ElementRef, Html, Selector};

/// Elements that never contribute to page content
const NOISE_SELECTOR: &str = "script, style, nav, footer, iframe, aside, header";

/// Content containers in priority order
const CONTAINER_SELECTORS: &[&str] = &["article", "main", "div.content", "body"];

/// Extracts the page title from the HTML document
///
/// Returns `None` when the document has no `<title>` or the title is blank.
pub fn extract_title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Extracts the normalized main-content text of a document
///
/// The document is modified in place: noise elements are detached before the
/// content container is chosen, so a `<header>` wrapping an `<article>` hides
/// that article as well.
///
/// # Container Priority
///
/// 1. First `<article>`
/// 2. First `<main>`
/// 3. First `<div class="content">`
/// 4. `<body>`
///
/// Returns an empty string when none of these exist.
///
/// # Example
///
/// ```
/// use docs_digest::crawler::extract_content;
/// use scraper::Html;
///
/// let mut document = Html::parse_document(
///     "<html><body><nav>Menu</nav><article><h1> Intro </h1><p>Hello</p></article></body></html>",
/// );
/// assert_eq!(extract_content(&mut document), "Intro\nHello");
/// ```
pub fn extract_content(document: &mut Html) -> String {
    strip_noise(document);

    match select_container(document) {
        Some(container) => normalize_text(container.text()),
        None => String::new(),
    }
}

/// Detaches every noise element from the document tree
fn strip_noise(document: &mut Html) {
    let Ok(noise) = Selector::parse(NOISE_SELECTOR) else {
        return;
    };

    let ids: Vec<_> = document.select(&noise).map(|element| element.id()).collect();
    for id in ids {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }
}

/// Picks the most specific content container available
///
/// Searches from the root element rather than `Html::select`, which also
/// visits nodes detached by [`strip_noise`].
fn select_container(document: &Html) -> Option<ElementRef<'_>> {
    let root = document.root_element();
    CONTAINER_SELECTORS.iter().find_map(|css| {
        let selector = Selector::parse(css).ok()?;
        root.select(&selector).next()
    })
}

/// Collapses text fragments into trimmed, non-blank lines joined by `\n`
///
/// Whitespace-only differences between two renderings of the same content
/// disappear here, which keeps their fingerprints equal.
pub fn normalize_text<'a>(fragments: impl Iterator<Item = &'a str>) -> String {
    fragments
        .flat_map(|fragment| fragment.split(|c: char| c == '\n' || c == '\r'))
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

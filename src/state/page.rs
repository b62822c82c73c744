/// Title used for pages without a usable `<title>` element
pub const UNTITLED: &str = "Untitled";

/// A unique page accepted by the crawler
///
/// Pages are created once per uniquely-fingerprinted document and never
/// modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Page title (from the `<title>` element)
    pub title: String,

    /// URL the content was extracted from
    pub url: String,

    /// Normalized main-content text
    pub content: String,
}

impl Page {
    /// Creates a page, substituting [`UNTITLED`] for a missing title
    pub fn new(title: Option<String>, url: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.unwrap_or_else(|| UNTITLED.to_string()),
            url: url.into(),
            content: content.into(),
        }
    }

    /// Content length in characters
    pub fn content_length(&self) -> usize {
        self.content.chars().count()
    }
}

use crate::UrlError;
use url::Url;

/// Parses and validates the crawl base URL
///
/// The base URL must be absolute and use http or https. Its serialized form
/// becomes the prefix every followed link has to start with.
///
/// # Examples
///
/// ```
/// use docs_digest::url::parse_base_url;
///
/// let base = parse_base_url("https://docs.example.com").unwrap();
/// assert_eq!(base.as_str(), "https://docs.example.com/");
/// assert!(parse_base_url("docs.example.com").is_err());
/// ```
pub fn parse_base_url(url_str: &str) -> Result<Url, UrlError> {
    let url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(UrlError::Parse(format!("URL has no host: {}", url_str)));
    }

    Ok(canonicalize(url))
}

/// Canonicalizes a resolved link
///
/// Only the fragment is removed: `/guide#install` and `/guide` name the same
/// document and must share a visited-set entry. Scheme and host are already
/// lowercased by the `url` crate; the path is kept as written so that prefix
/// filtering against the base URL stays exact.
///
/// # Examples
///
/// ```
/// use docs_digest::url::canonicalize;
/// use url::Url;
///
/// let url = canonicalize(Url::parse("https://Docs.Example.com/guide#install").unwrap());
/// assert_eq!(url.as_str(), "https://docs.example.com/guide");
/// ```
pub fn canonicalize(mut url: Url) -> Url {
    url.set_fragment(None);
    url
}

use url::Url;

/// Checks whether a link falls inside the crawl scope
///
/// A link is in scope when its serialized form starts with the serialized
/// base URL. This restricts the crawl to the base origin and, when the base
/// URL carries a path, to that path prefix.
///
/// # Examples
///
/// ```
/// use docs_digest::url::in_scope;
/// use url::Url;
///
/// let base = Url::parse("https://ex.com/docs/").unwrap();
///
/// assert!(in_scope(&base, &Url::parse("https://ex.com/docs/intro").unwrap()));
/// assert!(!in_scope(&base, &Url::parse("https://ex.com/blog/").unwrap()));
/// assert!(!in_scope(&base, &Url::parse("https://other.com/docs/").unwrap()));
/// ```
pub fn in_scope(base: &Url, candidate: &Url) -> bool {
    candidate.as_str().starts_with(base.as_str())
}

//! Content fingerprints for duplicate detection
//!
//! A fingerprint is the SHA-256 digest of a page's normalized text. It is used
//! purely as an equality oracle: two pages are duplicates exactly when their
//! fingerprints are equal.

use sha2::{Digest, Sha256};
use std::fmt;

/// SHA-256 digest of normalized page content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    /// Computes the fingerprint of a piece of normalized text
    ///
    /// # Examples
    ///
    /// ```
    /// use docs_digest::crawler::Fingerprint;
    ///
    /// assert_eq!(Fingerprint::of("hello"), Fingerprint::of("hello"));
    /// assert_ne!(Fingerprint::of("hello"), Fingerprint::of("hello\n"));
    /// ```
    pub fn of(content: &str) -> Self {
        let digest = Sha256::digest(content.as_bytes());
        Self(digest.into())
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

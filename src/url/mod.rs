//! URL handling module for docs-digest
//!
//! This module provides base URL parsing, link canonicalization and the
//! same-origin prefix filter that decides which links the crawler follows.

mod normalize;
mod scope;

pub use normalize::{canonicalize, parse_base_url};
pub use scope::in_scope;

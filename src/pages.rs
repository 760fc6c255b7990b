//! Page registry
//!
//! Pages are keyed by path. Upserting a page with a known path replaces it
//! in place; a new path is appended.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A page record: a path plus arbitrary metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub path: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Page {
    /// Creates a page with no metadata
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            fields: Map::new(),
        }
    }

    /// Builder: sets a metadata field
    pub fn with(mut self, key: impl Into<String>, value: Value) -> Self {
        self.fields.insert(key.into(), value);
        self
    }
}

/// Returns `pages` with `page` upserted by path.
///
/// The input is never modified. Applying the same upsert twice yields the
/// same list as applying it once.
pub fn upsert(pages: &[Page], page: Page) -> Vec<Page> {
    let mut next = pages.to_vec();
    match next.iter().position(|p| p.path == page.path) {
        Some(index) => next[index] = page,
        None => next.push(page),
    }
    next
}

//! Dotted field paths

use std::fmt;

use serde::{Deserialize, Serialize};

/// Separator used when a path is rendered as an enum value
pub const ENUM_SEPARATOR: &str = "___";

/// A path into a node's shape, e.g. `frontmatter.title`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct FieldPath(Vec<String>);

impl FieldPath {
    /// Parses a dotted path. Empty segments are dropped.
    pub fn parse(dotted: &str) -> Self {
        Self(
            dotted
                .split('.')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    /// Creates a single-segment path
    pub fn root(name: impl Into<String>) -> Self {
        Self(vec![name.into()])
    }

    /// Returns a new path with `name` appended
    pub fn child(&self, name: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(name.into());
        Self(segments)
    }

    /// Returns the path segments
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Returns true if the path has no segments
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Renders the path as an enum value (`frontmatter___title`)
    pub fn enum_name(&self) -> String {
        self.0.join(ENUM_SEPARATOR)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

impl From<String> for FieldPath {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<&str> for FieldPath {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl From<FieldPath> for String {
    fn from(path: FieldPath) -> Self {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let path = FieldPath::parse("frontmatter.title");
        assert_eq!(path.segments(), &["frontmatter", "title"]);
        assert_eq!(path.to_string(), "frontmatter.title");
    }

    #[test]
    fn test_enum_name() {
        let path = FieldPath::parse("frontmatter.author.name");
        assert_eq!(path.enum_name(), "frontmatter___author___name");
    }

    #[test]
    fn test_child() {
        let path = FieldPath::root("frontmatter").child("date");
        assert_eq!(path, FieldPath::parse("frontmatter.date"));
    }

    #[test]
    fn test_empty_segments_dropped() {
        assert!(FieldPath::parse("").is_empty());
        assert_eq!(FieldPath::parse("a..b").segments(), &["a", "b"]);
    }
}

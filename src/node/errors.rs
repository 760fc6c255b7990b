//! Errors raised at the node boundary

use thiserror::Error;

/// Result type for node construction and store operations
pub type NodeResult<T> = Result<T, NodeError>;

/// Node construction errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NodeError {
    /// The document is not a JSON object
    #[error("Node document must be a JSON object")]
    NotAnObject,

    /// The document has no string `id`
    #[error("Node document is missing a string `id`")]
    MissingId,

    /// The document has no string `type`
    #[error("Node {0} is missing a string `type`")]
    MissingType(String),
}

impl NodeError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            NodeError::NotAnObject => "NODE_NOT_AN_OBJECT",
            NodeError::MissingId => "NODE_MISSING_ID",
            NodeError::MissingType(_) => "NODE_MISSING_TYPE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(NodeError::NotAnObject.code(), "NODE_NOT_AN_OBJECT");
        assert_eq!(NodeError::MissingId.code(), "NODE_MISSING_ID");
        assert_eq!(
            NodeError::MissingType("n1".to_string()).code(),
            "NODE_MISSING_TYPE"
        );
    }

    #[test]
    fn test_missing_type_names_node() {
        let err = NodeError::MissingType("post-1".to_string());
        assert!(err.to_string().contains("post-1"));
    }
}

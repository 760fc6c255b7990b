//! Filter operators

use std::fmt;

use serde::{Deserialize, Serialize};

/// Comparison operators accepted in a filter clause
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterOperator {
    /// Equals
    Eq,
    /// Not equals
    Ne,
    /// Greater than
    Gt,
    /// Greater than or equal
    Gte,
    /// Less than
    Lt,
    /// Less than or equal
    Lte,
    /// Value in list
    In,
    /// Value not in list
    Nin,
    /// Regular expression match (`/pattern/flags`)
    Regex,
    /// Glob match (`*`, `**`, `?`)
    Glob,
    /// Field present and non-null (or absent, for `false`)
    Exists,
    /// Nested filter applied to any element of a list of objects
    ElemMatch,
}

impl FilterOperator {
    /// Every operator, in declaration order
    pub const ALL: &'static [FilterOperator] = &[
        FilterOperator::Eq,
        FilterOperator::Ne,
        FilterOperator::Gt,
        FilterOperator::Gte,
        FilterOperator::Lt,
        FilterOperator::Lte,
        FilterOperator::In,
        FilterOperator::Nin,
        FilterOperator::Regex,
        FilterOperator::Glob,
        FilterOperator::Exists,
        FilterOperator::ElemMatch,
    ];

    /// Get the operator string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOperator::Eq => "eq",
            FilterOperator::Ne => "ne",
            FilterOperator::Gt => "gt",
            FilterOperator::Gte => "gte",
            FilterOperator::Lt => "lt",
            FilterOperator::Lte => "lte",
            FilterOperator::In => "in",
            FilterOperator::Nin => "nin",
            FilterOperator::Regex => "regex",
            FilterOperator::Glob => "glob",
            FilterOperator::Exists => "exists",
            FilterOperator::ElemMatch => "elemMatch",
        }
    }

    /// Parses an operator name
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|op| op.as_str() == name)
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

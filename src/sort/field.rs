//! Sort input construction and resolution

use serde::{Deserialize, Serialize};

use crate::executor::{QueryError, QueryResult};
use crate::inference::FieldPath;

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Sort argument as supplied by a caller
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortArgs {
    /// Enum name (`frontmatter___date`) or dotted path
    #[serde(default)]
    pub field: Option<String>,
    /// Direction, ascending when omitted
    #[serde(default)]
    pub order: SortOrder,
}

impl SortArgs {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            order: SortOrder::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            order: SortOrder::Desc,
        }
    }
}

/// Validated sort specification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    /// Field to sort by
    pub path: FieldPath,
    /// Sort direction
    pub order: SortOrder,
}

/// One value of the sort enumeration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortField {
    /// Enum value name
    pub name: String,
    /// Path the value sorts by
    pub path: FieldPath,
}

/// Closed sort input for one connection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortInput {
    name: String,
    fields: Vec<SortField>,
    default_order: SortOrder,
}

impl SortInput {
    /// Returns the input type name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the enumeration in order
    pub fn fields(&self) -> &[SortField] {
        &self.fields
    }

    /// Returns the order used when none is given
    pub fn default_order(&self) -> SortOrder {
        self.default_order
    }

    /// Looks up an enum value by name or dotted path
    pub fn field(&self, name: &str) -> Option<&SortField> {
        let dotted = FieldPath::parse(name);
        self.fields
            .iter()
            .find(|f| f.name == name || f.path == dotted)
    }

    /// Validates a caller's sort argument.
    ///
    /// Returns `None` when no field is named (insertion order).
    pub fn resolve(&self, args: Option<&SortArgs>) -> QueryResult<Option<SortSpec>> {
        let Some(args) = args else {
            return Ok(None);
        };
        let Some(name) = args.field.as_deref() else {
            return Ok(None);
        };

        let field = self
            .field(name)
            .ok_or_else(|| QueryError::UnknownSortField(name.to_string()))?;

        Ok(Some(SortSpec {
            path: field.path.clone(),
            order: args.order,
        }))
    }
}

/// Builds the sort input `<type_name>Sort` over the given paths.
///
/// Duplicate paths keep their first position. An empty path list still
/// yields a valid input that accepts no field.
pub fn build_sort_field(type_name: &str, sort_paths: &[FieldPath]) -> SortInput {
    let mut fields: Vec<SortField> = Vec::with_capacity(sort_paths.len());
    for path in sort_paths {
        if path.is_empty() || fields.iter().any(|f| &f.path == path) {
            continue;
        }
        fields.push(SortField {
            name: path.enum_name(),
            path: path.clone(),
        });
    }

    SortInput {
        name: format!("{}Sort", type_name),
        fields,
        default_order: SortOrder::Asc,
    }
}

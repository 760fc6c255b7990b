//! Inferred field kinds
//!
//! Kinds form a tagged union of scalars plus recursive composites. When two
//! observations of the same path disagree, [`FieldKind::widen`] picks the
//! most permissive kind both support; it never fails.

use serde::{Deserialize, Serialize};

use super::operator::FilterOperator;
use super::shape::FilterInputShape;

use FilterOperator::*;

const STRING_OPS: &[FilterOperator] = &[Eq, Ne, In, Nin, Regex, Glob, Exists];
const NUMBER_OPS: &[FilterOperator] = &[Eq, Ne, Gt, Gte, Lt, Lte, In, Nin, Exists];
const BOOLEAN_OPS: &[FilterOperator] = &[Eq, Ne, In, Nin, Exists];
const DATE_OPS: &[FilterOperator] = &[Eq, Ne, Gt, Gte, Lt, Lte, In, Nin, Regex, Glob, Exists];
const REFERENCE_OPS: &[FilterOperator] = &[Eq, Ne, In, Nin, Exists];
const MIXED_OPS: &[FilterOperator] = &[Eq, Ne, Exists];
const OBJECT_LIST_OPS: &[FilterOperator] = &[ElemMatch, Exists];
const EXISTS_ONLY: &[FilterOperator] = &[Exists];

/// Kind of a field as inferred from sampled values or declared by a plugin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldKind {
    /// UTF-8 string
    String,
    /// JSON number
    Number,
    /// Boolean
    Boolean,
    /// ISO-8601 date or datetime string
    Date,
    /// Id (or ids) of other nodes
    Reference,
    /// Array with a widened element kind
    List {
        /// Element kind (boxed to allow recursive types)
        element: Box<FieldKind>,
    },
    /// Nested object with its own field shape
    Object {
        /// Nested fields
        fields: FilterInputShape,
    },
    /// Observations disagreed
    Mixed {
        /// Whether a composite kind took part in the conflict
        composite: bool,
    },
    /// No non-null value observed (only as a list element)
    Unknown,
}

impl FieldKind {
    /// Creates a list kind
    pub fn list(element: FieldKind) -> Self {
        FieldKind::List {
            element: Box::new(element),
        }
    }

    /// Creates an object kind
    pub fn object(fields: FilterInputShape) -> Self {
        FieldKind::Object { fields }
    }

    /// Returns the kind name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Number => "number",
            FieldKind::Boolean => "boolean",
            FieldKind::Date => "date",
            FieldKind::Reference => "reference",
            FieldKind::List { .. } => "list",
            FieldKind::Object { .. } => "object",
            FieldKind::Mixed { .. } => "mixed",
            FieldKind::Unknown => "unknown",
        }
    }

    /// Returns true for objects, lists of objects and composite conflicts
    pub fn is_composite(&self) -> bool {
        match self {
            FieldKind::Object { .. } => true,
            FieldKind::List { element } => element.is_composite(),
            FieldKind::Mixed { composite } => *composite,
            _ => false,
        }
    }

    /// Returns true if the field can be used as a sort key
    pub fn is_sortable(&self) -> bool {
        !self.is_composite()
    }

    /// Returns the operators a filter clause may use on this field.
    ///
    /// Object fields additionally accept nested field filters, resolved
    /// through [`FieldKind::nested_shape`].
    pub fn operators(&self) -> &'static [FilterOperator] {
        match self {
            FieldKind::String => STRING_OPS,
            FieldKind::Number => NUMBER_OPS,
            FieldKind::Boolean => BOOLEAN_OPS,
            FieldKind::Date => DATE_OPS,
            FieldKind::Reference => REFERENCE_OPS,
            FieldKind::Mixed { .. } => MIXED_OPS,
            FieldKind::Object { .. } | FieldKind::Unknown => EXISTS_ONLY,
            FieldKind::List { element } => match element.as_ref() {
                FieldKind::Object { .. } => OBJECT_LIST_OPS,
                other => other.operators(),
            },
        }
    }

    /// Returns true if the operator is valid for this kind
    pub fn supports(&self, op: FilterOperator) -> bool {
        self.operators().contains(&op)
    }

    /// Returns the shape that nested filters resolve against: the fields of
    /// an object, or the element fields of a list of objects.
    pub fn nested_shape(&self) -> Option<&FilterInputShape> {
        match self {
            FieldKind::Object { fields } => Some(fields),
            FieldKind::List { element } => match element.as_ref() {
                FieldKind::Object { fields } => Some(fields),
                _ => None,
            },
            _ => None,
        }
    }

    /// Combines two observations of the same path
    pub fn widen(self, other: FieldKind) -> FieldKind {
        use FieldKind::*;

        match (self, other) {
            (Unknown, k) | (k, Unknown) => k,
            (Object { fields: mut a }, Object { fields: b }) => {
                a.absorb(b);
                Object { fields: a }
            }
            (List { element: a }, List { element: b }) => List {
                element: Box::new(a.widen(*b)),
            },
            (Date, String) | (String, Date) => String,
            (Mixed { composite }, k) | (k, Mixed { composite }) => Mixed {
                composite: composite || k.is_composite(),
            },
            (a, b) if a == b => a,
            (a, b) => Mixed {
                composite: a.is_composite() || b.is_composite(),
            },
        }
    }
}

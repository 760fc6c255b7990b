//! Filter compilation and evaluation
//!
//! A filter argument is a JSON object keyed by field name. Scalar and list
//! fields map to an object of operators; object fields map to nested field
//! filters. Compilation validates every operator against the field's
//! inferred kind, so evaluation itself cannot fail.

use regex::Regex;
use serde_json::{Map, Value};

use crate::inference::{FieldKind, FieldPath, FilterInputShape, FilterOperator};
use crate::node::Node;
use crate::value::{compare_values, values_equal};

use super::errors::{QueryError, QueryResult};
use super::pattern::{compile_glob, compile_regex};

/// A single operator with its compiled operand
#[derive(Debug, Clone)]
pub enum Condition {
    Eq(Value),
    Ne(Value),
    Gt(Value),
    Gte(Value),
    Lt(Value),
    Lte(Value),
    In(Vec<Value>),
    Nin(Vec<Value>),
    Regex(Regex),
    Glob(Regex),
    Exists(bool),
    ElemMatch(FilterSet),
}

impl Condition {
    fn compile(
        op: FilterOperator,
        operand: &Value,
        path: &FieldPath,
        kind: &FieldKind,
    ) -> QueryResult<Self> {
        let invalid = |reason: &str| QueryError::invalid_value(path, op, reason);

        let condition = match op {
            FilterOperator::Eq => Condition::Eq(operand.clone()),
            FilterOperator::Ne => Condition::Ne(operand.clone()),
            FilterOperator::Gt | FilterOperator::Gte | FilterOperator::Lt | FilterOperator::Lte => {
                if !(operand.is_number() || operand.is_string()) {
                    return Err(invalid("expected a number or string"));
                }
                let operand = operand.clone();
                match op {
                    FilterOperator::Gt => Condition::Gt(operand),
                    FilterOperator::Gte => Condition::Gte(operand),
                    FilterOperator::Lt => Condition::Lt(operand),
                    _ => Condition::Lte(operand),
                }
            }
            FilterOperator::In | FilterOperator::Nin => {
                let items = operand
                    .as_array()
                    .ok_or_else(|| invalid("expected an array"))?
                    .clone();
                if op == FilterOperator::In {
                    Condition::In(items)
                } else {
                    Condition::Nin(items)
                }
            }
            FilterOperator::Regex => {
                let source = operand.as_str().ok_or_else(|| invalid("expected a string"))?;
                Condition::Regex(compile_regex(source).map_err(|e| invalid(e.as_str()))?)
            }
            FilterOperator::Glob => {
                let source = operand.as_str().ok_or_else(|| invalid("expected a string"))?;
                Condition::Glob(compile_glob(source).map_err(|e| invalid(e.as_str()))?)
            }
            FilterOperator::Exists => {
                Condition::Exists(operand.as_bool().ok_or_else(|| invalid("expected a boolean"))?)
            }
            FilterOperator::ElemMatch => {
                let shape = kind
                    .nested_shape()
                    .ok_or_else(|| invalid("field is not a list of objects"))?;
                Condition::ElemMatch(FilterSet::compile_at(operand, shape, Some(path))?)
            }
        };
        Ok(condition)
    }

    fn is_negative(&self) -> bool {
        matches!(self, Condition::Ne(_) | Condition::Nin(_))
    }

    /// Evaluates against a field value; `None` means missing or null
    fn matches(&self, value: Option<&Value>) -> bool {
        match (self, value) {
            (Condition::Exists(want), v) => v.is_some() == *want,
            (Condition::Eq(Value::Null), v) => v.is_none(),
            (Condition::Ne(Value::Null), v) => v.is_some(),
            (c, None) => c.is_negative(),
            (Condition::ElemMatch(set), Some(Value::Array(items))) => items
                .iter()
                .any(|item| item.as_object().map_or(false, |obj| set.matches_object(obj))),
            (Condition::ElemMatch(_), Some(_)) => false,
            (Condition::Eq(op), Some(list @ Value::Array(items))) => {
                if op.is_array() {
                    values_equal(list, op)
                } else {
                    items.iter().any(|item| values_equal(item, op))
                }
            }
            (Condition::Ne(op), Some(list @ Value::Array(items))) => {
                if op.is_array() {
                    !values_equal(list, op)
                } else {
                    !items.iter().any(|item| values_equal(item, op))
                }
            }
            (Condition::Nin(set), Some(Value::Array(items))) => {
                !items.iter().any(|item| set.iter().any(|s| values_equal(item, s)))
            }
            (c, Some(Value::Array(items))) => items.iter().any(|item| c.matches_scalar(item)),
            (c, Some(v)) => c.matches_scalar(v),
        }
    }

    fn matches_scalar(&self, value: &Value) -> bool {
        use std::cmp::Ordering::*;

        match self {
            Condition::Eq(op) => values_equal(value, op),
            Condition::Ne(op) => !values_equal(value, op),
            Condition::Gt(op) => compare_values(value, op) == Some(Greater),
            Condition::Gte(op) => matches!(compare_values(value, op), Some(Greater | Equal)),
            Condition::Lt(op) => compare_values(value, op) == Some(Less),
            Condition::Lte(op) => matches!(compare_values(value, op), Some(Less | Equal)),
            Condition::In(set) => set.iter().any(|s| values_equal(value, s)),
            Condition::Nin(set) => !set.iter().any(|s| values_equal(value, s)),
            Condition::Regex(re) | Condition::Glob(re) => {
                value.as_str().map_or(false, |s| re.is_match(s))
            }
            Condition::Exists(want) => *want,
            Condition::ElemMatch(_) => false,
        }
    }
}

/// All constraints on one field
#[derive(Debug, Clone)]
pub struct FieldClause {
    name: String,
    conditions: Vec<Condition>,
    nested: Option<FilterSet>,
}

impl FieldClause {
    /// Returns the field name
    pub fn name(&self) -> &str {
        &self.name
    }

    fn matches(&self, object: &Map<String, Value>) -> bool {
        let value = object.get(&self.name).filter(|v| !v.is_null());

        if !self.conditions.iter().all(|c| c.matches(value)) {
            return false;
        }

        match (&self.nested, value) {
            (None, _) => true,
            (Some(set), Some(Value::Object(inner))) => set.matches_object(inner),
            (Some(set), Some(Value::Array(items))) => items
                .iter()
                .any(|item| item.as_object().map_or(false, |obj| set.matches_object(obj))),
            // A missing parent leaves every child missing
            (Some(set), _) => set.matches_object(&Map::new()),
        }
    }
}

/// A conjunction of field clauses
#[derive(Debug, Clone, Default)]
pub struct FilterSet {
    clauses: Vec<FieldClause>,
}

impl FilterSet {
    /// Creates a filter that matches every node
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the filter imposes no constraint
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Returns the field clauses
    pub fn clauses(&self) -> &[FieldClause] {
        &self.clauses
    }

    /// Compiles a filter argument against a filter input shape.
    ///
    /// `null` compiles to the empty filter.
    pub fn compile(filter: &Value, shape: &FilterInputShape) -> QueryResult<Self> {
        Self::compile_at(filter, shape, None)
    }

    fn compile_at(
        filter: &Value,
        shape: &FilterInputShape,
        prefix: Option<&FieldPath>,
    ) -> QueryResult<Self> {
        let entries = match filter {
            Value::Null => return Ok(Self::new()),
            Value::Object(entries) => entries,
            _ => {
                return Err(QueryError::InvalidArguments(match prefix {
                    Some(p) => format!("filter on {} must be an object", p),
                    None => "filter must be an object".to_string(),
                }))
            }
        };

        let mut clauses = Vec::with_capacity(entries.len());
        for (name, spec) in entries {
            let path = match prefix {
                Some(p) => p.child(name),
                None => FieldPath::root(name),
            };
            let field = shape.field(name).ok_or_else(|| QueryError::UnknownField {
                path: path.to_string(),
            })?;
            clauses.push(Self::compile_clause(name, spec, &field.kind, &path)?);
        }

        Ok(Self { clauses })
    }

    fn compile_clause(
        name: &str,
        spec: &Value,
        kind: &FieldKind,
        path: &FieldPath,
    ) -> QueryResult<FieldClause> {
        let entries = spec.as_object().ok_or_else(|| {
            QueryError::InvalidArguments(format!("filter on {} must be an object", path))
        })?;

        let children = match kind {
            FieldKind::Object { fields } => Some(fields),
            _ => None,
        };

        let mut conditions = Vec::new();
        let mut nested = Map::new();

        // Operators the kind supports take precedence over same-named children
        for (key, operand) in entries {
            let supported = FilterOperator::parse(key).filter(|op| kind.supports(*op));
            if supported.is_none() {
                if let Some(child) = children.and_then(|c| c.field(key)) {
                    nested.insert(child.name.clone(), operand.clone());
                    continue;
                }
            }

            let op = match supported.or_else(|| FilterOperator::parse(key)) {
                Some(op) => op,
                None if children.is_some() => {
                    return Err(QueryError::UnknownField {
                        path: path.child(key).to_string(),
                    })
                }
                None => {
                    return Err(QueryError::InvalidOperator {
                        path: path.to_string(),
                        operator: key.clone(),
                        kind: kind.type_name(),
                    })
                }
            };

            if !kind.supports(op) {
                return Err(QueryError::InvalidOperator {
                    path: path.to_string(),
                    operator: op.to_string(),
                    kind: kind.type_name(),
                });
            }

            conditions.push(Condition::compile(op, operand, path, kind)?);
        }

        let nested = match children {
            Some(fields) if !nested.is_empty() => {
                Some(Self::compile_at(&Value::Object(nested), fields, Some(path))?)
            }
            _ => None,
        };

        Ok(FieldClause {
            name: name.to_string(),
            conditions,
            nested,
        })
    }

    /// Returns true if the node satisfies every clause
    pub fn matches(&self, node: &Node) -> bool {
        self.matches_object(node.document())
    }

    fn matches_object(&self, object: &Map<String, Value>) -> bool {
        self.clauses.iter().all(|clause| clause.matches(object))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::infer_filter_and_sort_fields;
    use serde_json::json;

    fn posts() -> Vec<Node> {
        vec![
            Node::new(
                "p1",
                "Post",
                json!({
                    "title": "Hello Rust",
                    "views": 10,
                    "draft": false,
                    "date": "2024-01-10",
                    "tags": ["rust", "intro"],
                    "frontmatter": {"slug": "/blog/hello", "rating": 4},
                    "authors": [{"name": "Ada", "role": "lead"}],
                }),
            )
            .unwrap(),
            Node::new(
                "p2",
                "Post",
                json!({
                    "title": "Second post",
                    "views": 25,
                    "draft": true,
                    "date": "2024-03-01",
                    "tags": ["misc"],
                    "frontmatter": {"slug": "/notes/second"},
                    "authors": [{"name": "Grace", "role": "editor"}, {"name": "Ada", "role": "editor"}],
                }),
            )
            .unwrap(),
            Node::new("p3", "Post", json!({"title": "Untitled"})).unwrap(),
        ]
    }

    fn matching(filter: Value) -> Vec<String> {
        let nodes = posts();
        let shape = infer_filter_and_sort_fields(&nodes, &[]).filter_fields;
        let set = FilterSet::compile(&filter, &shape).unwrap();
        nodes
            .iter()
            .filter(|n| set.matches(n))
            .map(|n| n.id().to_string())
            .collect()
    }

    fn compile_err(filter: Value) -> QueryError {
        let nodes = posts();
        let shape = infer_filter_and_sort_fields(&nodes, &[]).filter_fields;
        FilterSet::compile(&filter, &shape).unwrap_err()
    }

    #[test]
    fn test_empty_filter_matches_all() {
        assert_eq!(matching(json!({})), vec!["p1", "p2", "p3"]);
        assert_eq!(matching(Value::Null), vec!["p1", "p2", "p3"]);
    }

    #[test]
    fn test_equality() {
        assert_eq!(matching(json!({"title": {"eq": "Second post"}})), vec!["p2"]);
        assert_eq!(matching(json!({"draft": {"ne": true}})), vec!["p1", "p3"]);
    }

    #[test]
    fn test_ordering() {
        assert_eq!(matching(json!({"views": {"gt": 10}})), vec!["p2"]);
        assert_eq!(matching(json!({"views": {"gte": 10, "lt": 25}})), vec!["p1"]);
        assert_eq!(matching(json!({"date": {"lt": "2024-02-01"}})), vec!["p1"]);
    }

    #[test]
    fn test_set_membership() {
        assert_eq!(matching(json!({"views": {"in": [25, 99]}})), vec!["p2"]);
        assert_eq!(matching(json!({"views": {"nin": [25]}})), vec!["p1", "p3"]);
    }

    #[test]
    fn test_regex_and_glob() {
        assert_eq!(matching(json!({"title": {"regex": "/^hello/i"}})), vec!["p1"]);
        assert_eq!(
            matching(json!({"frontmatter": {"slug": {"glob": "/blog/*"}}})),
            vec!["p1"]
        );
    }

    #[test]
    fn test_existence() {
        assert_eq!(matching(json!({"views": {"exists": false}})), vec!["p3"]);
        assert_eq!(matching(json!({"frontmatter": {"exists": true}})), vec!["p1", "p2"]);
        assert_eq!(
            matching(json!({"frontmatter": {"rating": {"exists": true}}})),
            vec!["p1"]
        );
    }

    /// p3 has no frontmatter, so each nested child is missing for it.
    #[test]
    fn test_nested_missing_parent() {
        assert_eq!(
            matching(json!({"frontmatter": {"rating": {"exists": false}}})),
            vec!["p2", "p3"]
        );
        assert_eq!(
            matching(json!({"frontmatter": {"rating": {"ne": 4}}})),
            vec!["p2", "p3"]
        );
        assert_eq!(
            matching(json!({"frontmatter": {"rating": {"nin": [4]}}})),
            vec!["p2", "p3"]
        );
        assert_eq!(
            matching(json!({"frontmatter": {"slug": {"eq": "/blog/hello"}}})),
            vec!["p1"]
        );
    }

    #[test]
    fn test_supported_operator_shadows_child() {
        let nodes = vec![
            Node::new("a", "Doc", json!({"meta": {"exists": "yes", "eq": 1}})).unwrap(),
            Node::new("b", "Doc", json!({"other": 1})).unwrap(),
        ];
        let shape = infer_filter_and_sort_fields(&nodes, &[]).filter_fields;
        let ids = |filter: Value| -> Vec<String> {
            let set = FilterSet::compile(&filter, &shape).unwrap();
            nodes
                .iter()
                .filter(|n| set.matches(n))
                .map(|n| n.id().to_string())
                .collect()
        };

        // `exists` is an operator on objects
        assert_eq!(ids(json!({"meta": {"exists": true}})), vec!["a"]);
        assert_eq!(ids(json!({"meta": {"exists": false}})), vec!["b"]);
        // `eq` is not, so it names the child
        assert_eq!(ids(json!({"meta": {"eq": {"eq": 1}}})), vec!["a"]);
    }

    #[test]
    fn test_list_element_match() {
        assert_eq!(matching(json!({"tags": {"eq": "misc"}})), vec!["p2"]);
        assert_eq!(matching(json!({"tags": {"in": ["rust", "misc"]}})), vec!["p1", "p2"]);
        assert_eq!(matching(json!({"tags": {"ne": "rust"}})), vec!["p2", "p3"]);
        assert_eq!(matching(json!({"tags": {"eq": ["misc"]}})), vec!["p2"]);
    }

    #[test]
    fn test_elem_match() {
        assert_eq!(
            matching(json!({"authors": {"elemMatch": {"name": {"eq": "Ada"}}}})),
            vec!["p1", "p2"]
        );
        assert_eq!(
            matching(json!({"authors": {"elemMatch": {
                "name": {"eq": "Ada"},
                "role": {"eq": "lead"},
            }}})),
            vec!["p1"]
        );
    }

    #[test]
    fn test_nested_conjunction() {
        assert_eq!(
            matching(json!({
                "frontmatter": {"slug": {"regex": "/notes/"}},
                "draft": {"eq": true},
            })),
            vec!["p2"]
        );
    }

    #[test]
    fn test_operator_invalid_for_kind() {
        let err = compile_err(json!({"draft": {"regex": "/x/"}}));
        assert_eq!(err.code(), "QUERY_INVALID_OPERATOR");

        let err = compile_err(json!({"views": {"glob": "*"}}));
        assert_eq!(err.code(), "QUERY_INVALID_OPERATOR");

        let err = compile_err(json!({"authors": {"eq": "Ada"}}));
        assert_eq!(err.code(), "QUERY_INVALID_OPERATOR");
    }

    #[test]
    fn test_unrecognised_operator() {
        let err = compile_err(json!({"title": {"like": "%x"}}));
        assert!(matches!(err, QueryError::InvalidOperator { ref operator, .. } if operator == "like"));
    }

    #[test]
    fn test_unknown_fields() {
        let err = compile_err(json!({"body": {"eq": "x"}}));
        assert_eq!(err, QueryError::UnknownField { path: "body".into() });

        let err = compile_err(json!({"frontmatter": {"author": {"eq": "x"}}}));
        assert_eq!(
            err,
            QueryError::UnknownField {
                path: "frontmatter.author".into()
            }
        );
    }

    #[test]
    fn test_invalid_operands() {
        assert_eq!(
            compile_err(json!({"views": {"in": 25}})).code(),
            "QUERY_INVALID_FILTER_VALUE"
        );
        assert_eq!(
            compile_err(json!({"title": {"regex": "(unclosed"}})).code(),
            "QUERY_INVALID_FILTER_VALUE"
        );
        assert_eq!(
            compile_err(json!({"title": {"exists": "yes"}})).code(),
            "QUERY_INVALID_FILTER_VALUE"
        );
        assert_eq!(
            compile_err(json!({"title": "Hello"})).code(),
            "QUERY_INVALID_ARGUMENTS"
        );
    }

    #[test]
    fn test_conflicting_kinds_allow_equality_only() {
        let nodes = vec![
            Node::new("a", "T", json!({"v": 1})).unwrap(),
            Node::new("b", "T", json!({"v": "one"})).unwrap(),
        ];
        let shape = infer_filter_and_sort_fields(&nodes, &[]).filter_fields;

        let set = FilterSet::compile(&json!({"v": {"eq": "one"}}), &shape).unwrap();
        let ids: Vec<_> = nodes.iter().filter(|n| set.matches(n)).map(|n| n.id()).collect();
        assert_eq!(ids, vec!["b"]);

        assert!(FilterSet::compile(&json!({"v": {"gt": 0}}), &shape).is_err());
    }
}

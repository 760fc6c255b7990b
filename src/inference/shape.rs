//! Filter input shapes and field descriptors

use serde::{Deserialize, Serialize};

use super::kind::FieldKind;
use super::operator::FilterOperator;
use super::path::FieldPath;

/// Where a field's kind came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldOrigin {
    /// Declared by extension code; authoritative
    Plugin,
    /// Observed in node data; best effort
    Sampled,
}

/// A flattened field: path, kind and origin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Path into the node
    pub path: FieldPath,
    /// Field kind
    #[serde(flatten)]
    pub kind: FieldKind,
    /// Where the kind came from
    pub origin: FieldOrigin,
}

impl FieldDescriptor {
    /// Creates a plugin-declared descriptor
    pub fn plugin(path: impl Into<FieldPath>, kind: FieldKind) -> Self {
        Self {
            path: path.into(),
            kind,
            origin: FieldOrigin::Plugin,
        }
    }

    /// Creates a sampled descriptor
    pub fn sampled(path: impl Into<FieldPath>, kind: FieldKind) -> Self {
        Self {
            path: path.into(),
            kind,
            origin: FieldOrigin::Sampled,
        }
    }
}

/// One field of a filter input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterField {
    /// Field name (single path segment)
    pub name: String,
    /// Field kind
    #[serde(flatten)]
    pub kind: FieldKind,
    /// Where the kind came from
    pub origin: FieldOrigin,
}

impl FilterField {
    /// Returns the operators valid on this field
    pub fn operators(&self) -> &'static [FilterOperator] {
        self.kind.operators()
    }
}

/// Ordered tree of filterable fields for one node type
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterInputShape {
    fields: Vec<FilterField>,
}

impl FilterInputShape {
    /// Creates an empty shape
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of top-level fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if no field was inferred or declared
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the top-level fields in order
    pub fn fields(&self) -> &[FilterField] {
        &self.fields
    }

    /// Returns a top-level field by name
    pub fn field(&self, name: &str) -> Option<&FilterField> {
        self.fields.iter().find(|f| f.name == name)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Records an observation of `name`, widening any existing kind.
    ///
    /// New fields are appended, so order is first-observation order.
    pub fn observe(&mut self, name: &str, kind: FieldKind, origin: FieldOrigin) {
        match self.position(name) {
            Some(pos) => {
                let existing = &mut self.fields[pos];
                let previous = std::mem::replace(&mut existing.kind, FieldKind::Unknown);
                existing.kind = previous.widen(kind);
            }
            None => self.fields.push(FilterField {
                name: name.to_string(),
                kind,
                origin,
            }),
        }
    }

    /// Merges every field of `other` into this shape
    pub fn absorb(&mut self, other: FilterInputShape) {
        for field in other.fields {
            self.observe(&field.name, field.kind, field.origin);
        }
    }

    /// Declares a field authoritatively, overriding any sampled kind.
    ///
    /// An existing field keeps its position. Intermediate segments become
    /// objects; a non-object intermediate is replaced. An object declared
    /// over a sampled object is merged child by child, so sampled children
    /// the declaration does not mention survive.
    pub fn declare(&mut self, segments: &[String], kind: FieldKind) {
        let Some((name, rest)) = segments.split_first() else {
            return;
        };

        if rest.is_empty() {
            match self.position(name) {
                Some(pos) => {
                    let field = &mut self.fields[pos];
                    field.origin = FieldOrigin::Plugin;
                    match (&mut field.kind, kind) {
                        (FieldKind::Object { fields: existing }, FieldKind::Object { fields: declared }) => {
                            for child in declared.fields {
                                existing.declare(std::slice::from_ref(&child.name), child.kind);
                            }
                        }
                        (slot, kind) => *slot = kind,
                    }
                }
                None => self.fields.push(FilterField {
                    name: name.clone(),
                    kind,
                    origin: FieldOrigin::Plugin,
                }),
            }
            return;
        }

        let pos = match self.position(name) {
            Some(pos) => {
                if !matches!(self.fields[pos].kind, FieldKind::Object { .. }) {
                    self.fields[pos].kind = FieldKind::object(FilterInputShape::new());
                    self.fields[pos].origin = FieldOrigin::Plugin;
                }
                pos
            }
            None => {
                self.fields.push(FilterField {
                    name: name.clone(),
                    kind: FieldKind::object(FilterInputShape::new()),
                    origin: FieldOrigin::Plugin,
                });
                self.fields.len() - 1
            }
        };

        if let FieldKind::Object { fields } = &mut self.fields[pos].kind {
            fields.declare(rest, kind);
        }
    }

    /// Looks up a field by path, descending through objects
    pub fn resolve(&self, path: &FieldPath) -> Option<&FilterField> {
        let (first, rest) = path.segments().split_first()?;
        let mut field = self.field(first)?;
        for segment in rest {
            field = match &field.kind {
                FieldKind::Object { fields } => fields.field(segment)?,
                _ => return None,
            };
        }
        Some(field)
    }

    /// Returns every field in the tree as a flat descriptor list.
    ///
    /// Descends into objects and into the elements of lists of objects.
    pub fn descriptors(&self) -> Vec<FieldDescriptor> {
        let mut out = Vec::new();
        self.collect_descriptors(None, &mut out);
        out
    }

    fn collect_descriptors(&self, prefix: Option<&FieldPath>, out: &mut Vec<FieldDescriptor>) {
        for field in &self.fields {
            let path = match prefix {
                Some(p) => p.child(&field.name),
                None => FieldPath::root(&field.name),
            };
            out.push(FieldDescriptor {
                path: path.clone(),
                kind: field.kind.clone(),
                origin: field.origin,
            });
            if let Some(nested) = field.kind.nested_shape() {
                nested.collect_descriptors(Some(&path), out);
            }
        }
    }

    /// Returns every path that can be used as a sort key, in field order.
    ///
    /// Objects are not sort keys themselves but their scalar children are.
    /// Lists of objects are not descended.
    pub fn sortable_paths(&self) -> Vec<FieldPath> {
        let mut out = Vec::new();
        self.collect_sortable(None, &mut out);
        out
    }

    fn collect_sortable(&self, prefix: Option<&FieldPath>, out: &mut Vec<FieldPath>) {
        for field in &self.fields {
            let path = match prefix {
                Some(p) => p.child(&field.name),
                None => FieldPath::root(&field.name),
            };
            match &field.kind {
                FieldKind::Object { fields } => fields.collect_sortable(Some(&path), out),
                kind if kind.is_sortable() => out.push(path),
                _ => {}
            }
        }
    }
}

//! Shape sampling over node documents

use serde_json::{Map, Value};

use crate::config::InferenceOptions;
use crate::node::Node;
use crate::value::is_date;

use super::kind::FieldKind;
use super::shape::{FieldOrigin, FilterInputShape};

/// Accumulates the shape of every node it is shown
pub struct Sampler<'a> {
    options: &'a InferenceOptions,
    shape: FilterInputShape,
    observed: usize,
}

impl<'a> Sampler<'a> {
    /// Creates a sampler with an empty shape
    pub fn new(options: &'a InferenceOptions) -> Self {
        Self {
            options,
            shape: FilterInputShape::new(),
            observed: 0,
        }
    }

    /// Observes every field of a node
    pub fn observe(&mut self, node: &Node) {
        let mut shape = std::mem::take(&mut self.shape);
        self.observe_object(&mut shape, node.document());
        self.shape = shape;
        self.observed += 1;
    }

    /// Returns the number of nodes observed
    pub fn observed(&self) -> usize {
        self.observed
    }

    /// Returns the accumulated shape
    pub fn finish(self) -> FilterInputShape {
        self.shape
    }

    fn observe_object(&self, shape: &mut FilterInputShape, object: &Map<String, Value>) {
        for (key, value) in object {
            if let Some(kind) = self.kind_of(key, value) {
                shape.observe(key, kind, FieldOrigin::Sampled);
            }
        }
    }

    fn is_reference(&self, key: &str) -> bool {
        let suffix = self.options.reference_suffix.as_str();
        !suffix.is_empty() && key.ends_with(suffix)
    }

    /// Returns the kind of a single value, or `None` for null
    fn kind_of(&self, key: &str, value: &Value) -> Option<FieldKind> {
        let kind = match value {
            Value::Null => return None,
            Value::Bool(_) => FieldKind::Boolean,
            Value::Number(_) => FieldKind::Number,
            Value::String(s) => {
                if self.is_reference(key) {
                    FieldKind::Reference
                } else if self.options.infer_dates && is_date(s) {
                    FieldKind::Date
                } else {
                    FieldKind::String
                }
            }
            Value::Array(items) => {
                let element = items
                    .iter()
                    .filter_map(|item| self.kind_of(key, item))
                    .fold(FieldKind::Unknown, FieldKind::widen);
                FieldKind::list(element)
            }
            Value::Object(map) => {
                let mut fields = FilterInputShape::new();
                self.observe_object(&mut fields, map);
                FieldKind::object(fields)
            }
        };
        Some(kind)
    }
}

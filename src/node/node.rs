//! Node documents

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use super::errors::{NodeError, NodeResult};

/// Key holding the node identifier
pub const ID_KEY: &str = "id";

/// Key holding the node type discriminator
pub const TYPE_KEY: &str = "type";

/// A typed, semi-structured record.
///
/// The `id` and `type` keys live inside the document itself, so they are
/// sampled and filterable like any other field.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: String,
    node_type: String,
    document: Map<String, Value>,
}

impl Node {
    /// Creates a node from an id, a type and the remaining fields.
    ///
    /// `fields` must be an object (or null for a bare node). Any `id` or
    /// `type` keys in `fields` are ignored in favour of the arguments.
    pub fn new(
        id: impl Into<String>,
        node_type: impl Into<String>,
        fields: Value,
    ) -> NodeResult<Self> {
        let id = id.into();
        let node_type = node_type.into();

        let fields = match fields {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            _ => return Err(NodeError::NotAnObject),
        };

        let mut document = Map::with_capacity(fields.len() + 2);
        document.insert(ID_KEY.to_string(), Value::String(id.clone()));
        document.insert(TYPE_KEY.to_string(), Value::String(node_type.clone()));
        for (key, value) in fields {
            if key != ID_KEY && key != TYPE_KEY {
                document.insert(key, value);
            }
        }

        Ok(Self {
            id,
            node_type,
            document,
        })
    }

    /// Parses a node from a complete JSON document
    pub fn from_value(value: Value) -> NodeResult<Self> {
        let document = match value {
            Value::Object(map) => map,
            _ => return Err(NodeError::NotAnObject),
        };

        let id = document
            .get(ID_KEY)
            .and_then(Value::as_str)
            .ok_or(NodeError::MissingId)?
            .to_string();

        let node_type = document
            .get(TYPE_KEY)
            .and_then(Value::as_str)
            .ok_or_else(|| NodeError::MissingType(id.clone()))?
            .to_string();

        Ok(Self {
            id,
            node_type,
            document,
        })
    }

    /// Returns the node id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the node type
    pub fn node_type(&self) -> &str {
        &self.node_type
    }

    /// Returns the full document
    pub fn document(&self) -> &Map<String, Value> {
        &self.document
    }

    /// Returns a top-level field
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.document.get(key)
    }

    /// Returns the value at a dotted path.
    ///
    /// Traverses objects only; a path that crosses an array or a scalar
    /// yields `None`.
    pub fn get_path<S: AsRef<str>>(&self, segments: &[S]) -> Option<&Value> {
        let (first, rest) = segments.split_first()?;
        let mut current = self.document.get(first.as_ref())?;
        for segment in rest {
            current = current.as_object()?.get(segment.as_ref())?;
        }
        Some(current)
    }

    /// Returns the document as an owned JSON value
    pub fn to_value(&self) -> Value {
        Value::Object(self.document.clone())
    }
}

impl AsRef<Node> for Node {
    fn as_ref(&self) -> &Node {
        self
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.document.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Node::from_value(value).map_err(serde::de::Error::custom)
    }
}

//! Node store boundary and an in-memory implementation

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::node::Node;

/// Read access to the current node set.
///
/// Implementations must return the complete, current set for a type.
/// Filtering and pagination are the engine's job, never the store's.
pub trait NodeStore: Send + Sync {
    /// Returns a snapshot of every node of the given type, in insertion order
    fn nodes_by_type(&self, type_name: &str) -> Vec<Arc<Node>>;

    /// Returns every type with at least one node, in first-insertion order
    fn type_names(&self) -> Vec<String>;
}

#[derive(Debug, Default)]
struct TypeBucket {
    nodes: Vec<Arc<Node>>,
    positions: HashMap<String, usize>,
}

impl TypeBucket {
    fn upsert(&mut self, node: Arc<Node>) {
        match self.positions.get(node.id()) {
            Some(&pos) => self.nodes[pos] = node,
            None => {
                self.positions.insert(node.id().to_string(), self.nodes.len());
                self.nodes.push(node);
            }
        }
    }

    fn remove(&mut self, id: &str) -> Option<Arc<Node>> {
        let pos = self.positions.remove(id)?;
        let removed = self.nodes.remove(pos);
        for node in &self.nodes[pos..] {
            if let Some(p) = self.positions.get_mut(node.id()) {
                *p -= 1;
            }
        }
        Some(removed)
    }
}

#[derive(Debug, Default)]
struct StoreInner {
    type_order: Vec<String>,
    buckets: HashMap<String, TypeBucket>,
    owners: HashMap<String, String>,
}

/// Process-local node index keyed by type.
///
/// Upserts replace by id. A node whose type changes moves to the end of
/// its new type's sequence.
#[derive(Debug, Default)]
pub struct InMemoryNodeStore {
    inner: RwLock<StoreInner>,
}

impl InMemoryNodeStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with nodes
    pub fn from_nodes(nodes: impl IntoIterator<Item = Node>) -> Self {
        let store = Self::new();
        for node in nodes {
            store.upsert(node);
        }
        store
    }

    fn read(&self) -> RwLockReadGuard<'_, StoreInner> {
        self.inner.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreInner> {
        self.inner.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Inserts a node or replaces the node with the same id
    pub fn upsert(&self, node: Node) {
        let node = Arc::new(node);
        let mut inner = self.write();

        let previous_type = inner
            .owners
            .insert(node.id().to_string(), node.node_type().to_string());
        if let Some(previous_type) = previous_type {
            if previous_type != node.node_type() {
                inner.remove_from(&previous_type, node.id());
            }
        }

        if !inner.buckets.contains_key(node.node_type()) {
            inner.type_order.push(node.node_type().to_string());
        }
        inner
            .buckets
            .entry(node.node_type().to_string())
            .or_default()
            .upsert(node);
    }

    /// Removes a node by id, returning it if present
    pub fn delete(&self, id: &str) -> Option<Arc<Node>> {
        let mut inner = self.write();
        let node_type = inner.owners.remove(id)?;
        inner.remove_from(&node_type, id)
    }

    /// Returns a node by id
    pub fn get(&self, id: &str) -> Option<Arc<Node>> {
        let inner = self.read();
        let node_type = inner.owners.get(id)?;
        let bucket = inner.buckets.get(node_type)?;
        let pos = *bucket.positions.get(id)?;
        bucket.nodes.get(pos).cloned()
    }

    /// Returns the total number of nodes
    pub fn len(&self) -> usize {
        self.read().owners.len()
    }

    /// Returns true if the store holds no nodes
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl StoreInner {
    fn remove_from(&mut self, node_type: &str, id: &str) -> Option<Arc<Node>> {
        let bucket = self.buckets.get_mut(node_type)?;
        let removed = bucket.remove(id);
        if bucket.nodes.is_empty() {
            self.buckets.remove(node_type);
            self.type_order.retain(|t| t != node_type);
        }
        removed
    }
}

impl NodeStore for InMemoryNodeStore {
    fn nodes_by_type(&self, type_name: &str) -> Vec<Arc<Node>> {
        self.read()
            .buckets
            .get(type_name)
            .map(|bucket| bucket.nodes.clone())
            .unwrap_or_default()
    }

    fn type_names(&self) -> Vec<String> {
        self.read().type_order.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn page(id: &str, path: &str) -> Node {
        Node::new(id, "Page", json!({ "path": path })).unwrap()
    }

    #[test]
    fn test_upsert_appends_new_ids() {
        let store = InMemoryNodeStore::new();
        store.upsert(page("a", "/a"));
        store.upsert(page("b", "/b"));

        let ids: Vec<_> = store
            .nodes_by_type("Page")
            .iter()
            .map(|n| n.id().to_string())
            .collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_upsert_replaces_in_place() {
        let store = InMemoryNodeStore::new();
        store.upsert(page("a", "/a"));
        store.upsert(page("b", "/b"));
        store.upsert(page("a", "/a-v2"));

        let nodes = store.nodes_by_type("Page");
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].get("path"), Some(&json!("/a-v2")));
        assert_eq!(nodes[1].id(), "b");
    }

    #[test]
    fn test_snapshot_is_isolated_from_later_upserts() {
        let store = InMemoryNodeStore::new();
        store.upsert(page("a", "/a"));

        let snapshot = store.nodes_by_type("Page");
        store.upsert(page("a", "/changed"));
        store.upsert(page("b", "/b"));

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].get("path"), Some(&json!("/a")));
    }

    #[test]
    fn test_type_change_moves_node() {
        let store = InMemoryNodeStore::new();
        store.upsert(page("a", "/a"));
        store.upsert(Node::new("a", "Post", json!({})).unwrap());

        assert!(store.nodes_by_type("Page").is_empty());
        assert_eq!(store.nodes_by_type("Post").len(), 1);
        assert_eq!(store.type_names(), vec!["Post"]);
    }

    #[test]
    fn test_delete_reindexes_positions() {
        let store = InMemoryNodeStore::from_nodes(vec![
            page("a", "/a"),
            page("b", "/b"),
            page("c", "/c"),
        ]);

        assert!(store.delete("a").is_some());
        assert!(store.delete("a").is_none());
        store.upsert(page("c", "/c-v2"));

        let nodes = store.nodes_by_type("Page");
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[1].get("path"), Some(&json!("/c-v2")));
        assert_eq!(store.get("b").unwrap().id(), "b");
    }

    #[test]
    fn test_type_names_in_first_insertion_order() {
        let store = InMemoryNodeStore::new();
        store.upsert(Node::new("1", "Site", json!({})).unwrap());
        store.upsert(page("a", "/a"));
        store.upsert(Node::new("2", "MarkdownRemark", json!({})).unwrap());
        store.upsert(page("b", "/b"));

        assert_eq!(store.type_names(), vec!["Site", "Page", "MarkdownRemark"]);
        assert!(store.nodes_by_type("Unknown").is_empty());
    }
}

//! Typed view of store nodes.
//!
//! The store holds an untyped JSON tree. `StoreNode` keeps object key order
//! and separates branches from scalar leaves so that leaf-detection rules can
//! be written as small pure functions over a known shape.

use serde_json::{Map, Number, Value};

use edubuddy_types::StoragePath;

/// A node of the hierarchical store.
///
/// JSON `null` never appears inside a node: a null value means "does not
/// exist" and is dropped when converting.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreNode {
    /// Mapping from key to child, in document order
    Branch(Vec<(String, StoreNode)>),
    Text(String),
    Number(Number),
    Bool(bool),
}

impl StoreNode {
    /// Convert a JSON value. Returns `None` for `null`.
    ///
    /// Arrays become branches keyed by index; null array slots are skipped.
    pub fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Bool(b) => Some(StoreNode::Bool(b)),
            Value::Number(n) => Some(StoreNode::Number(n)),
            Value::String(s) => Some(StoreNode::Text(s)),
            Value::Array(items) => Some(StoreNode::Branch(
                items
                    .into_iter()
                    .enumerate()
                    .filter_map(|(i, v)| StoreNode::from_json(v).map(|n| (i.to_string(), n)))
                    .collect(),
            )),
            Value::Object(map) => Some(StoreNode::Branch(
                map.into_iter()
                    .filter_map(|(k, v)| StoreNode::from_json(v).map(|n| (k, n)))
                    .collect(),
            )),
        }
    }

    /// Convert back into JSON, preserving key order.
    pub fn to_json(&self) -> Value {
        match self {
            StoreNode::Branch(children) => {
                let mut map = Map::new();
                for (key, child) in children {
                    map.insert(key.clone(), child.to_json());
                }
                Value::Object(map)
            }
            StoreNode::Text(s) => Value::String(s.clone()),
            StoreNode::Number(n) => Value::Number(n.clone()),
            StoreNode::Bool(b) => Value::Bool(*b),
        }
    }

    /// Build a branch from `(key, child)` pairs.
    pub fn branch<K: Into<String>>(children: impl IntoIterator<Item = (K, StoreNode)>) -> Self {
        StoreNode::Branch(children.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn text(value: impl Into<String>) -> Self {
        StoreNode::Text(value.into())
    }

    pub fn is_branch(&self) -> bool {
        matches!(self, StoreNode::Branch(_))
    }

    /// Direct child by key. Scalars have no children.
    pub fn child(&self, key: &str) -> Option<&StoreNode> {
        match self {
            StoreNode::Branch(children) => {
                children.iter().find(|(k, _)| k == key).map(|(_, v)| v)
            }
            _ => None,
        }
    }

    /// Descendant addressed by a path relative to this node.
    pub fn at(&self, path: &StoragePath) -> Option<&StoreNode> {
        path.segments()
            .iter()
            .try_fold(self, |node, segment| node.child(segment))
    }

    /// Children in document order; empty for scalars.
    pub fn children(&self) -> impl Iterator<Item = (&str, &StoreNode)> {
        let slice: &[(String, StoreNode)] = match self {
            StoreNode::Branch(children) => children,
            _ => &[],
        };
        slice.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Child keys in document order.
    pub fn keys(&self) -> Vec<String> {
        self.children().map(|(k, _)| k.to_string()).collect()
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            StoreNode::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Text form of a truthy scalar.
    ///
    /// Non-empty strings, non-zero numbers and `true` are truthy. Empty
    /// strings, zero, `false` and branches yield `None`.
    pub fn truthy_text(&self) -> Option<String> {
        match self {
            StoreNode::Text(s) if !s.is_empty() => Some(s.clone()),
            StoreNode::Number(n) if n.as_f64().is_some_and(|f| f != 0.0) => Some(n.to_string()),
            StoreNode::Bool(true) => Some("true".to_string()),
            _ => None,
        }
    }
}

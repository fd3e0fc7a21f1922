//! Domain entities: menu nodes and their option mapping

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Identifier of a persisted menu item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NodeId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(NodeId)
    }
}

/// Nested-set bounds maintained by the tree storage.
///
/// Every descendant of a node has `left`/`right` strictly inside the node's
/// own bounds. Each root tree is numbered independently starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NestedBounds {
    pub left: u32,
    pub right: u32,
    /// Distance from the root (roots are level 0)
    pub level: u32,
}

impl NestedBounds {
    /// Number of nodes below this one.
    pub fn descendant_count(&self) -> usize {
        (self.right.saturating_sub(self.left) / 2) as usize
    }

    /// True if `other` lies strictly inside these bounds.
    pub fn encloses(&self, other: &NestedBounds) -> bool {
        self.left < other.left && other.right < self.right
    }
}

/// Option mapping attached to a menu item.
///
/// Keys are bare option names (`routeParameters`, not `routeParameters*`).
/// Insertion order is kept for stable editing; equality ignores it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MenuOptions(Map<String, Value>);

impl MenuOptions {
    pub fn new() -> Self {
        Self(Map::new())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }
}

impl FromIterator<(String, Value)> for MenuOptions {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A menu item.
///
/// A node with `id == None` has never been persisted; the storage assigns
/// the id, the root reference and the bounds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MenuNode {
    pub id: Option<NodeId>,
    pub title: String,
    /// Parent item, `None` for roots
    pub parent: Option<NodeId>,
    /// Root of the tree this item belongs to (self for roots)
    pub root: Option<NodeId>,
    #[serde(default)]
    pub options: MenuOptions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<NestedBounds>,
}

impl MenuNode {
    /// Create an unsaved item with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

impl fmt::Display for MenuNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(f, "{} ({})", self.title, id),
            None => write!(f, "{} (new)", self.title),
        }
    }
}

/// One entry of a children hierarchy as handed to presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HierarchyNode {
    pub id: NodeId,
    pub title: String,
    pub level: u32,
    pub children: Vec<HierarchyNode>,
}

impl HierarchyNode {
    /// Ids of this node and all of its descendants, pre-order.
    pub fn ids(&self) -> Vec<NodeId> {
        let mut ids = vec![self.id];
        for child in &self.children {
            ids.extend(child.ids());
        }
        ids
    }
}

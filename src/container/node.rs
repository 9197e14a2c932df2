//! Container Nodes
//!
//! A container node is either a group (children + attributes) or a dataset
//! (array + attributes). The tagged-variant model keeps all kind-inspection
//! explicit: adapter operations pattern-match on [`Node`] instead of
//! relying on runtime type tricks.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::array::Array;
use crate::attrs::AttrMap;

/// Kind tag for a container node
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NodeKind {
    Group,
    Dataset,
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeKind::Group => f.write_str("group"),
            NodeKind::Dataset => f.write_str("dataset"),
        }
    }
}

/// A node in the container tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    Group(Group),
    Dataset(Dataset),
}

impl Node {
    /// Kind tag of this node
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Group(_) => NodeKind::Group,
            Node::Dataset(_) => NodeKind::Dataset,
        }
    }

    /// Attribute map of this node (both kinds carry one)
    pub fn attrs(&self) -> &AttrMap {
        match self {
            Node::Group(g) => &g.attrs,
            Node::Dataset(d) => &d.attrs,
        }
    }

    pub(crate) fn attrs_mut(&mut self) -> &mut AttrMap {
        match self {
            Node::Group(g) => &mut g.attrs,
            Node::Dataset(d) => &mut d.attrs,
        }
    }
}

/// A group: named children plus an attribute map
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub(crate) children: BTreeMap<String, Node>,
    pub(crate) attrs: AttrMap,
}

impl Group {
    /// Number of direct children
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Look up a direct child by name
    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children.get(name)
    }

    /// Attribute map of this group
    pub fn attrs(&self) -> &AttrMap {
        &self.attrs
    }
}

/// A dataset: a typed array plus an attribute map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub(crate) data: Array,
    pub(crate) attrs: AttrMap,
}

impl Dataset {
    /// Create a dataset with an empty attribute map
    pub fn new(data: Array) -> Self {
        Self {
            data,
            attrs: AttrMap::new(),
        }
    }

    /// The stored array
    pub fn data(&self) -> &Array {
        &self.data
    }

    /// Attribute map of this dataset
    pub fn attrs(&self) -> &AttrMap {
        &self.attrs
    }
}

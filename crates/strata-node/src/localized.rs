//! Nodes tagged with their origin holder.

use crate::Node;
use serde::{Deserialize, Serialize};

/// A node paired with the `object_name` of the holder that supplied it
/// during resolution.
///
/// When a group's nodes are inherited, the location keeps pointing at the
/// group, letting callers report where an effective permission came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocalizedNode {
    node: Node,
    location: String,
}

impl LocalizedNode {
    /// Tags a node with the holder it came from.
    #[must_use]
    pub fn new(node: Node, location: impl Into<String>) -> Self {
        Self {
            node,
            location: location.into(),
        }
    }

    /// The underlying node.
    #[must_use]
    pub fn node(&self) -> &Node {
        &self.node
    }

    /// The `object_name` of the supplying holder.
    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Consumes the wrapper, returning the node.
    #[must_use]
    pub fn into_node(self) -> Node {
        self.node
    }
}

//! Event types emitted by the engine.

use serde::{Deserialize, Serialize};
use strata_node::{HolderRef, Node};

/// A mutation announcement from a permission holder.
///
/// Events are advisory. They are emitted after the mutation has been
/// applied and the holder's caches invalidated, so a consumer reading the
/// holder after receiving an event observes the post-mutation state;
/// nothing in the engine depends on anyone listening.
///
/// # Example
///
/// ```
/// use strata_event::HolderEvent;
/// use strata_node::{HolderRef, Node};
/// use uuid::Uuid;
///
/// let holder = HolderRef::user(Uuid::new_v4());
/// let node = Node::builder("fly").build().expect("non-empty permission");
///
/// let event = HolderEvent::node_set(holder, node);
/// assert!(matches!(event, HolderEvent::NodeSet { .. }));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HolderEvent {
    /// A node was added to one of the holder's sets.
    NodeSet {
        /// The mutated holder.
        holder: HolderRef,
        /// The node that was added.
        node: Node,
    },

    /// A node was explicitly removed.
    NodeUnset {
        /// The mutated holder.
        holder: HolderRef,
        /// The node that was removed.
        node: Node,
    },

    /// A temporary node was removed by the expiry audit.
    NodeExpire {
        /// The mutated holder.
        holder: HolderRef,
        /// The expired node.
        node: Node,
    },

    /// The holder started inheriting a group.
    GroupAdd {
        /// The mutated holder.
        holder: HolderRef,
        /// The newly inherited group.
        group: HolderRef,
        /// Server scope of the inheritance, if bound.
        server: Option<String>,
        /// World scope of the inheritance, if bound.
        world: Option<String>,
        /// Expiry instant of a temporary inheritance.
        expire_at: Option<u64>,
    },

    /// The holder stopped inheriting a group.
    GroupRemove {
        /// The mutated holder.
        holder: HolderRef,
        /// Name of the removed group.
        group_name: String,
        /// Server scope of the removed inheritance, if bound.
        server: Option<String>,
        /// World scope of the removed inheritance, if bound.
        world: Option<String>,
        /// Whether the removed inheritance was temporary.
        temporary: bool,
    },
}

impl HolderEvent {
    /// Creates a [`HolderEvent::NodeSet`].
    #[must_use]
    pub fn node_set(holder: HolderRef, node: Node) -> Self {
        Self::NodeSet { holder, node }
    }

    /// Creates a [`HolderEvent::NodeUnset`].
    #[must_use]
    pub fn node_unset(holder: HolderRef, node: Node) -> Self {
        Self::NodeUnset { holder, node }
    }

    /// Creates a [`HolderEvent::NodeExpire`].
    #[must_use]
    pub fn node_expire(holder: HolderRef, node: Node) -> Self {
        Self::NodeExpire { holder, node }
    }

    /// The holder the event concerns.
    #[must_use]
    pub fn holder(&self) -> &HolderRef {
        match self {
            Self::NodeSet { holder, .. }
            | Self::NodeUnset { holder, .. }
            | Self::NodeExpire { holder, .. }
            | Self::GroupAdd { holder, .. }
            | Self::GroupRemove { holder, .. } => holder,
        }
    }

    /// Returns `true` for expiry-audit events.
    #[must_use]
    pub fn is_expire(&self) -> bool {
        matches!(self, Self::NodeExpire { .. })
    }

    /// Short event name for diagnostics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NodeSet { .. } => "node_set",
            Self::NodeUnset { .. } => "node_unset",
            Self::NodeExpire { .. } => "node_expire",
            Self::GroupAdd { .. } => "group_add",
            Self::GroupRemove { .. } => "group_remove",
        }
    }
}

impl std::fmt::Display for HolderEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.kind(), self.holder())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn holder() -> HolderRef {
        HolderRef::group("admin")
    }

    fn node() -> Node {
        Node::builder("a.b").build().expect("build node")
    }

    #[test]
    fn constructors_pick_variants() {
        assert!(matches!(
            HolderEvent::node_set(holder(), node()),
            HolderEvent::NodeSet { .. }
        ));
        assert!(matches!(
            HolderEvent::node_unset(holder(), node()),
            HolderEvent::NodeUnset { .. }
        ));
        assert!(HolderEvent::node_expire(holder(), node()).is_expire());
    }

    #[test]
    fn holder_accessor_covers_all_variants() {
        let user = HolderRef::user(Uuid::new_v4());
        let event = HolderEvent::GroupAdd {
            holder: user.clone(),
            group: holder(),
            server: Some("s1".into()),
            world: None,
            expire_at: None,
        };
        assert_eq!(event.holder(), &user);
        assert_eq!(event.kind(), "group_add");
    }

    #[test]
    fn display_includes_kind_and_holder() {
        let event = HolderEvent::node_set(holder(), node());
        assert_eq!(event.to_string(), "node_set@group:admin");
    }

    #[test]
    fn serde_roundtrip() {
        let event = HolderEvent::GroupRemove {
            holder: holder(),
            group_name: "mods".into(),
            server: None,
            world: Some("nether".into()),
            temporary: true,
        };
        let json = serde_json::to_string(&event).expect("serialize");
        let back: HolderEvent = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, event);
    }
}

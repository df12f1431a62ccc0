//! The permission node value type.
//!
//! A [`Node`] is one permission assertion held by a user or group:
//!
//! ```text
//! Node = permission (dot-separated, case-insensitive for comparison)
//!      + value      (true = grant, false = explicit deny)
//!      + scope      (server?, world?, context tags)
//!      + expiry     (absolute epoch seconds, absent = permanent)
//! ```
//!
//! Nodes are immutable. Construction goes through [`NodeBuilder`], which
//! extracts the reserved `server`/`world` keys out of supplied context
//! tags into the dedicated scope fields.
//!
//! # Classification Conventions
//!
//! | Prefix | Classification | Shape |
//! |--------|----------------|-------|
//! | `group.` | parent-group inheritance | `group.<name>` |
//! | `meta.` | display metadata | `meta.<key>.<value>` |
//! | `prefix.` | chat prefix | `prefix.<priority>.<value>` |
//! | `suffix.` | chat suffix | `suffix.<priority>.<value>` |
//!
//! # Equivalence Relations
//!
//! Two relations drive deduplication and lookup:
//!
//! - [`almost_equals`](Node::almost_equals): same assertion modulo the
//!   exact expiry instant (permission, value, server, world, context and
//!   the is-temporary flag all agree).
//! - [`equals_ignoring_value_or_temp`](Node::equals_ignoring_value_or_temp):
//!   same assertion target regardless of value or temporariness; used to
//!   collapse contradicting grant/deny duplicates during merging.

use crate::shorthand;
use crate::{ContextSet, Tristate};
use regex::RegexBuilder;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error raised by fallible node construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NodeError {
    /// The permission string was empty.
    #[error("permission string must not be empty")]
    EmptyPermission,

    /// A legacy serialized node key could not be parsed.
    #[error("malformed serialized node: {input}")]
    MalformedSerialized {
        /// The offending serialized key.
        input: String,
    },
}

/// A single, immutable permission assertion.
///
/// See the [module documentation](self) for the data model. Build nodes
/// with [`Node::builder`]:
///
/// ```
/// use strata_node::Node;
///
/// let node = Node::builder("minigame.join")
///     .value(true)
///     .server("lobby")
///     .with_context("realm", "eu")
///     .build()
///     .expect("non-empty permission");
///
/// assert!(node.value());
/// assert_eq!(node.server(), Some("lobby"));
/// assert!(node.is_permanent());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Node {
    permission: String,
    value: bool,
    server: Option<String>,
    world: Option<String>,
    context: ContextSet,
    expiry: Option<u64>,
}

impl Node {
    /// Starts building a node for the given permission, defaulting to a
    /// grant (`value = true`) with global scope and no expiry.
    #[must_use]
    pub fn builder(permission: impl Into<String>) -> NodeBuilder {
        NodeBuilder::new(permission)
    }

    /// The permission string.
    #[must_use]
    pub fn permission(&self) -> &str {
        &self.permission
    }

    /// The assertion value: `true` grants, `false` explicitly denies.
    #[must_use]
    pub fn value(&self) -> bool {
        self.value
    }

    /// The assertion value as a defined [`Tristate`].
    #[must_use]
    pub fn tristate(&self) -> Tristate {
        Tristate::from_bool(self.value)
    }

    /// The server this node is bound to; `None` means all servers.
    #[must_use]
    pub fn server(&self) -> Option<&str> {
        self.server.as_deref()
    }

    /// The world this node is bound to; `None` means all worlds.
    #[must_use]
    pub fn world(&self) -> Option<&str> {
        self.world.as_deref()
    }

    /// The context tags constraining this node (reserved keys excluded).
    #[must_use]
    pub fn context(&self) -> &ContextSet {
        &self.context
    }

    /// The absolute expiry instant in epoch seconds, if temporary.
    #[must_use]
    pub fn expiry(&self) -> Option<u64> {
        self.expiry
    }

    /// Returns `true` if this node carries an expiry.
    #[must_use]
    pub fn is_temporary(&self) -> bool {
        self.expiry.is_some()
    }

    /// Returns `true` if this node never expires.
    #[must_use]
    pub fn is_permanent(&self) -> bool {
        self.expiry.is_none()
    }

    /// Returns `true` once the clock has reached the expiry instant.
    #[must_use]
    pub fn has_expired(&self, now_seconds: u64) -> bool {
        self.expiry.is_some_and(|at| at <= now_seconds)
    }

    /// Extracts the referenced group name for `group.<name>` nodes.
    ///
    /// The name is returned lowercased. A bare `group.` with nothing after
    /// the dot is not a group node.
    #[must_use]
    pub fn group_name(&self) -> Option<String> {
        let prefix = self.permission.get(..6)?;
        if !prefix.eq_ignore_ascii_case("group.") {
            return None;
        }
        match self.permission.get(6..) {
            Some(rest) if !rest.is_empty() => Some(rest.to_lowercase()),
            _ => None,
        }
    }

    /// Returns `true` if this node expresses parent-group inheritance.
    #[must_use]
    pub fn is_group_node(&self) -> bool {
        self.group_name().is_some()
    }

    /// Returns `true` for `meta.<key>.<value>` nodes.
    #[must_use]
    pub fn is_meta(&self) -> bool {
        self.meta_entry().is_some()
    }

    /// The (key, value) of a meta node. Dots after the second segment
    /// belong to the value.
    #[must_use]
    pub fn meta_entry(&self) -> Option<(String, String)> {
        let mut parts = self.permission.splitn(3, '.');
        let tag = parts.next()?;
        let key = parts.next()?;
        let value = parts.next()?;
        if tag.eq_ignore_ascii_case("meta") && !key.is_empty() && !value.is_empty() {
            Some((key.to_string(), value.to_string()))
        } else {
            None
        }
    }

    /// Returns `true` for `prefix.<priority>.<value>` nodes.
    #[must_use]
    pub fn is_prefix(&self) -> bool {
        self.classified_as("prefix")
    }

    /// Returns `true` for `suffix.<priority>.<value>` nodes.
    #[must_use]
    pub fn is_suffix(&self) -> bool {
        self.classified_as("suffix")
    }

    fn classified_as(&self, tag: &str) -> bool {
        let mut parts = self.permission.splitn(3, '.');
        parts.next().is_some_and(|t| t.eq_ignore_ascii_case(tag))
            && parts.next().is_some_and(|p| !p.is_empty())
            && parts.next().is_some_and(|v| !v.is_empty())
    }

    /// Number of `*` segments in the permission string.
    #[must_use]
    pub fn wildcard_level(&self) -> usize {
        self.permission.split('.').filter(|s| *s == "*").count()
    }

    /// Returns `true` if the permission contains any wildcard segment.
    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        self.wildcard_level() > 0
    }

    /// Expands `(a|b)` alternation groups into the implied permission
    /// strings, excluding the original. Empty when no groups are present.
    #[must_use]
    pub fn resolve_shorthand(&self) -> Vec<String> {
        shorthand::expand(&self.permission)
    }

    /// Whether this node applies on the queried server.
    ///
    /// A node without a server binding is global and applies iff
    /// `include_global`. A bound node requires a queried server that
    /// matches its binding: case-insensitive equality, or an anchored
    /// case-insensitive regex match when `regex` is on and the binding
    /// is `r=<pattern>`.
    #[must_use]
    pub fn should_apply_on_server(
        &self,
        server: Option<&str>,
        include_global: bool,
        regex: bool,
    ) -> bool {
        scope_applies(self.server(), server, include_global, regex)
    }

    /// Whether this node applies on the queried world. Semantics mirror
    /// [`should_apply_on_server`](Self::should_apply_on_server).
    #[must_use]
    pub fn should_apply_on_world(
        &self,
        world: Option<&str>,
        include_global: bool,
        regex: bool,
    ) -> bool {
        scope_applies(self.world(), world, include_global, regex)
    }

    /// Whether every tag this node requires is present in the supplied
    /// context (reserved keys must already be stripped by the caller).
    #[must_use]
    pub fn should_apply_with_context(&self, context: &ContextSet) -> bool {
        self.context.is_subset_of(context)
    }

    /// Same assertion modulo the exact expiry instant: permission, value,
    /// server, world, context and the is-temporary flag all agree.
    #[must_use]
    pub fn almost_equals(&self, other: &Node) -> bool {
        self.equals_ignoring_value_or_temp(other)
            && self.value == other.value
            && self.is_temporary() == other.is_temporary()
    }

    /// Same assertion target regardless of value or temporariness:
    /// permission, server, world and context agree.
    #[must_use]
    pub fn equals_ignoring_value_or_temp(&self, other: &Node) -> bool {
        self.permission.eq_ignore_ascii_case(&other.permission)
            && opt_eq_ignore_case(self.server(), other.server())
            && opt_eq_ignore_case(self.world(), other.world())
            && self.context == other.context
    }
}

fn opt_eq_ignore_case(a: Option<&str>, b: Option<&str>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => a.eq_ignore_ascii_case(b),
        _ => false,
    }
}

fn scope_applies(scope: Option<&str>, query: Option<&str>, include_global: bool, regex: bool) -> bool {
    match scope {
        None => include_global,
        Some(pattern) => query.is_some_and(|value| scope_value_matches(pattern, value, regex)),
    }
}

fn scope_value_matches(pattern: &str, value: &str, regex: bool) -> bool {
    if regex {
        if let Some(raw) = pattern.strip_prefix("r=") {
            // An unparseable pattern matches nothing.
            return RegexBuilder::new(&format!("^(?:{raw})$"))
                .case_insensitive(true)
                .build()
                .map(|re| re.is_match(value))
                .unwrap_or(false);
        }
    }
    pattern.eq_ignore_ascii_case(value)
}

/// Builder for [`Node`].
///
/// Defaults: `value = true`, global scope, empty context, permanent.
#[derive(Debug, Clone)]
pub struct NodeBuilder {
    permission: String,
    value: bool,
    server: Option<String>,
    world: Option<String>,
    context: ContextSet,
    expiry: Option<u64>,
}

/// Expiry marker used by [`NodeBuilder::temporary`] when no concrete
/// instant is known. Far enough in the future to never read as expired.
const TEMPORARY_MARKER: u64 = u64::MAX;

impl NodeBuilder {
    fn new(permission: impl Into<String>) -> Self {
        Self {
            permission: permission.into(),
            value: true,
            server: None,
            world: None,
            context: ContextSet::new(),
            expiry: None,
        }
    }

    /// Sets the assertion value.
    #[must_use]
    pub fn value(mut self, value: bool) -> Self {
        self.value = value;
        self
    }

    /// Binds the node to a server.
    #[must_use]
    pub fn server(mut self, server: impl Into<String>) -> Self {
        self.server = Some(server.into());
        self
    }

    /// Binds the node to a world.
    #[must_use]
    pub fn world(mut self, world: impl Into<String>) -> Self {
        self.world = Some(world.into());
        self
    }

    /// Adds a context tag. The reserved keys `server` and `world` are
    /// redirected into the dedicated scope fields.
    #[must_use]
    pub fn with_context(mut self, key: impl AsRef<str>, value: impl Into<String>) -> Self {
        let key = key.as_ref();
        if key.eq_ignore_ascii_case("server") {
            self.server = Some(value.into());
        } else if key.eq_ignore_ascii_case("world") {
            self.world = Some(value.into());
        } else {
            self.context = self.context.with(key, value);
        }
        self
    }

    /// Merges a whole context set, redirecting reserved keys.
    #[must_use]
    pub fn context(mut self, context: &ContextSet) -> Self {
        for (k, v) in context.iter() {
            self = self.with_context(k, v.to_string());
        }
        self
    }

    /// Sets an absolute expiry instant in epoch seconds.
    #[must_use]
    pub fn expiry(mut self, at_seconds: u64) -> Self {
        self.expiry = Some(at_seconds);
        self
    }

    /// Marks the node temporary (or permanent) without a concrete expiry.
    ///
    /// Lookup probes only compare the is-temporary flag, so this is the
    /// way to probe for a temporary assertion.
    #[must_use]
    pub fn temporary(mut self, temporary: bool) -> Self {
        self.expiry = if temporary { Some(TEMPORARY_MARKER) } else { None };
        self
    }

    /// Builds the node.
    ///
    /// # Errors
    ///
    /// Returns [`NodeError::EmptyPermission`] if the permission string is
    /// empty.
    pub fn build(self) -> Result<Node, NodeError> {
        if self.permission.is_empty() {
            return Err(NodeError::EmptyPermission);
        }
        Ok(Node {
            permission: self.permission,
            value: self.value,
            server: self.server,
            world: self.world,
            context: self.context,
            expiry: self.expiry,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(permission: &str) -> Node {
        Node::builder(permission).build().expect("build node")
    }

    #[test]
    fn builder_defaults() {
        let n = node("a.b");
        assert_eq!(n.permission(), "a.b");
        assert!(n.value());
        assert_eq!(n.server(), None);
        assert_eq!(n.world(), None);
        assert!(n.context().is_empty());
        assert!(n.is_permanent());
        assert_eq!(n.tristate(), crate::Tristate::True);
    }

    #[test]
    fn empty_permission_rejected() {
        assert_eq!(
            Node::builder("").build().expect_err("empty must fail"),
            NodeError::EmptyPermission
        );
    }

    #[test]
    fn reserved_context_keys_redirect() {
        let n = Node::builder("a")
            .with_context("server", "s1")
            .with_context("World", "nether")
            .with_context("realm", "eu")
            .build()
            .expect("build node");
        assert_eq!(n.server(), Some("s1"));
        assert_eq!(n.world(), Some("nether"));
        assert_eq!(n.context().len(), 1);
        assert!(n.context().contains("realm", "eu"));
    }

    #[test]
    fn expiry_and_temporary() {
        let n = Node::builder("a").expiry(100).build().expect("build node");
        assert!(n.is_temporary());
        assert!(!n.has_expired(99));
        assert!(n.has_expired(100));
        assert!(n.has_expired(101));

        let probe = Node::builder("a").temporary(true).build().expect("build probe");
        assert!(probe.is_temporary());
        assert!(!probe.has_expired(u64::MAX - 1));
    }

    #[test]
    fn group_node_classification() {
        let g = node("group.Admin");
        assert!(g.is_group_node());
        assert_eq!(g.group_name().as_deref(), Some("admin"));

        assert!(!node("group.").is_group_node());
        assert!(!node("groups.admin").is_group_node());
        assert!(!node("a.b").is_group_node());
    }

    #[test]
    fn meta_classification() {
        let m = node("meta.color.red.bold");
        assert!(m.is_meta());
        assert_eq!(
            m.meta_entry(),
            Some(("color".to_string(), "red.bold".to_string()))
        );

        assert!(!node("meta.color").is_meta());
        assert!(node("prefix.10.[Admin]").is_prefix());
        assert!(node("suffix.10.!").is_suffix());
        assert!(!node("prefix.10").is_prefix());
    }

    #[test]
    fn wildcard_levels() {
        assert_eq!(node("a.b.c").wildcard_level(), 0);
        assert_eq!(node("a.*").wildcard_level(), 1);
        assert_eq!(node("*.b.*").wildcard_level(), 2);
        assert!(node("a.*").is_wildcard());
        // A '*' embedded in a segment is not a wildcard segment.
        assert!(!node("a.b*").is_wildcard());
    }

    #[test]
    fn server_applicability() {
        let global = node("a");
        assert!(global.should_apply_on_server(Some("s1"), true, false));
        assert!(!global.should_apply_on_server(Some("s1"), false, false));
        assert!(global.should_apply_on_server(None, true, false));

        let bound = Node::builder("a").server("S1").build().expect("build node");
        assert!(bound.should_apply_on_server(Some("s1"), false, false));
        assert!(!bound.should_apply_on_server(Some("s2"), true, false));
        assert!(!bound.should_apply_on_server(None, true, false));
    }

    #[test]
    fn regex_scope_matching() {
        let bound = Node::builder("a").server("r=lobby-\\d+").build().expect("build node");
        assert!(bound.should_apply_on_server(Some("lobby-3"), false, true));
        assert!(!bound.should_apply_on_server(Some("lobby-x"), false, true));
        // Regex disabled: pattern is a literal.
        assert!(!bound.should_apply_on_server(Some("lobby-3"), false, false));
        assert!(bound.should_apply_on_server(Some("r=lobby-\\d+"), false, false));
    }

    #[test]
    fn invalid_regex_matches_nothing() {
        let bound = Node::builder("a").server("r=(").build().expect("build node");
        assert!(!bound.should_apply_on_server(Some("anything"), false, true));
    }

    #[test]
    fn context_applicability() {
        let n = Node::builder("a").with_context("realm", "eu").build().expect("build node");
        let eu = ContextSet::new().with("realm", "eu");
        let us = ContextSet::new().with("realm", "us");

        assert!(n.should_apply_with_context(&eu));
        assert!(!n.should_apply_with_context(&us));
        assert!(!n.should_apply_with_context(&ContextSet::new()));
        assert!(node("a").should_apply_with_context(&ContextSet::new()));
    }

    #[test]
    fn almost_equals_relation() {
        let a = node("a.b");
        let b = node("A.B");
        assert!(a.almost_equals(&b));

        // Different value breaks it.
        let deny = Node::builder("a.b").value(false).build().expect("build node");
        assert!(!a.almost_equals(&deny));

        // Different temporariness breaks it; the exact instant does not.
        let t1 = Node::builder("a.b").expiry(100).build().expect("build node");
        let t2 = Node::builder("a.b").expiry(200).build().expect("build node");
        assert!(t1.almost_equals(&t2));
        assert!(!a.almost_equals(&t1));

        // Scope differences break it.
        let s = Node::builder("a.b").server("s1").build().expect("build node");
        assert!(!a.almost_equals(&s));
    }

    #[test]
    fn equals_ignoring_value_or_temp_relation() {
        let grant = node("a.b");
        let deny = Node::builder("a.b").value(false).expiry(50).build().expect("build node");
        assert!(grant.equals_ignoring_value_or_temp(&deny));

        let other_ctx = Node::builder("a.b").with_context("k", "v").build().expect("build node");
        assert!(!grant.equals_ignoring_value_or_temp(&other_ctx));
    }

    #[test]
    fn serde_roundtrip() {
        let n = Node::builder("a.b")
            .value(false)
            .server("s1")
            .world("w1")
            .with_context("realm", "eu")
            .expiry(1234)
            .build()
            .expect("build node");
        let json = serde_json::to_string(&n).expect("serialize");
        let back: Node = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, n);
    }
}

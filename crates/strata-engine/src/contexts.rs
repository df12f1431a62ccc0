//! Resolution query contexts.

use serde::{Deserialize, Serialize};
use strata_node::ContextSet;

/// The caller's side of a resolution request.
///
/// Carries the context tags the query is made under plus the flags that
/// steer group traversal and final filtering. The reserved keys `server`
/// and `world` travel inside [`context`](Self::context); resolution
/// extracts them and passes them to the dedicated scope filters.
///
/// Two flag families exist because group traversal and final filtering
/// answer different questions: `apply_global_groups` /
/// `apply_global_world_groups` decide which *parents* are walked, while
/// `include_global` / `include_global_world` decide which *nodes* survive
/// the final view.
///
/// # Example
///
/// ```
/// use strata_engine::Contexts;
/// use strata_node::ContextSet;
///
/// let ctx = Contexts::new(ContextSet::new().with("server", "s1"))
///     .with_include_global(false);
/// assert!(ctx.apply_groups);
/// assert!(!ctx.include_global);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contexts {
    /// Context tags of the query, including reserved keys.
    pub context: ContextSet,
    /// Walk parent groups at all.
    pub apply_groups: bool,
    /// Walk parents whose group node has no server binding.
    pub apply_global_groups: bool,
    /// Walk parents whose group node has no world binding.
    pub apply_global_world_groups: bool,
    /// Keep nodes without a server binding in the final view.
    pub include_global: bool,
    /// Keep nodes without a world binding in the final view.
    pub include_global_world: bool,
}

impl Contexts {
    /// Creates a context with all flags enabled.
    #[must_use]
    pub fn new(context: ContextSet) -> Self {
        Self {
            context,
            apply_groups: true,
            apply_global_groups: true,
            apply_global_world_groups: true,
            include_global: true,
            include_global_world: true,
        }
    }

    /// An unconstrained query: empty tags, every flag on.
    #[must_use]
    pub fn allow_all() -> Self {
        Self::new(ContextSet::new())
    }

    /// Sets whether groups are walked at all.
    #[must_use]
    pub fn with_apply_groups(mut self, apply: bool) -> Self {
        self.apply_groups = apply;
        self
    }

    /// Sets whether server-global group nodes select parents.
    #[must_use]
    pub fn with_apply_global_groups(mut self, apply: bool) -> Self {
        self.apply_global_groups = apply;
        self
    }

    /// Sets whether world-global group nodes select parents.
    #[must_use]
    pub fn with_apply_global_world_groups(mut self, apply: bool) -> Self {
        self.apply_global_world_groups = apply;
        self
    }

    /// Sets whether server-global nodes survive final filtering.
    #[must_use]
    pub fn with_include_global(mut self, include: bool) -> Self {
        self.include_global = include;
        self
    }

    /// Sets whether world-global nodes survive final filtering.
    #[must_use]
    pub fn with_include_global_world(mut self, include: bool) -> Self {
        self.include_global_world = include;
        self
    }

    /// Splits the tag set into (server, world, remaining tags).
    #[must_use]
    pub(crate) fn split_scope(&self) -> (Option<String>, Option<String>, ContextSet) {
        let server = self.context.any_value("server").map(str::to_string);
        let world = self.context.any_value("world").map(str::to_string);
        let tags = self.context.without(&["server", "world"]);
        (server, world, tags)
    }
}

impl Default for Contexts {
    fn default() -> Self {
        Self::allow_all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allow_all_enables_everything() {
        let ctx = Contexts::allow_all();
        assert!(ctx.apply_groups);
        assert!(ctx.apply_global_groups);
        assert!(ctx.apply_global_world_groups);
        assert!(ctx.include_global);
        assert!(ctx.include_global_world);
        assert!(ctx.context.is_empty());
    }

    #[test]
    fn split_scope_extracts_reserved_keys() {
        let ctx = Contexts::new(
            ContextSet::new()
                .with("server", "s1")
                .with("world", "nether")
                .with("realm", "eu"),
        );
        let (server, world, tags) = ctx.split_scope();
        assert_eq!(server.as_deref(), Some("s1"));
        assert_eq!(world.as_deref(), Some("nether"));
        assert_eq!(tags.len(), 1);
        assert!(tags.contains("realm", "eu"));
    }

    #[test]
    fn split_scope_without_reserved_keys() {
        let (server, world, tags) = Contexts::allow_all().split_scope();
        assert_eq!(server, None);
        assert_eq!(world, None);
        assert!(tags.is_empty());
    }

    #[test]
    fn builder_flags_compose() {
        let ctx = Contexts::allow_all()
            .with_apply_groups(false)
            .with_include_global_world(false);
        assert!(!ctx.apply_groups);
        assert!(!ctx.include_global_world);
        assert!(ctx.include_global);
    }
}

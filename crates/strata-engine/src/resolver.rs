//! Transitive inheritance resolution.
//!
//! Walks the group graph from a holder, composing each visited group's
//! merged snapshot under the caller's [`Contexts`]. The walk is
//! cycle-safe: the set of excluded group names strictly grows along each
//! descent, and a group inside its own ancestry chain is never
//! re-entered. Each resolution chain owns a private exclusion list, so
//! concurrent walks from different roots never share mutable state.
//!
//! Because every holder's snapshot is pulled independently, a composed
//! result is a read-committed view across holders, not a linearizable
//! one.

use crate::contexts::Contexts;
use crate::holder::{build_probe, PermissionHolder};
use std::collections::HashMap;
use strata_node::{priority_cmp, LocalizedNode, Node, Tristate};

/// Where an inherited assertion came from.
///
/// Produced by [`PermissionHolder::inherits_node_info`]: the lookup
/// verdict plus the `object_name` of the holder that supplied the
/// matching node, when one was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InheritanceInfo {
    result: Tristate,
    location: Option<String>,
}

impl InheritanceInfo {
    fn found(node: &LocalizedNode) -> Self {
        Self {
            result: node.node().tristate(),
            location: Some(node.location().to_string()),
        }
    }

    fn empty() -> Self {
        Self {
            result: Tristate::Undefined,
            location: None,
        }
    }

    /// The lookup verdict.
    #[must_use]
    pub fn result(&self) -> Tristate {
        self.result
    }

    /// The holder that supplied the matching node, if any.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }
}

impl PermissionHolder {
    /// Resolves this holder's nodes together with everything inherited
    /// transitively from parent groups, in priority order.
    ///
    /// `excluded_groups` names groups that must not be entered; the
    /// slice is copied on entry and never mutated. The holder's own name
    /// joins the exclusion set before parents are walked, which is what
    /// terminates cyclic graphs.
    ///
    /// Parent selection honors the `apply_global*` flags of `context`;
    /// inherited nodes are dropped when the accumulated view already
    /// holds an `almost_equal` assertion ("first seen wins" in priority
    /// order). Unknown groups are skipped.
    #[must_use]
    pub fn resolve_all(
        &self,
        excluded_groups: Option<&[String]>,
        context: &Contexts,
    ) -> Vec<LocalizedNode> {
        let mut excluded: Vec<String> = excluded_groups.map(<[String]>::to_vec).unwrap_or_default();
        let mut all = self.resolve_all_into(&mut excluded, context);
        all.sort_by(|a, b| priority_cmp(a.node(), b.node()));
        all
    }

    fn resolve_all_into(
        &self,
        excluded: &mut Vec<String>,
        context: &Contexts,
    ) -> Vec<LocalizedNode> {
        let mut all: Vec<LocalizedNode> = self.permissions(true).as_ref().clone();
        excluded.push(self.object_name().to_lowercase());

        let (server, world, tags) = context.split_scope();
        let regex = self.services().config.applying_regex;

        let parents: Vec<Node> = all
            .iter()
            .map(LocalizedNode::node)
            .filter(|n| n.value() && n.is_group_node())
            .filter(|n| {
                n.should_apply_on_server(server.as_deref(), context.apply_global_groups, regex)
                    && n.should_apply_on_world(
                        world.as_deref(),
                        context.apply_global_world_groups,
                        regex,
                    )
                    && n.should_apply_with_context(&tags)
            })
            .cloned()
            .collect();

        for parent in parents {
            let Some(name) = parent.group_name() else {
                continue;
            };
            let Some(group) = self.services().registry.group(&name) else {
                tracing::trace!(holder = %self.object_name(), parent = %name, "unknown group skipped");
                continue;
            };
            if excluded
                .iter()
                .any(|e| e.eq_ignore_ascii_case(group.object_name()))
            {
                continue;
            }

            for inherited in group.resolve_all_into(excluded, context) {
                let duplicate = all
                    .iter()
                    .any(|existing| existing.node().almost_equals(inherited.node()));
                if !duplicate {
                    all.push(inherited);
                }
            }
        }

        all
    }

    /// The holder's effective nodes under `context`, reduced to one
    /// verdict per permission string.
    ///
    /// When `context.apply_groups` is off only the holder's own merged
    /// snapshot is considered. Final filtering uses the `include_global*`
    /// flags; the reduction keeps the first (highest-priority) node per
    /// exact permission string.
    #[must_use]
    pub fn resolve_filtered(&self, context: &Contexts) -> Vec<LocalizedNode> {
        let mut all: Vec<LocalizedNode> = if context.apply_groups {
            self.resolve_all(None, context)
        } else {
            self.permissions(true).as_ref().clone()
        };

        let (server, world, tags) = context.split_scope();
        let regex = self.services().config.applying_regex;

        all.retain(|ln| {
            let n = ln.node();
            n.should_apply_on_server(server.as_deref(), context.include_global, regex)
                && n.should_apply_on_world(world.as_deref(), context.include_global_world, regex)
                && n.should_apply_with_context(&tags)
        });

        let mut kept: Vec<LocalizedNode> = Vec::with_capacity(all.len());
        for candidate in all {
            let seen = kept
                .iter()
                .any(|k| k.node().permission() == candidate.node().permission());
            if !seen {
                kept.push(candidate);
            }
        }
        kept
    }

    /// Exports the effective permission map under `context`.
    ///
    /// One entry per filtered node; with shorthand enabled, each implied
    /// permission that is not already present is added with the parent
    /// node's value.
    #[must_use]
    pub fn export_permissions(&self, context: &Contexts, lower_case: bool) -> HashMap<String, bool> {
        let shorthand = self.services().config.applying_shorthand;
        let mut perms: HashMap<String, bool> = HashMap::new();

        for ln in self.resolve_filtered(context) {
            let node = ln.node();
            let key = if lower_case {
                node.permission().to_lowercase()
            } else {
                node.permission().to_string()
            };
            perms.insert(key, node.value());

            if shorthand {
                for implied in node.resolve_shorthand() {
                    let key = if lower_case {
                        implied.to_lowercase()
                    } else {
                        implied
                    };
                    perms.entry(key).or_insert(node.value());
                }
            }
        }

        perms
    }

    /// Looks the probe up through the full inheritance walk (under
    /// [`Contexts::allow_all`]), reporting verdict and origin.
    #[must_use]
    pub fn inherits_node_info(&self, probe: &Node) -> InheritanceInfo {
        for ln in self.resolve_all(None, &Contexts::allow_all()) {
            if ln.node().almost_equals(probe) {
                return InheritanceInfo::found(&ln);
            }
        }
        InheritanceInfo::empty()
    }

    /// Verdict-only form of [`inherits_node_info`](Self::inherits_node_info).
    #[must_use]
    pub fn inherits_node(&self, probe: &Node) -> Tristate {
        self.inherits_node_info(probe).result()
    }

    /// Probes the inheritance walk for `(permission, value)`, flattening
    /// like [`has_permission_value`](Self::has_permission_value).
    #[must_use]
    pub fn inherits_node_value(&self, permission: &str, value: bool) -> bool {
        self.inherits_node_value_scoped(permission, value, None, None, false)
    }

    /// Scoped probe form of [`inherits_node_value`](Self::inherits_node_value).
    #[must_use]
    pub fn inherits_node_value_scoped(
        &self,
        permission: &str,
        value: bool,
        server: Option<&str>,
        world: Option<&str>,
        temporary: bool,
    ) -> bool {
        match build_probe(permission, value, server, world, temporary) {
            Some(probe) => self.inherits_node(&probe).as_bool() == value,
            None => false,
        }
    }
}

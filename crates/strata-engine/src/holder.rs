//! Permission holders.
//!
//! A [`PermissionHolder`] owns the two raw node sets, the four derivation
//! caches, and the whole mutation/query API. Inheritance resolution over
//! the group graph lives in [`resolver`](crate::resolver) as a second
//! `impl` block on the same type.
//!
//! # Locking Discipline
//!
//! ```text
//! enduring:  RwLock ──┐                       ┌── enduring_cache
//! transient: RwLock ──┤  invalidate (atomic)  ├── transient_cache
//!                     └──────────────────────►├── resolution_cache
//!                                             └── merged_cache
//! ```
//!
//! Mutations take exactly one set's write lock, mutate, flip the
//! invalidation flags while still inside the lock, release, then emit
//! events. Snapshot reads go through the caches and only take the
//! corresponding read lock while recomputing. The two set locks are
//! never held together.

use crate::cache::SnapshotCache;
use crate::clock::{Clock, SystemClock};
use crate::config::ResolverConfig;
use crate::error::MutateError;
use crate::registry::{EmptyGroupRegistry, GroupRegistry};
use parking_lot::{Mutex, RwLock};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use strata_event::{EventSink, HolderEvent, NoopSink};
use strata_node::{priority_cmp, HolderKind, HolderRef, LocalizedNode, Node, NodeError, Tristate};
use uuid::Uuid;

/// Matching sentinel for an absent server in clear-by-scope operations.
const GLOBAL_SERVER: &str = "global";
/// Matching sentinel for an absent world in clear-by-scope operations.
const GLOBAL_WORLD: &str = "null";

/// Which of a holder's two node sets an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetKind {
    /// The persisted set.
    Enduring,
    /// The in-memory-only set.
    Transient,
}

/// The collaborators a holder is wired with at construction.
///
/// Defaults are inert: events are discarded, no groups resolve, the
/// system wall clock drives expiry, and both resolver flags are off.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use strata_engine::{InMemoryGroupRegistry, ResolverConfig, Services};
/// use strata_event::RecordingSink;
///
/// let services = Services::new()
///     .with_sink(Arc::new(RecordingSink::new()))
///     .with_registry(Arc::new(InMemoryGroupRegistry::new()))
///     .with_config(ResolverConfig::new().with_shorthand(true));
/// ```
#[derive(Debug, Clone)]
pub struct Services {
    pub(crate) sink: Arc<dyn EventSink>,
    pub(crate) registry: Arc<dyn GroupRegistry>,
    pub(crate) clock: Arc<dyn Clock>,
    pub(crate) config: ResolverConfig,
}

impl Services {
    /// Creates the default wiring.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sink: Arc::new(NoopSink),
            registry: Arc::new(EmptyGroupRegistry),
            clock: Arc::new(SystemClock),
            config: ResolverConfig::default(),
        }
    }

    /// Replaces the event sink.
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Replaces the group registry.
    #[must_use]
    pub fn with_registry(mut self, registry: Arc<dyn GroupRegistry>) -> Self {
        self.registry = registry;
        self
    }

    /// Replaces the clock.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replaces the resolver configuration.
    #[must_use]
    pub fn with_config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }
}

impl Default for Services {
    fn default() -> Self {
        Self::new()
    }
}

/// An object that can hold permissions: a user or a group.
///
/// All operations are thread-safe. Query methods return immutable `Arc`
/// snapshots; mutators serialize through per-set locks and invalidate
/// the derived caches before they return, so a mutation happens-before
/// any later snapshot on the same holder.
pub struct PermissionHolder {
    kind: HolderKind,
    /// The UUID of the user / lowercased name of the group. Doubles as
    /// the cycle key during inheritance walks.
    object_name: String,

    enduring: RwLock<HashSet<Node>>,
    transient: RwLock<HashSet<Node>>,

    enduring_cache: SnapshotCache<Vec<Node>>,
    transient_cache: SnapshotCache<Vec<Node>>,
    /// Priority-merged view deduped with `almost_equals`.
    resolution_cache: SnapshotCache<Vec<LocalizedNode>>,
    /// Priority-merged view deduped with `equals_ignoring_value_or_temp`.
    merged_cache: SnapshotCache<Vec<LocalizedNode>>,

    /// Handle for external persistence code to serialize save/load
    /// against administrative operations. The engine never takes it.
    io_lock: Mutex<()>,

    services: Services,
}

impl std::fmt::Debug for PermissionHolder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PermissionHolder")
            .field("kind", &self.kind)
            .field("object_name", &self.object_name)
            .finish_non_exhaustive()
    }
}

impl PermissionHolder {
    /// Creates a user holder identified by UUID.
    #[must_use]
    pub fn user(uuid: Uuid, services: Services) -> Self {
        Self::with_identity(HolderKind::User, uuid.to_string(), services)
    }

    /// Creates a group holder; the name is lowercased.
    #[must_use]
    pub fn group(name: impl AsRef<str>, services: Services) -> Self {
        Self::with_identity(HolderKind::Group, name.as_ref().to_lowercase(), services)
    }

    fn with_identity(kind: HolderKind, object_name: String, services: Services) -> Self {
        Self {
            kind,
            object_name,
            enduring: RwLock::new(HashSet::new()),
            transient: RwLock::new(HashSet::new()),
            enduring_cache: SnapshotCache::new(),
            transient_cache: SnapshotCache::new(),
            resolution_cache: SnapshotCache::new(),
            merged_cache: SnapshotCache::new(),
            io_lock: Mutex::new(()),
            services,
        }
    }

    /// The holder kind.
    #[must_use]
    pub fn kind(&self) -> HolderKind {
        self.kind
    }

    /// The stable identity: user UUID string or lowercased group name.
    #[must_use]
    pub fn object_name(&self) -> &str {
        &self.object_name
    }

    /// The identity reference carried by events and localized nodes.
    #[must_use]
    pub fn holder_ref(&self) -> HolderRef {
        HolderRef::from_parts(self.kind, self.object_name.clone())
    }

    /// The lock external persistence takes around save/load.
    #[must_use]
    pub fn io_lock(&self) -> &Mutex<()> {
        &self.io_lock
    }

    pub(crate) fn services(&self) -> &Services {
        &self.services
    }

    // ---- snapshots ------------------------------------------------------

    /// Immutable snapshot of the enduring set.
    #[must_use]
    pub fn nodes(&self) -> Arc<Vec<Node>> {
        self.enduring_cache
            .get(|| self.enduring.read().iter().cloned().collect())
    }

    /// Immutable snapshot of the transient set.
    #[must_use]
    pub fn transient_nodes(&self) -> Arc<Vec<Node>> {
        self.transient_cache
            .get(|| self.transient.read().iter().cloned().collect())
    }

    /// The holder's own nodes (enduring ∪ transient), localized, in
    /// priority order, with lower-priority duplicates removed.
    ///
    /// The dedup key is `equals_ignoring_value_or_temp` when `merge_temp`
    /// (contradicting values collapse to the highest-priority one) and
    /// `almost_equals` otherwise. Expired nodes never appear.
    #[must_use]
    pub fn permissions(&self, merge_temp: bool) -> Arc<Vec<LocalizedNode>> {
        if merge_temp {
            self.merged_cache.get(|| self.build_localized(true))
        } else {
            self.resolution_cache.get(|| self.build_localized(false))
        }
    }

    fn build_localized(&self, merge_temp: bool) -> Vec<LocalizedNode> {
        let now = self.services.clock.now_seconds();
        let enduring = self.nodes();
        let transient = self.transient_nodes();

        let mut combined: Vec<LocalizedNode> = enduring
            .iter()
            .chain(transient.iter())
            .filter(|n| !n.has_expired(now))
            .map(|n| LocalizedNode::new(n.clone(), self.object_name.clone()))
            .collect();
        combined.sort_by(|a, b| priority_cmp(a.node(), b.node()));

        let mut kept: Vec<LocalizedNode> = Vec::with_capacity(combined.len());
        for candidate in combined {
            let duplicate = kept.iter().any(|higher| {
                if merge_temp {
                    higher.node().equals_ignoring_value_or_temp(candidate.node())
                } else {
                    higher.node().almost_equals(candidate.node())
                }
            });
            if !duplicate {
                kept.push(candidate);
            }
        }
        kept
    }

    /// Temporary nodes currently held (expiry-filtered, priority order).
    #[must_use]
    pub fn temporary_nodes(&self) -> Vec<Node> {
        self.permissions(false)
            .iter()
            .filter(|ln| ln.node().is_temporary())
            .map(|ln| ln.node().clone())
            .collect()
    }

    /// Permanent nodes currently held (priority order).
    #[must_use]
    pub fn permanent_nodes(&self) -> Vec<Node> {
        self.permissions(false)
            .iter()
            .filter(|ln| ln.node().is_permanent())
            .map(|ln| ln.node().clone())
            .collect()
    }

    // ---- lookup ---------------------------------------------------------

    /// Scans the chosen raw set for a node `almost_equal` to the probe.
    ///
    /// Returns the stored node's value, or `Undefined` when nothing
    /// matches. Expired nodes still match here: until the audit removes
    /// them they occupy their assertion slot, which is what keeps
    /// [`set_permission`](Self::set_permission) from inserting a
    /// duplicate beside them.
    #[must_use]
    pub fn has_permission(&self, probe: &Node, kind: SetKind) -> Tristate {
        let snapshot = match kind {
            SetKind::Enduring => self.nodes(),
            SetKind::Transient => self.transient_nodes(),
        };
        for node in snapshot.iter() {
            if node.almost_equals(probe) {
                return node.tristate();
            }
        }
        Tristate::Undefined
    }

    /// Probes the enduring set for `(permission, value)`.
    ///
    /// Flattens through [`Tristate::as_bool`], so probing with
    /// `value = false` also answers `true` when no assertion exists at
    /// all; callers needing the distinction use
    /// [`has_permission`](Self::has_permission).
    #[must_use]
    pub fn has_permission_value(&self, permission: &str, value: bool) -> bool {
        self.has_permission_value_scoped(permission, value, None, None, false)
    }

    /// Probes the enduring set with a scoped probe node.
    #[must_use]
    pub fn has_permission_value_scoped(
        &self,
        permission: &str,
        value: bool,
        server: Option<&str>,
        world: Option<&str>,
        temporary: bool,
    ) -> bool {
        match build_probe(permission, value, server, world, temporary) {
            Some(probe) => self.has_permission(&probe, SetKind::Enduring).as_bool() == value,
            None => false,
        }
    }

    // ---- mutation -------------------------------------------------------

    /// Adds a node to the enduring set.
    ///
    /// # Errors
    ///
    /// [`MutateError::AlreadyHeld`] if an `almost_equal` node exists.
    pub fn set_permission(&self, node: Node) -> Result<(), MutateError> {
        self.set_in(node, SetKind::Enduring)
    }

    /// Adds a node to the transient set.
    ///
    /// # Errors
    ///
    /// [`MutateError::AlreadyHeld`] if an `almost_equal` node exists.
    pub fn set_transient_permission(&self, node: Node) -> Result<(), MutateError> {
        self.set_in(node, SetKind::Transient)
    }

    fn set_in(&self, node: Node, kind: SetKind) -> Result<(), MutateError> {
        if !self.has_permission(&node, kind).is_undefined() {
            return Err(MutateError::AlreadyHeld);
        }

        {
            let mut nodes = self.set_lock(kind).write();
            nodes.insert(node.clone());
            self.invalidate(kind);
        }

        tracing::trace!(holder = %self.object_name, permission = node.permission(), "node set");
        self.services
            .sink
            .submit(HolderEvent::node_set(self.holder_ref(), node));
        Ok(())
    }

    /// Removes every node `almost_equal` to the probe from the enduring
    /// set.
    ///
    /// # Errors
    ///
    /// [`MutateError::NotHeld`] if nothing matches.
    pub fn unset_permission(&self, probe: &Node) -> Result<(), MutateError> {
        self.unset_in(probe, SetKind::Enduring)
    }

    /// Removes every node `almost_equal` to the probe from the transient
    /// set.
    ///
    /// # Errors
    ///
    /// [`MutateError::NotHeld`] if nothing matches.
    pub fn unset_transient_permission(&self, probe: &Node) -> Result<(), MutateError> {
        self.unset_in(probe, SetKind::Transient)
    }

    fn unset_in(&self, probe: &Node, kind: SetKind) -> Result<(), MutateError> {
        if self.has_permission(probe, kind).is_undefined() {
            return Err(MutateError::NotHeld);
        }

        self.retain_nodes(kind, |n| !n.almost_equals(probe));

        tracing::trace!(holder = %self.object_name, permission = probe.permission(), "node unset");
        let event = match probe.group_name() {
            Some(group_name) => HolderEvent::GroupRemove {
                holder: self.holder_ref(),
                group_name,
                server: probe.server().map(str::to_string),
                world: probe.world().map(str::to_string),
                temporary: probe.is_temporary(),
            },
            None => HolderEvent::node_unset(self.holder_ref(), probe.clone()),
        };
        self.services.sink.submit(event);
        Ok(())
    }

    /// Replaces the whole enduring set. A replacement equal to the
    /// current set is a no-op: no invalidation, no events.
    pub fn set_nodes(&self, set: HashSet<Node>) {
        self.replace_set(set, SetKind::Enduring);
    }

    /// Replaces the whole transient set; same no-op rule as
    /// [`set_nodes`](Self::set_nodes).
    pub fn set_transient_nodes(&self, set: HashSet<Node>) {
        self.replace_set(set, SetKind::Transient);
    }

    fn replace_set(&self, set: HashSet<Node>, kind: SetKind) {
        let mut nodes = self.set_lock(kind).write();
        if *nodes == set {
            return;
        }
        *nodes = set;
        self.invalidate(kind);
    }

    /// Replaces the enduring set from a legacy `serialized → value` map.
    ///
    /// # Errors
    ///
    /// Returns the first [`NodeError`] hit while parsing; the holder is
    /// left untouched in that case.
    pub fn set_nodes_from_legacy(&self, legacy: &HashMap<String, bool>) -> Result<(), NodeError> {
        let parsed = legacy
            .iter()
            .map(|(key, value)| Node::from_serialized(key, *value))
            .collect::<Result<HashSet<_>, _>>()?;
        self.set_nodes(parsed);
        Ok(())
    }

    /// Adds a node to the enduring set without the `almost_equal`
    /// precondition. Loader path: the caller vouches for set hygiene.
    pub fn add_node_unchecked(&self, node: Node) {
        let mut nodes = self.enduring.write();
        if nodes.insert(node) {
            self.invalidate(SetKind::Enduring);
        }
    }

    // ---- bulk clearing --------------------------------------------------

    /// Removes all enduring nodes.
    pub fn clear_nodes(&self) {
        let mut nodes = self.enduring.write();
        nodes.clear();
        self.invalidate(SetKind::Enduring);
    }

    /// Removes enduring nodes on the given server scope. An absent
    /// server matches nodes without one (the `"global"` sentinel);
    /// matching is case-insensitive.
    pub fn clear_nodes_on_server(&self, server: Option<&str>) {
        self.retain_nodes(SetKind::Enduring, |n| !server_matches(n, server));
    }

    /// Removes enduring nodes on the given server and world scope.
    pub fn clear_nodes_on_server_world(&self, server: Option<&str>, world: Option<&str>) {
        self.retain_nodes(SetKind::Enduring, |n| {
            !(server_matches(n, server) && world_matches(n, world))
        });
    }

    /// Removes all enduring group nodes.
    pub fn clear_parents(&self) {
        self.retain_nodes(SetKind::Enduring, |n| !n.is_group_node());
    }

    /// Removes enduring group nodes on the given server scope.
    pub fn clear_parents_on_server(&self, server: Option<&str>) {
        self.retain_nodes(SetKind::Enduring, |n| {
            !(n.is_group_node() && server_matches(n, server))
        });
    }

    /// Removes enduring group nodes on the given server and world scope.
    pub fn clear_parents_on_server_world(&self, server: Option<&str>, world: Option<&str>) {
        self.retain_nodes(SetKind::Enduring, |n| {
            !(n.is_group_node() && server_matches(n, server) && world_matches(n, world))
        });
    }

    /// Removes all enduring meta, prefix and suffix nodes.
    pub fn clear_meta(&self) {
        self.retain_nodes(SetKind::Enduring, |n| !is_meta_like(n));
    }

    /// Removes meta-like enduring nodes on the given server scope.
    pub fn clear_meta_on_server(&self, server: Option<&str>) {
        self.retain_nodes(SetKind::Enduring, |n| {
            !(is_meta_like(n) && server_matches(n, server))
        });
    }

    /// Removes meta-like enduring nodes on the given server and world
    /// scope.
    pub fn clear_meta_on_server_world(&self, server: Option<&str>, world: Option<&str>) {
        self.retain_nodes(SetKind::Enduring, |n| {
            !(is_meta_like(n) && server_matches(n, server) && world_matches(n, world))
        });
    }

    /// Removes enduring meta nodes with the given key (case-insensitive)
    /// and temporariness.
    pub fn clear_meta_keys(&self, key: &str, temporary: bool) {
        self.retain_nodes(SetKind::Enduring, |n| !meta_key_matches(n, key, temporary));
    }

    /// Key-form clear restricted to a server scope.
    pub fn clear_meta_keys_on_server(&self, key: &str, server: Option<&str>, temporary: bool) {
        self.retain_nodes(SetKind::Enduring, |n| {
            !(meta_key_matches(n, key, temporary) && server_matches(n, server))
        });
    }

    /// Key-form clear restricted to a server and world scope.
    pub fn clear_meta_keys_on_server_world(
        &self,
        key: &str,
        server: Option<&str>,
        world: Option<&str>,
        temporary: bool,
    ) {
        self.retain_nodes(SetKind::Enduring, |n| {
            !(meta_key_matches(n, key, temporary)
                && server_matches(n, server)
                && world_matches(n, world))
        });
    }

    /// Drops all transient nodes.
    pub fn clear_transient_nodes(&self) {
        let mut nodes = self.transient.write();
        nodes.clear();
        self.invalidate(SetKind::Transient);
    }

    // ---- expiry audit ---------------------------------------------------

    /// Removes expired nodes from both sets, emitting one `NodeExpire`
    /// per removed node. Returns whether anything was removed.
    pub fn audit_temporary_permissions(&self) -> bool {
        let now = self.services.clock.now_seconds();
        let mut removed: Vec<Node> = Vec::new();

        for kind in [SetKind::Enduring, SetKind::Transient] {
            let mut nodes = self.set_lock(kind).write();
            let expired: Vec<Node> = nodes.iter().filter(|n| n.has_expired(now)).cloned().collect();
            if expired.is_empty() {
                continue;
            }
            for node in &expired {
                nodes.remove(node);
            }
            self.invalidate(kind);
            removed.extend(expired);
        }

        if removed.is_empty() {
            return false;
        }

        tracing::debug!(holder = %self.object_name, count = removed.len(), "expired nodes removed");
        for node in removed {
            self.services
                .sink
                .submit(HolderEvent::node_expire(self.holder_ref(), node));
        }
        true
    }

    // ---- group convenience ----------------------------------------------

    /// Names of all groups referenced by enduring group nodes.
    #[must_use]
    pub fn group_names(&self) -> Vec<String> {
        self.nodes().iter().filter_map(Node::group_name).collect()
    }

    /// Names of groups whose nodes apply on the given scope. Global
    /// group nodes are excluded; `r=` bindings match as regexes.
    #[must_use]
    pub fn local_groups(&self, server: &str, world: Option<&str>) -> Vec<String> {
        self.nodes()
            .iter()
            .filter(|n| n.is_group_node())
            .filter(|n| world.map_or(true, |w| n.should_apply_on_world(Some(w), false, true)))
            .filter(|n| n.should_apply_on_server(Some(server), false, true))
            .filter_map(Node::group_name)
            .collect()
    }

    /// Whether this holder is, or directly holds a grant for, the group.
    #[must_use]
    pub fn inherits_group(
        &self,
        group: &PermissionHolder,
        server: Option<&str>,
        world: Option<&str>,
    ) -> bool {
        group.object_name().eq_ignore_ascii_case(&self.object_name)
            || self.has_permission_value_scoped(
                &group_permission(group.object_name()),
                true,
                server,
                world,
                false,
            )
    }

    /// Starts inheriting a group by granting its `group.<name>` node.
    ///
    /// # Errors
    ///
    /// [`MutateError::AlreadyHeld`] when the group is the holder itself
    /// or an equivalent grant already exists.
    pub fn set_inherit_group(
        &self,
        group: &PermissionHolder,
        server: Option<&str>,
        world: Option<&str>,
        expire_at: Option<u64>,
    ) -> Result<(), MutateError> {
        if group.object_name().eq_ignore_ascii_case(&self.object_name) {
            return Err(MutateError::AlreadyHeld);
        }

        let node = match build_group_node(group.object_name(), server, world, expire_at) {
            Some(node) => node,
            None => return Err(MutateError::AlreadyHeld),
        };
        self.set_permission(node)?;

        self.services.sink.submit(HolderEvent::GroupAdd {
            holder: self.holder_ref(),
            group: group.holder_ref(),
            server: server.map(str::to_string),
            world: world.map(str::to_string),
            expire_at,
        });
        Ok(())
    }

    /// Stops inheriting a group.
    ///
    /// # Errors
    ///
    /// [`MutateError::NotHeld`] when no matching grant exists.
    pub fn unset_inherit_group(
        &self,
        group: &PermissionHolder,
        server: Option<&str>,
        world: Option<&str>,
        temporary: bool,
    ) -> Result<(), MutateError> {
        match build_probe(
            &group_permission(group.object_name()),
            true,
            server,
            world,
            temporary,
        ) {
            Some(probe) => self.unset_permission(&probe),
            None => Err(MutateError::NotHeld),
        }
    }

    // ---- internals ------------------------------------------------------

    fn set_lock(&self, kind: SetKind) -> &RwLock<HashSet<Node>> {
        match kind {
            SetKind::Enduring => &self.enduring,
            SetKind::Transient => &self.transient,
        }
    }

    /// Retains nodes matching `keep`; invalidates if anything dropped.
    /// Caller must not already hold the set lock.
    fn retain_nodes(&self, kind: SetKind, keep: impl FnMut(&Node) -> bool) -> bool {
        let mut nodes = self.set_lock(kind).write();
        let before = nodes.len();
        nodes.retain(keep);
        let changed = nodes.len() != before;
        if changed {
            self.invalidate(kind);
        }
        changed
    }

    /// A mutation of either raw set stales that set's copy and both
    /// merged views.
    fn invalidate(&self, kind: SetKind) {
        match kind {
            SetKind::Enduring => self.enduring_cache.invalidate(),
            SetKind::Transient => self.transient_cache.invalidate(),
        }
        self.resolution_cache.invalidate();
        self.merged_cache.invalidate();
    }
}

/// Renders a holder's nodes as the legacy `serialized → value` map.
#[must_use]
pub fn export_to_legacy(nodes: &[Node]) -> HashMap<String, bool> {
    nodes
        .iter()
        .map(|n| (n.to_serialized(), n.value()))
        .collect()
}

fn group_permission(name: &str) -> String {
    format!("group.{name}")
}

fn build_group_node(
    name: &str,
    server: Option<&str>,
    world: Option<&str>,
    expire_at: Option<u64>,
) -> Option<Node> {
    let mut b = Node::builder(group_permission(name)).value(true);
    if let Some(server) = server {
        b = b.server(server);
    }
    if let Some(world) = world {
        b = b.world(world);
    }
    if let Some(at) = expire_at {
        b = b.expiry(at);
    }
    b.build().ok()
}

pub(crate) fn build_probe(
    permission: &str,
    value: bool,
    server: Option<&str>,
    world: Option<&str>,
    temporary: bool,
) -> Option<Node> {
    let mut b = Node::builder(permission).value(value).temporary(temporary);
    if let Some(server) = server {
        b = b.server(server);
    }
    if let Some(world) = world {
        b = b.world(world);
    }
    b.build().ok()
}

fn server_matches(node: &Node, server: Option<&str>) -> bool {
    scope_matches(node.server(), server, GLOBAL_SERVER)
}

fn world_matches(node: &Node, world: Option<&str>) -> bool {
    scope_matches(node.world(), world, GLOBAL_WORLD)
}

/// Sentinel-based scope equality used only by clear-by-scope operations:
/// absent values on either side read as the sentinel literal.
fn scope_matches(scope: Option<&str>, query: Option<&str>, absent: &str) -> bool {
    scope
        .unwrap_or(absent)
        .eq_ignore_ascii_case(query.unwrap_or(absent))
}

fn is_meta_like(node: &Node) -> bool {
    node.is_meta() || node.is_prefix() || node.is_suffix()
}

fn meta_key_matches(node: &Node, key: &str, temporary: bool) -> bool {
    node.is_temporary() == temporary
        && node
            .meta_entry()
            .is_some_and(|(k, _)| k.eq_ignore_ascii_case(key))
}

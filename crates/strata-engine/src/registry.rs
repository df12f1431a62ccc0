//! Group directory lookup.

use crate::PermissionHolder;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Looks up a group holder by name.
///
/// Inheritance resolution asks the registry for every `group.<name>`
/// parent it encounters; an unknown name is simply skipped. The trait is
/// the seam towards whatever directory the host keeps its groups in.
pub trait GroupRegistry: Send + Sync + std::fmt::Debug {
    /// Returns the group with the given name (matched case-insensitively),
    /// or `None` if no such group exists.
    fn group(&self, name: &str) -> Option<Arc<PermissionHolder>>;
}

/// A thread-safe in-process group directory.
///
/// Groups are keyed by their lowercased `object_name`.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use strata_engine::{GroupRegistry, InMemoryGroupRegistry, PermissionHolder, Services};
///
/// let registry = Arc::new(InMemoryGroupRegistry::new());
/// let services = Services::new().with_registry(registry.clone());
///
/// let admin = Arc::new(PermissionHolder::group("Admin", services));
/// registry.register(admin);
///
/// assert!(registry.group("ADMIN").is_some());
/// assert!(registry.group("missing").is_none());
/// ```
#[derive(Debug, Default)]
pub struct InMemoryGroupRegistry {
    groups: RwLock<HashMap<String, Arc<PermissionHolder>>>,
}

impl InMemoryGroupRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a group under its `object_name`. A previous group with
    /// the same name is replaced.
    pub fn register(&self, group: Arc<PermissionHolder>) {
        let key = group.object_name().to_lowercase();
        self.groups.write().insert(key, group);
    }

    /// Removes a group by name. Returns the removed holder, if any.
    pub fn unregister(&self, name: &str) -> Option<Arc<PermissionHolder>> {
        self.groups.write().remove(&name.to_lowercase())
    }

    /// Names of all registered groups, unordered.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.groups.read().keys().cloned().collect()
    }
}

impl GroupRegistry for InMemoryGroupRegistry {
    fn group(&self, name: &str) -> Option<Arc<PermissionHolder>> {
        self.groups.read().get(&name.to_lowercase()).cloned()
    }
}

/// A registry that knows no groups. Default wiring for holders that are
/// never asked to resolve inheritance.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyGroupRegistry;

impl GroupRegistry for EmptyGroupRegistry {
    fn group(&self, _name: &str) -> Option<Arc<PermissionHolder>> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Services;

    #[test]
    fn register_and_lookup_case_insensitive() {
        let registry = InMemoryGroupRegistry::new();
        let group = Arc::new(PermissionHolder::group("Staff", Services::new()));
        registry.register(group);

        assert!(registry.group("staff").is_some());
        assert!(registry.group("STAFF").is_some());
        assert_eq!(registry.names(), vec!["staff".to_string()]);
    }

    #[test]
    fn unregister_removes() {
        let registry = InMemoryGroupRegistry::new();
        registry.register(Arc::new(PermissionHolder::group("staff", Services::new())));

        assert!(registry.unregister("Staff").is_some());
        assert!(registry.group("staff").is_none());
        assert!(registry.unregister("staff").is_none());
    }

    #[test]
    fn empty_registry_knows_nothing() {
        assert!(EmptyGroupRegistry.group("anything").is_none());
    }
}

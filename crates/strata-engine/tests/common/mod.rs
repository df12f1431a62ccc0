#![allow(dead_code)]
//! Shared wiring for engine integration tests.

use std::sync::Arc;
use strata_engine::{
    FixedClock, InMemoryGroupRegistry, PermissionHolder, ResolverConfig, Services,
};
use strata_event::RecordingSink;
use strata_node::Node;
use uuid::Uuid;

/// A fully wired engine environment with observable collaborators.
pub struct Harness {
    pub sink: Arc<RecordingSink>,
    pub clock: Arc<FixedClock>,
    pub registry: Arc<InMemoryGroupRegistry>,
    pub services: Services,
}

pub fn harness() -> Harness {
    harness_with(ResolverConfig::new())
}

pub fn harness_with(config: ResolverConfig) -> Harness {
    let sink = Arc::new(RecordingSink::new());
    let clock = Arc::new(FixedClock::at(1_000));
    let registry = Arc::new(InMemoryGroupRegistry::new());
    let services = Services::new()
        .with_sink(sink.clone())
        .with_clock(clock.clone())
        .with_registry(registry.clone())
        .with_config(config);
    Harness {
        sink,
        clock,
        registry,
        services,
    }
}

impl Harness {
    /// A fresh user holder.
    pub fn user(&self) -> PermissionHolder {
        PermissionHolder::user(Uuid::new_v4(), self.services.clone())
    }

    /// A group holder, registered in the directory.
    pub fn group(&self, name: &str) -> Arc<PermissionHolder> {
        let group = Arc::new(PermissionHolder::group(name, self.services.clone()));
        self.registry.register(group.clone());
        group
    }
}

/// A permanent global grant.
pub fn node(permission: &str) -> Node {
    Node::builder(permission).build().expect("build node")
}

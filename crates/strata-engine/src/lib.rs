//! Hierarchical permission resolution.
//!
//! A [`PermissionHolder`] (a user or a group) owns two sets of permission
//! nodes: an *enduring* set that external persistence saves, and a
//! *transient* set that lives only for the process. Groups are holders
//! too, and a `group.<name>` node on a holder makes it inherit the named
//! group's nodes transitively.
//!
//! The engine answers two questions for a holder and a query context:
//! what is the effective value of one permission, and what is the fully
//! resolved permission map, including inherited nodes, priority
//! overrides, temporary expiry and shorthand expansion.
//!
//! # Crate Architecture
//!
//! ```text
//! strata-node    (Node, ContextSet, Tristate, ordering)
//!     ↑   ↑
//!     │  strata-event (HolderEvent, EventSink)
//!     │       ↑
//! strata-engine (PermissionHolder, resolution)  ◄── THIS CRATE
//! ```
//!
//! # Concurrency Model
//!
//! Each holder guards its two raw sets with independent `RwLock`s and
//! derives four memoized snapshots ([`SnapshotCache`]): the immutable
//! copies of both sets and two priority-merged views. Reads pull `Arc`
//! snapshots without touching the set locks except when a snapshot must
//! be recomputed; mutations take the one relevant write lock, flip the
//! caches' invalidation flags, release, and then emit events. Composing
//! snapshots across holders (inheritance) is read-committed, not
//! linearizable.
//!
//! # Injected Collaborators
//!
//! | Seam | Trait | Purpose |
//! |------|-------|---------|
//! | events | [`EventSink`](strata_event::EventSink) | fire-and-forget mutation announcements |
//! | groups | [`GroupRegistry`] | look up a group holder by name |
//! | time | [`Clock`] | epoch seconds for expiry checks |
//!
//! There are no ambient singletons; every holder receives its
//! collaborators at construction through [`Services`].
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use strata_engine::{Contexts, InMemoryGroupRegistry, PermissionHolder, Services};
//! use strata_node::Node;
//! use uuid::Uuid;
//!
//! let registry = Arc::new(InMemoryGroupRegistry::new());
//! let services = Services::new().with_registry(registry.clone());
//!
//! let admin = Arc::new(PermissionHolder::group("admin", services.clone()));
//! let fly = Node::builder("fly").build().expect("non-empty permission");
//! admin.set_permission(fly).expect("admin lacks the node");
//! registry.register(admin.clone());
//!
//! let user = PermissionHolder::user(Uuid::new_v4(), services);
//! user.set_inherit_group(&admin, None, None, None).expect("not yet inherited");
//!
//! let perms = user.export_permissions(&Contexts::allow_all(), true);
//! assert_eq!(perms.get("fly"), Some(&true));
//! ```

mod cache;
mod clock;
mod config;
mod contexts;
mod error;
mod holder;
mod registry;
mod resolver;

pub use cache::SnapshotCache;
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::ResolverConfig;
pub use contexts::Contexts;
pub use error::MutateError;
pub use holder::{export_to_legacy, PermissionHolder, Services, SetKind};
pub use registry::{EmptyGroupRegistry, GroupRegistry, InMemoryGroupRegistry};
pub use resolver::InheritanceInfo;

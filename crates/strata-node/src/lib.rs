//! Permission node value types for strata.
//!
//! This crate provides the value-type layer of the strata permission
//! engine, sitting at the bottom of the dependency graph.
//!
//! # Crate Architecture
//!
//! ```text
//! strata-node   (Node, ContextSet, Tristate, ordering)  ◄── THIS CRATE
//!     ↑                ↑
//! strata-event     strata-engine
//! (HolderEvent)    (PermissionHolder, resolution)
//! ```
//!
//! # Data Model
//!
//! A [`Node`] is a single permission assertion: a dot-separated permission
//! string, a boolean value (grant or explicit deny), an applicability scope
//! (server, world, arbitrary context tags) and an optional expiry.
//!
//! | Type | Role |
//! |------|------|
//! | [`Node`] | Immutable permission assertion |
//! | [`ContextSet`] | Immutable multimap of context tag → values |
//! | [`Tristate`] | Three-valued lookup verdict |
//! | [`LocalizedNode`] | Node tagged with its origin holder |
//! | [`HolderRef`] | Identity of a user or group holder |
//!
//! # Design Principles
//!
//! - **Values are immutable** — a [`Node`] is built once via [`NodeBuilder`]
//!   and never modified; engines swap whole snapshots instead.
//! - **Pure classification** — shorthand expansion and scope matching are
//!   pure functions on the node, so resolution engines stay testable with
//!   stub nodes.
//! - **No ambient state** — nothing in this crate reads clocks or
//!   configuration; callers pass the current time and flags explicitly.

mod context;
mod identity;
mod localized;
mod node;
mod ordering;
mod serialized;
mod shorthand;
mod tristate;

pub use context::ContextSet;
pub use identity::{HolderKind, HolderRef};
pub use localized::LocalizedNode;
pub use node::{Node, NodeBuilder, NodeError};
pub use ordering::priority_cmp;
pub use tristate::Tristate;

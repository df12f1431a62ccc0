//! Priority ordering of nodes.
//!
//! Resolution merges a holder's own nodes with inherited ones; when two
//! assertions collide, the more specific one must win. This module defines
//! that order as a comparator: sorting a sequence ascending with
//! [`priority_cmp`] places the highest-priority node first.
//!
//! Ranking keys, most significant first:
//!
//! 1. Server-specificity — a server-bound node beats a global one.
//! 2. World-specificity — a world-bound node beats a world-global one.
//! 3. Wildcard depth — fewer `*` segments beats more.
//! 4. Temporariness — a temporary node beats a permanent one.
//! 5. Permission string, lexicographic — a stable, deterministic tiebreak.
//!
//! Nodes equal under all five keys compare equal; sequences are sorted
//! with a stable sort so such nodes keep their first-inserted order, and
//! deduplication is always performed with the node equivalence relations,
//! never with this comparator.

use crate::Node;
use std::cmp::Ordering;

/// Compares two nodes by effective priority, highest first.
#[must_use]
pub fn priority_cmp(a: &Node, b: &Node) -> Ordering {
    match (a.server().is_some(), b.server().is_some()) {
        (true, false) => return Ordering::Less,
        (false, true) => return Ordering::Greater,
        _ => {}
    }

    match (a.world().is_some(), b.world().is_some()) {
        (true, false) => return Ordering::Less,
        (false, true) => return Ordering::Greater,
        _ => {}
    }

    let wildcards = a.wildcard_level().cmp(&b.wildcard_level());
    if wildcards != Ordering::Equal {
        return wildcards;
    }

    match (a.is_temporary(), b.is_temporary()) {
        (true, false) => return Ordering::Less,
        (false, true) => return Ordering::Greater,
        _ => {}
    }

    a.permission().cmp(b.permission())
}

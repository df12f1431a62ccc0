//! Context tag sets.
//!
//! A [`ContextSet`] constrains where a node applies: an immutable multimap
//! of tag key → values. The reserved keys `server` and `world` never live
//! in a node's context set; the node model carries them as dedicated
//! fields and resolution extracts them from query context sets before
//! matching.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// An immutable multimap of context tag key → values.
///
/// Backed by ordered maps so that equality and hashing are structural and
/// independent of insertion order.
///
/// # Example
///
/// ```
/// use strata_node::ContextSet;
///
/// let ctx = ContextSet::new()
///     .with("realm", "eu")
///     .with("gamemode", "creative")
///     .with("gamemode", "survival");
///
/// assert!(ctx.contains("realm", "eu"));
/// assert_eq!(ctx.values("gamemode").count(), 2);
/// assert_eq!(ctx.any_value("realm"), Some("eu"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContextSet {
    entries: BTreeMap<String, BTreeSet<String>>,
}

impl ContextSet {
    /// Creates an empty context set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a context set from key/value pairs.
    #[must_use]
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut set = Self::new();
        for (k, v) in pairs {
            set.insert(k.into(), v.into());
        }
        set
    }

    /// Returns a copy with one additional tag.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key.into(), value.into());
        self
    }

    fn insert(&mut self, key: String, value: String) {
        self.entries.entry(key).or_default().insert(value);
    }

    /// Returns `true` if no tags are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of (key, value) tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.values().map(BTreeSet::len).sum()
    }

    /// Returns `true` if the exact (key, value) tag is present.
    #[must_use]
    pub fn contains(&self, key: &str, value: &str) -> bool {
        self.entries.get(key).is_some_and(|vs| vs.contains(value))
    }

    /// Returns `true` if any value is present for the key.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Iterates the values recorded for a key.
    pub fn values(&self, key: &str) -> impl Iterator<Item = &str> {
        self.entries
            .get(key)
            .into_iter()
            .flat_map(|vs| vs.iter().map(String::as_str))
    }

    /// Returns one value for the key, if any is present.
    #[must_use]
    pub fn any_value(&self, key: &str) -> Option<&str> {
        self.entries
            .get(key)
            .and_then(|vs| vs.iter().next())
            .map(String::as_str)
    }

    /// Returns a copy without the listed keys.
    #[must_use]
    pub fn without(&self, keys: &[&str]) -> Self {
        let entries = self
            .entries
            .iter()
            .filter(|(k, _)| !keys.contains(&k.as_str()))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        Self { entries }
    }

    /// Returns `true` if every tag in `self` is present in `other`.
    ///
    /// An empty set is a subset of everything, which is what makes an
    /// unconstrained node apply in any context.
    #[must_use]
    pub fn is_subset_of(&self, other: &Self) -> bool {
        self.iter().all(|(k, v)| other.contains(k, v))
    }

    /// Iterates all (key, value) tags in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .flat_map(|(k, vs)| vs.iter().map(move |v| (k.as_str(), v.as_str())))
    }
}

impl std::fmt::Display for ContextSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (k, v) in self.iter() {
            if !first {
                write!(f, ",")?;
            }
            write!(f, "{k}={v}")?;
            first = false;
        }
        Ok(())
    }
}

//! Holder identity types.
//!
//! A holder is either a user (identified by UUID) or a group (identified
//! by lowercased name). The `object_name` is the stable identity string
//! used as the cycle key during inheritance walks and carried by events.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Discriminates the two kinds of permission holder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HolderKind {
    /// A user; `object_name` is the UUID string.
    User,
    /// A group; `object_name` is the lowercased group name.
    Group,
}

/// Identity of a permission holder.
///
/// This is the lightweight reference carried by events, not the holder
/// itself.
///
/// # Example
///
/// ```
/// use strata_node::{HolderKind, HolderRef};
/// use uuid::Uuid;
///
/// let user = HolderRef::user(Uuid::new_v4());
/// assert_eq!(user.kind(), HolderKind::User);
///
/// let group = HolderRef::group("Admin");
/// assert_eq!(group.object_name(), "admin"); // names are lowercased
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HolderRef {
    kind: HolderKind,
    object_name: String,
}

impl HolderRef {
    /// Creates a user reference from its UUID.
    #[must_use]
    pub fn user(uuid: Uuid) -> Self {
        Self {
            kind: HolderKind::User,
            object_name: uuid.to_string(),
        }
    }

    /// Creates a group reference; the name is lowercased.
    #[must_use]
    pub fn group(name: impl AsRef<str>) -> Self {
        Self {
            kind: HolderKind::Group,
            object_name: name.as_ref().to_lowercase(),
        }
    }

    /// Reassembles a reference from an identity previously read from
    /// [`object_name`](Self::object_name). Group names are lowercased.
    #[must_use]
    pub fn from_parts(kind: HolderKind, object_name: impl Into<String>) -> Self {
        let object_name = object_name.into();
        let object_name = match kind {
            HolderKind::Group => object_name.to_lowercase(),
            HolderKind::User => object_name,
        };
        Self { kind, object_name }
    }

    /// The holder kind.
    #[must_use]
    pub fn kind(&self) -> HolderKind {
        self.kind
    }

    /// The stable identity string.
    #[must_use]
    pub fn object_name(&self) -> &str {
        &self.object_name
    }
}

impl std::fmt::Display for HolderRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self.kind {
            HolderKind::User => "user",
            HolderKind::Group => "group",
        };
        write!(f, "{kind}:{}", self.object_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_ref_uses_uuid_string() {
        let id = Uuid::new_v4();
        let holder = HolderRef::user(id);
        assert_eq!(holder.kind(), HolderKind::User);
        assert_eq!(holder.object_name(), id.to_string());
    }

    #[test]
    fn group_ref_lowercases() {
        let holder = HolderRef::group("Moderators");
        assert_eq!(holder.kind(), HolderKind::Group);
        assert_eq!(holder.object_name(), "moderators");
    }

    #[test]
    fn display_includes_kind() {
        let holder = HolderRef::group("admin");
        assert_eq!(holder.to_string(), "group:admin");
    }

    #[test]
    fn equality_is_structural() {
        assert_eq!(HolderRef::group("A"), HolderRef::group("a"));
        assert_ne!(HolderRef::group("a"), HolderRef::group("b"));
    }

    #[test]
    fn serde_roundtrip() {
        let holder = HolderRef::user(Uuid::new_v4());
        let json = serde_json::to_string(&holder).expect("serialize");
        let back: HolderRef = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, holder);
    }
}

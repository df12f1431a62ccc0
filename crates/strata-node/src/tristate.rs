//! Three-valued permission lookup verdict.

use serde::{Deserialize, Serialize};

/// The outcome of a permission lookup.
///
/// A lookup can find a grant, an explicit deny, or nothing at all.
/// Collapsing the last two into `false` loses information that callers
/// such as inheritance resolution depend on, so lookups return a
/// `Tristate` and only the outermost convenience layer flattens it.
///
/// # Example
///
/// ```
/// use strata_node::Tristate;
///
/// assert_eq!(Tristate::from_bool(true), Tristate::True);
/// assert!(Tristate::True.as_bool());
/// assert!(!Tristate::Undefined.as_bool());
/// assert!(Tristate::Undefined.is_undefined());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tristate {
    /// The permission is granted.
    True,
    /// The permission is explicitly denied.
    False,
    /// No matching assertion exists.
    Undefined,
}

impl Tristate {
    /// Converts a boolean assertion value into a defined tristate.
    #[must_use]
    pub fn from_bool(value: bool) -> Self {
        if value {
            Self::True
        } else {
            Self::False
        }
    }

    /// Flattens to a boolean; `Undefined` collapses to `false`.
    ///
    /// Callers that must distinguish "explicitly denied" from "not held"
    /// should match on the variant instead.
    #[must_use]
    pub fn as_bool(self) -> bool {
        matches!(self, Self::True)
    }

    /// Returns `true` if no matching assertion exists.
    #[must_use]
    pub fn is_undefined(self) -> bool {
        matches!(self, Self::Undefined)
    }
}

impl From<bool> for Tristate {
    fn from(value: bool) -> Self {
        Self::from_bool(value)
    }
}

impl std::fmt::Display for Tristate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::True => "true",
            Self::False => "false",
            Self::Undefined => "undefined",
        };
        write!(f, "{s}")
    }
}

//! Resolution configuration flags.

use serde::{Deserialize, Serialize};

/// Flags consumed by node matching and export.
///
/// | Flag | Effect |
/// |------|--------|
/// | `applying_regex` | `r=<pattern>` server/world bindings match as regexes |
/// | `applying_shorthand` | export expands `(a\|b)` alternation groups |
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Enables regex semantics for `r=`-prefixed scope bindings.
    pub applying_regex: bool,
    /// Enables shorthand expansion during export.
    pub applying_shorthand: bool,
}

impl ResolverConfig {
    /// Creates the default configuration (both flags off).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the regex matching flag.
    #[must_use]
    pub fn with_regex(mut self, enabled: bool) -> Self {
        self.applying_regex = enabled;
        self
    }

    /// Sets the shorthand expansion flag.
    #[must_use]
    pub fn with_shorthand(mut self, enabled: bool) -> Self {
        self.applying_shorthand = enabled;
        self
    }
}

//! Legacy serialized node form.
//!
//! Storage exports a holder as a `map<string, bool>`: the key is the
//! serialized node, the value the assertion value. The key layout is
//!
//! ```text
//! (k=v,k2=v2)server-world/permission$expiry
//! └── context ┘└── scope ──┘            └ epoch seconds
//! ```
//!
//! Every part except the permission is optional. An absent server inside
//! a scoped key is written as the literal `global` so that a world-only
//! binding stays representable. Round-tripping preserves permission,
//! value, server, world, context and expiry.

use crate::{Node, NodeError};

impl Node {
    /// Renders this node as a legacy serialized key.
    ///
    /// The assertion value is not part of the key; it travels as the map
    /// value beside it.
    #[must_use]
    pub fn to_serialized(&self) -> String {
        let mut out = String::new();

        if !self.context().is_empty() {
            out.push('(');
            let mut first = true;
            for (k, v) in self.context().iter() {
                if !first {
                    out.push(',');
                }
                out.push_str(k);
                out.push('=');
                out.push_str(v);
                first = false;
            }
            out.push(')');
        }

        match (self.server(), self.world()) {
            (None, None) => {}
            (Some(server), None) => {
                out.push_str(server);
                out.push('/');
            }
            (server, Some(world)) => {
                out.push_str(server.unwrap_or("global"));
                out.push('-');
                out.push_str(world);
                out.push('/');
            }
        }

        out.push_str(self.permission());

        if let Some(expiry) = self.expiry() {
            out.push('$');
            out.push_str(&expiry.to_string());
        }

        out
    }

    /// Parses a legacy serialized key back into a node.
    ///
    /// # Errors
    ///
    /// Returns [`NodeError::MalformedSerialized`] when the context or
    /// scope sections are unparseable, and [`NodeError::EmptyPermission`]
    /// when no permission remains.
    pub fn from_serialized(key: &str, value: bool) -> Result<Node, NodeError> {
        let malformed = || NodeError::MalformedSerialized {
            input: key.to_string(),
        };

        let mut rest = key;

        let mut context_pairs: Vec<(&str, &str)> = Vec::new();
        if let Some(after_paren) = rest.strip_prefix('(') {
            let end = after_paren.find(')').ok_or_else(malformed)?;
            for pair in after_paren[..end].split(',') {
                let (k, v) = pair.split_once('=').ok_or_else(malformed)?;
                if k.is_empty() {
                    return Err(malformed());
                }
                context_pairs.push((k, v));
            }
            rest = &after_paren[end + 1..];
        }

        let (scope, permission_part) = match rest.split_once('/') {
            Some((scope, rest)) => (Some(scope), rest),
            None => (None, rest),
        };

        let (permission, expiry) = split_expiry(permission_part);

        let mut b = Node::builder(permission).value(value);
        if let Some(scope) = scope {
            let (server, world) = match scope.split_once('-') {
                Some((server, world)) => {
                    if world.is_empty() {
                        return Err(malformed());
                    }
                    (server, Some(world))
                }
                None => (scope, None),
            };
            if server.is_empty() {
                return Err(malformed());
            }
            if !server.eq_ignore_ascii_case("global") {
                b = b.server(server);
            }
            if let Some(world) = world {
                b = b.world(world);
            }
        }
        for (k, v) in context_pairs {
            b = b.with_context(k, v.to_string());
        }
        if let Some(at) = expiry {
            b = b.expiry(at);
        }

        b.build()
    }
}

/// Splits a trailing `$<seconds>` expiry off the permission. A `$` whose
/// suffix is not a number belongs to the permission itself.
fn split_expiry(permission_part: &str) -> (&str, Option<u64>) {
    match permission_part.rsplit_once('$') {
        Some((head, tail)) if !head.is_empty() => match tail.parse::<u64>() {
            Ok(at) => (head, Some(at)),
            Err(_) => (permission_part, None),
        },
        _ => (permission_part, None),
    }
}

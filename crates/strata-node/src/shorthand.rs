//! Shorthand permission expansion.
//!
//! A permission segment of the form `(a|b|c)` stands for each of its
//! alternatives; a permission containing such groups implies the cartesian
//! product of all alternatives. `build.(create|destroy)` implies
//! `build.create` and `build.destroy`.
//!
//! Expansion is a pure function of the permission string so that engines
//! can apply it lazily at export time.

/// Expands alternation groups into the implied permission strings.
///
/// Returns an empty vec when the permission contains no groups. The
/// original string is never included in the result.
#[must_use]
pub(crate) fn expand(permission: &str) -> Vec<String> {
    if !permission.contains('(') {
        return Vec::new();
    }

    let mut found_group = false;
    let mut results: Vec<String> = vec![String::new()];

    for segment in permission.split('.') {
        let alternatives: Vec<&str> = match alternation(segment) {
            Some(options) => {
                found_group = true;
                options
            }
            None => vec![segment],
        };

        results = results
            .iter()
            .flat_map(|prefix| {
                alternatives.iter().map(move |option| {
                    if prefix.is_empty() {
                        (*option).to_string()
                    } else {
                        format!("{prefix}.{option}")
                    }
                })
            })
            .collect();
    }

    if !found_group {
        return Vec::new();
    }

    results.retain(|expanded| expanded != permission);
    results
}

/// Parses a `(a|b)` segment into its alternatives.
fn alternation(segment: &str) -> Option<Vec<&str>> {
    let inner = segment.strip_prefix('(')?.strip_suffix(')')?;
    if !inner.contains('|') {
        return None;
    }
    Some(inner.split('|').filter(|alt| !alt.is_empty()).collect())
}

//! Mutation failure types.

use thiserror::Error;

/// Why a holder mutation was refused.
///
/// These are the only observable failures in the engine; every other
/// anomaly (unknown group, expired node, missing context key) is handled
/// silently by filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MutateError {
    /// The holder already has an equivalent node (or already is the
    /// group it was asked to inherit).
    #[error("holder already has an equivalent node")]
    AlreadyHeld,

    /// No equivalent node exists to remove.
    #[error("holder does not have a matching node")]
    NotHeld,
}

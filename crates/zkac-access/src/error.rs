//! # Registry Errors
//!
//! Administrative failures. Authorization denials are not errors; they are
//! [`DenialReason`](crate::decision::DenialReason) values inside a
//! [`Decision`](crate::decision::Decision).

use thiserror::Error;

use zkac_core::{Nullifier, Principal};

/// Errors from administrative registry operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    /// Caller is not the designated administrator.
    #[error("principal {caller} is not authorized to administer this registry")]
    AdministrativeUnauthorized {
        /// Who tried.
        caller: Principal,
    },

    /// A snapshot lists the same nullifier twice.
    #[error("snapshot lists nullifier {0} more than once")]
    DuplicateNullifier(Nullifier),

    /// A snapshot records a nullifier under an epoch that was never active.
    #[error("snapshot records nullifier {nullifier} under epoch {epoch}, beyond the active epoch {active}")]
    EpochOutOfRange {
        /// The offending nullifier.
        nullifier: Nullifier,
        /// Epoch it claims.
        epoch: u64,
        /// Active epoch in the snapshot.
        active: u64,
    },
}

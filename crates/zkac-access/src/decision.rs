//! # Authorization Decisions
//!
//! The mediator answers every attempt with a [`Decision`]. A granted
//! decision carries a [`Grant`]: a token with private fields that only this
//! crate can construct, so a guarded resource holding a `Grant` knows the
//! mediator actually approved this call.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use zkac_core::{ActionHash, AttemptId, Nullifier, Timestamp};

/// Why an attempt was refused. Every reason is distinct and terminal.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialReason {
    /// The claimed root is not the active root, or no root is registered.
    #[error("stale or unknown root")]
    StaleOrUnknownRoot,
    /// The verifier rejected the proof for these public inputs.
    #[error("invalid proof")]
    InvalidProof,
    /// The nullifier was already consumed.
    #[error("nullifier already used")]
    NullifierReused,
}

/// What a caller should do after a denial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Remediation {
    /// Produce a fresh proof under the currently active root.
    ReproveUnderActiveRoot,
    /// Discard this proof; retrying it will never succeed.
    AbandonProof,
    /// This member already performed this action. Nothing will succeed.
    GiveUp,
}

impl DenialReason {
    /// Caller guidance for this denial.
    pub fn remediation(self) -> Remediation {
        match self {
            DenialReason::StaleOrUnknownRoot => Remediation::ReproveUnderActiveRoot,
            DenialReason::InvalidProof => Remediation::AbandonProof,
            DenialReason::NullifierReused => Remediation::GiveUp,
        }
    }

    /// Stable snake_case label for logs.
    pub fn as_str(self) -> &'static str {
        match self {
            DenialReason::StaleOrUnknownRoot => "stale_or_unknown_root",
            DenialReason::InvalidProof => "invalid_proof",
            DenialReason::NullifierReused => "nullifier_reused",
        }
    }
}

/// Proof that the mediator granted one specific attempt.
///
/// Not `Clone`: a resource consumes the grant when it mutates state.
#[derive(Debug, PartialEq, Eq)]
pub struct Grant {
    attempt: AttemptId,
    action_hash: ActionHash,
    nullifier: Nullifier,
    epoch: u64,
    granted_at: Timestamp,
}

impl Grant {
    pub(crate) fn new(attempt: AttemptId, action_hash: ActionHash, nullifier: Nullifier, epoch: u64) -> Self {
        Self {
            attempt,
            action_hash,
            nullifier,
            epoch,
            granted_at: Timestamp::now(),
        }
    }

    /// The attempt this grant answers.
    pub fn attempt(&self) -> AttemptId {
        self.attempt
    }

    /// The action that was authorized.
    pub fn action_hash(&self) -> ActionHash {
        self.action_hash
    }

    /// The nullifier consumed by this grant.
    pub fn nullifier(&self) -> Nullifier {
        self.nullifier
    }

    /// Root epoch the grant was issued under.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// When the nullifier was consumed.
    pub fn granted_at(&self) -> Timestamp {
        self.granted_at
    }
}

/// Outcome of one authorization attempt.
#[derive(Debug, PartialEq, Eq)]
pub enum Decision {
    /// Authorized; the nullifier is now consumed.
    Granted(Grant),
    /// Refused; nothing was mutated.
    Denied(DenialReason),
}

impl Decision {
    /// Whether this is a grant.
    pub fn is_granted(&self) -> bool {
        matches!(self, Decision::Granted(_))
    }

    /// The denial reason, if denied.
    pub fn denial(&self) -> Option<DenialReason> {
        match self {
            Decision::Granted(_) => None,
            Decision::Denied(reason) => Some(*reason),
        }
    }

    /// Convert into a `Result`, for `?` at the resource boundary.
    pub fn into_result(self) -> Result<Grant, DenialReason> {
        match self {
            Decision::Granted(grant) => Ok(grant),
            Decision::Denied(reason) => Err(reason),
        }
    }
}

//! # Authorization Attempt Typestate
//!
//! One authorization attempt, with its stage encoded in the type.
//!
//! ```text
//! Submitted ──check_root()──▶ Verifying ──verify()──▶ Consuming ──consume()──▶ Grant
//!     │                           │                       │
//!     └──▶ StaleOrUnknownRoot     └──▶ InvalidProof       └──▶ NullifierReused
//! ```
//!
//! ## Security Invariant
//!
//! `consume()` exists only on `Attempt<Consuming>`, and the only way to
//! obtain one is `Attempt<Verifying>::verify()` returning `Ok`. A proof that
//! was never verified therefore cannot burn a nullifier.
//!
//! ```compile_fail
//! use zkac_access::attempt::Attempt;
//! use zkac_access::AuthorizationRegistry;
//! use zkac_core::{ActionHash, Nullifier, Principal, Root};
//!
//! let registry = AuthorizationRegistry::new(Principal::new("admin"));
//! let attempt = Attempt::submit(
//!     Root::from_bytes([0; 32]),
//!     ActionHash::from_bytes([0; 32]),
//!     Nullifier::from_bytes([0; 32]),
//! );
//! // ERROR: no method named `consume` found for `Attempt<Submitted>`
//! let _ = attempt.consume(&registry);
//! ```
//!
//! Nothing about an attempt persists. Each transition emits a `tracing`
//! event carrying the attempt id.

use std::marker::PhantomData;

use zkac_core::{ActionHash, AttemptId, Nullifier, Proof, PublicInputs, Root};
use zkac_zkp::Verifier;

use crate::decision::{DenialReason, Grant};
use crate::ledger::Consumption;
use crate::registry::{AuthorizationRegistry, RootEpoch};

// ─── Stage Types ────────────────────────────────────────────────────

/// Attempt received, nothing checked.
#[derive(Debug, Clone, Copy)]
pub struct Submitted;

/// Root matched the active epoch; proof not yet checked.
#[derive(Debug, Clone, Copy)]
pub struct Verifying;

/// Proof verified; nullifier not yet consumed.
#[derive(Debug, Clone, Copy)]
pub struct Consuming;

mod private {
    pub trait Sealed {}
    impl Sealed for super::Submitted {}
    impl Sealed for super::Verifying {}
    impl Sealed for super::Consuming {}
}

/// Marker trait for attempt stages.
pub trait AttemptStage: private::Sealed + std::fmt::Debug {
    /// Stage name used in log events.
    fn name() -> &'static str;
}

impl AttemptStage for Submitted {
    fn name() -> &'static str {
        "submitted"
    }
}
impl AttemptStage for Verifying {
    fn name() -> &'static str {
        "verifying"
    }
}
impl AttemptStage for Consuming {
    fn name() -> &'static str {
        "consuming"
    }
}

// ─── Attempt ────────────────────────────────────────────────────────

/// An in-flight authorization attempt at stage `S`.
#[derive(Debug)]
pub struct Attempt<S: AttemptStage> {
    id: AttemptId,
    inputs: PublicInputs,
    epoch: u64,
    _stage: PhantomData<S>,
}

impl<S: AttemptStage> Attempt<S> {
    /// Attempt id, for correlating log events.
    pub fn id(&self) -> AttemptId {
        self.id
    }

    /// The public inputs under evaluation.
    pub fn inputs(&self) -> &PublicInputs {
        &self.inputs
    }

    /// Current stage name.
    pub fn stage(&self) -> &'static str {
        S::name()
    }

    fn advance<T: AttemptStage>(self, epoch: u64) -> Attempt<T> {
        tracing::debug!(attempt = %self.id, from = S::name(), to = T::name(), "attempt advanced");
        Attempt {
            id: self.id,
            inputs: self.inputs,
            epoch,
            _stage: PhantomData,
        }
    }

    fn deny(self, reason: DenialReason) -> DenialReason {
        tracing::info!(
            attempt = %self.id,
            stage = S::name(),
            reason = reason.as_str(),
            nullifier = ?self.inputs.nullifier,
            "attempt denied"
        );
        reason
    }
}

impl Attempt<Submitted> {
    /// Open an attempt for `(root, action_hash, nullifier)`.
    pub fn submit(root: Root, action_hash: ActionHash, nullifier: Nullifier) -> Self {
        let id = AttemptId::new();
        tracing::debug!(attempt = %id, ?root, ?action_hash, ?nullifier, "attempt submitted");
        Self {
            id,
            inputs: PublicInputs::new(root, action_hash, nullifier),
            epoch: 0,
            _stage: PhantomData,
        }
    }

    /// Compare the claimed root with the active epoch.
    pub fn check_root(self, active: Option<RootEpoch>) -> Result<Attempt<Verifying>, DenialReason> {
        match active {
            Some(e) if e.root == self.inputs.root => Ok(self.advance(e.epoch)),
            _ => Err(self.deny(DenialReason::StaleOrUnknownRoot)),
        }
    }
}

impl Attempt<Verifying> {
    /// Run the verifier over the proof and these public inputs.
    pub fn verify(self, verifier: &dyn Verifier, proof: &Proof) -> Result<Attempt<Consuming>, DenialReason> {
        if verifier.verify(proof, &self.inputs) {
            let epoch = self.epoch;
            Ok(self.advance(epoch))
        } else {
            Err(self.deny(DenialReason::InvalidProof))
        }
    }
}

impl Attempt<Consuming> {
    /// Consume the nullifier. The only path to a [`Grant`].
    pub fn consume(self, registry: &AuthorizationRegistry) -> Result<Grant, DenialReason> {
        match registry.consume_under(self.inputs.nullifier, self.epoch) {
            Consumption::Granted(record) => {
                tracing::info!(
                    attempt = %self.id,
                    epoch = record.epoch,
                    nullifier = ?record.nullifier,
                    "attempt granted"
                );
                Ok(Grant::new(self.id, self.inputs.action_hash, record.nullifier, record.epoch))
            }
            Consumption::AlreadyUsed(_) => Err(self.deny(DenialReason::NullifierReused)),
        }
    }
}

//! # Access Mediator
//!
//! The single decision point between an untrusted `(proof, public inputs)`
//! submission and a guarded resource. Checks run in a fixed order and
//! short-circuit:
//!
//! 1. Claimed root equals the active root.
//! 2. The verifier accepts the proof for exactly these public inputs.
//! 3. The nullifier is consumed atomically.
//!
//! The mediator holds no state of its own beyond its verifier and registry
//! and caches nothing.

use std::sync::Arc;

use zkac_core::{ActionHash, Nullifier, Proof, PublicInputs, Root};
use zkac_zkp::{ProofBackend, Verifier};

use crate::attempt::Attempt;
use crate::decision::Decision;
use crate::registry::AuthorizationRegistry;

/// Composes a verifier and a registry into an authorization decision.
#[derive(Debug, Clone)]
pub struct AccessMediator {
    verifier: Arc<dyn Verifier>,
    registry: Arc<AuthorizationRegistry>,
}

impl AccessMediator {
    /// Bind a verifier to a registry.
    pub fn new(verifier: Arc<dyn Verifier>, registry: Arc<AuthorizationRegistry>) -> Self {
        tracing::debug!(backend = %verifier.backend(), "access mediator constructed");
        Self { verifier, registry }
    }

    /// Decide one attempt.
    ///
    /// A `Granted` decision means the nullifier has been consumed by this
    /// call. A `Denied` decision means nothing was mutated.
    pub fn authorize(&self, root: Root, action_hash: ActionHash, nullifier: Nullifier, proof: &Proof) -> Decision {
        let outcome = Attempt::submit(root, action_hash, nullifier)
            .check_root(self.registry.active_epoch())
            .and_then(|a| a.verify(self.verifier.as_ref(), proof))
            .and_then(|a| a.consume(&self.registry));
        match outcome {
            Ok(grant) => Decision::Granted(grant),
            Err(reason) => Decision::Denied(reason),
        }
    }

    /// [`authorize`](Self::authorize) over a bundled triple.
    pub fn authorize_inputs(&self, inputs: &PublicInputs, proof: &Proof) -> Decision {
        self.authorize(inputs.root, inputs.action_hash, inputs.nullifier, proof)
    }

    /// The registry this mediator consumes nullifiers in.
    pub fn registry(&self) -> &Arc<AuthorizationRegistry> {
        &self.registry
    }

    /// Backend of the bound verifier.
    pub fn backend(&self) -> ProofBackend {
        self.verifier.backend()
    }
}

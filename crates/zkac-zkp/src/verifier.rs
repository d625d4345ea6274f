//! # Verifier Construction
//!
//! The backend is fixed when the verifier is built, from a
//! [`VerifierConfig`] and the active [`ProofPolicy`]. The mediator only
//! ever sees an `Arc<dyn Verifier>`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use zkac_core::{CryptoError, Proof, PublicInputs};
use zkac_crypto::Ed25519PublicKey;

use crate::attested::{AttestedCircuitSystem, CircuitVerifyingKey};
use crate::circuit::MEMBERSHIP_CIRCUIT_ID;
use crate::policy::{PolicyError, ProofBackend, ProofPolicy};
use crate::traits::{ProofSystem, Verifier};

/// Wraps a [`ProofSystem`] and its verifying key as a [`Verifier`].
///
/// Malformed proofs and key errors are logged at debug level and treated as
/// invalid; the predicate itself never errors.
#[derive(Debug, Clone)]
pub struct CircuitBackedVerifier<S: ProofSystem> {
    system: S,
    vk: S::VerifyingKey,
}

impl<S: ProofSystem> CircuitBackedVerifier<S> {
    /// Bind a system to a verifying key.
    pub fn new(system: S, vk: S::VerifyingKey) -> Self {
        Self { system, vk }
    }

    /// The verifying key in use.
    pub fn verifying_key(&self) -> &S::VerifyingKey {
        &self.vk
    }
}

impl CircuitBackedVerifier<AttestedCircuitSystem> {
    /// Membership-circuit verifier trusting `attester`.
    pub fn membership(attester: Ed25519PublicKey) -> Self {
        Self::new(AttestedCircuitSystem, CircuitVerifyingKey::membership(attester))
    }
}

impl<S: ProofSystem> Verifier for CircuitBackedVerifier<S> {
    fn verify(&self, proof: &Proof, inputs: &PublicInputs) -> bool {
        if proof.is_empty() {
            return false;
        }
        match self.system.verify(&self.vk, proof, inputs) {
            Ok(valid) => valid,
            Err(e) => {
                tracing::debug!(error = %e, proof_len = proof.len(), "proof rejected before verification");
                false
            }
        }
    }

    fn backend(&self) -> ProofBackend {
        ProofBackend::CircuitBacked
    }
}

/// Which verifier to build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "snake_case")]
pub enum VerifierConfig {
    /// Verify the membership circuit against an attester key.
    CircuitBacked {
        /// Circuit identifier; defaults to the depth-4 membership circuit.
        #[serde(default = "default_circuit_id")]
        circuit_id: String,
        /// Public key of the circuit evaluator.
        attester_public_key: Ed25519PublicKey,
    },
    /// Accept any non-empty proof. Only available in test builds or with
    /// the `permissive` feature.
    #[cfg(any(test, feature = "permissive"))]
    Permissive,
}

fn default_circuit_id() -> String {
    MEMBERSHIP_CIRCUIT_ID.to_string()
}

impl VerifierConfig {
    /// Backend this config selects.
    pub fn backend(&self) -> ProofBackend {
        match self {
            VerifierConfig::CircuitBacked { .. } => ProofBackend::CircuitBacked,
            #[cfg(any(test, feature = "permissive"))]
            VerifierConfig::Permissive => ProofBackend::Permissive,
        }
    }
}

/// Errors building a verifier.
#[derive(Error, Debug)]
pub enum VerifierBuildError {
    /// The policy refuses the selected backend.
    #[error(transparent)]
    Policy(#[from] PolicyError),
    /// The attester key is unusable.
    #[error("attester key: {0}")]
    Key(#[from] CryptoError),
}

/// Build the configured verifier, subject to `policy`.
///
/// # Errors
///
/// [`VerifierBuildError::Policy`] if the policy refuses the backend;
/// [`VerifierBuildError::Key`] if the attester key is not a valid curve
/// point.
pub fn build_verifier(
    config: &VerifierConfig,
    policy: &ProofPolicy,
) -> Result<Arc<dyn Verifier>, VerifierBuildError> {
    let backend = config.backend();
    policy.validate(backend)?;

    match config {
        VerifierConfig::CircuitBacked {
            circuit_id,
            attester_public_key,
        } => {
            attester_public_key.to_verifying_key()?;
            tracing::info!(%backend, circuit_id = %circuit_id, attester = ?attester_public_key, "verifier ready");
            Ok(Arc::new(CircuitBackedVerifier::new(
                AttestedCircuitSystem,
                CircuitVerifyingKey {
                    circuit_id: circuit_id.clone(),
                    attester: attester_public_key.clone(),
                },
            )))
        }
        #[cfg(any(test, feature = "permissive"))]
        VerifierConfig::Permissive => {
            tracing::warn!(%backend, "permissive verifier active: any non-empty proof is accepted");
            Ok(Arc::new(crate::permissive::PermissiveVerifier))
        }
    }
}

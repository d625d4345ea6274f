//! # Verifier Capability and Proof System Trait
//!
//! Two layers:
//!
//! - [`Verifier`] is what the access mediator holds: a pure predicate over
//!   `(proof, public inputs)`. Object-safe so the concrete backend is chosen
//!   at construction from configuration, never by runtime type inspection.
//! - [`ProofSystem`] is the sealed backend interface (keys, prove, verify)
//!   that a circuit-backed verifier wraps.
//!
//! ## Sealed Trait
//!
//! Only backends defined in `zkac-zkp` can implement `ProofSystem`, so no
//! downstream crate can inject an unreviewed proof backend.

use thiserror::Error;

use zkac_core::{Proof, PublicInputs};

use crate::policy::ProofBackend;

/// Error during proof generation.
#[derive(Error, Debug)]
pub enum ProofError {
    /// The witness does not satisfy the circuit.
    #[error("constraint violation: {0}")]
    Unsatisfied(#[from] crate::circuit::ConstraintViolation),
    /// The circuit inputs are invalid or missing.
    #[error("invalid circuit inputs: {0}")]
    InvalidInputs(String),
    /// Proof generation failed internally.
    #[error("proof generation failed: {0}")]
    GenerationFailed(String),
}

/// Error during proof verification.
#[derive(Error, Debug)]
pub enum VerifyError {
    /// The proof encoding is malformed (wrong length, unknown version).
    #[error("malformed proof: {0}")]
    MalformedProof(String),
    /// The verifying key cannot be used.
    #[error("key error: {0}")]
    Key(String),
    /// The statement could not be canonicalized.
    #[error("statement error: {0}")]
    Statement(String),
}

/// A pure proof predicate.
///
/// Implementations must be stateless: the answer for a given
/// `(proof, inputs)` never depends on earlier calls or call order.
pub trait Verifier: Send + Sync + std::fmt::Debug {
    /// Whether `proof` attests to `inputs`.
    fn verify(&self, proof: &Proof, inputs: &PublicInputs) -> bool;

    /// Which backend this verifier runs.
    fn backend(&self) -> ProofBackend;
}

mod private {
    pub trait Sealed {}
}

/// Sealed interface for a proof backend.
pub trait ProofSystem: private::Sealed + Send + Sync + std::fmt::Debug {
    /// Key distributed to verifiers.
    type VerifyingKey: Clone + Send + Sync + std::fmt::Debug;
    /// Key held by the prover.
    type ProvingKey;
    /// Statement plus witness.
    type Circuit;

    /// Produce a proof for a satisfied circuit.
    ///
    /// # Errors
    ///
    /// [`ProofError::Unsatisfied`] if the witness does not satisfy the
    /// circuit; no proof is ever produced for an unsatisfied circuit.
    fn prove(&self, pk: &Self::ProvingKey, circuit: &Self::Circuit) -> Result<Proof, ProofError>;

    /// Check a proof against public inputs.
    ///
    /// `Ok(false)` means well-formed but invalid. `Err` means the proof or
    /// key could not even be interpreted.
    fn verify(
        &self,
        vk: &Self::VerifyingKey,
        proof: &Proof,
        public_inputs: &PublicInputs,
    ) -> Result<bool, VerifyError>;
}

impl private::Sealed for crate::attested::AttestedCircuitSystem {}

//! # zkac-zkp - Proof Verification
//!
//! The verifier capability consumed by the access mediator, and the
//! backends behind it.
//!
//! ## Architecture
//!
//! - **Traits** (`traits.rs`): [`Verifier`] is the object-safe predicate the
//!   mediator holds. [`ProofSystem`] is the sealed backend interface.
//!
//! - **Circuit** (`circuit.rs`): the membership statement. The witness
//!   commitment folds to the root, and the nullifier is bound to secret
//!   and action.
//!
//! - **Attested** (`attested.rs`): [`AttestedCircuitSystem`] evaluates the
//!   circuit and signs the canonical statement; verifiers check the
//!   signature against the evaluator's public key.
//!
//! - **Permissive** (`permissive.rs`, test or `permissive` feature only):
//!   accepts any non-empty proof.
//!
//! - **Policy** (`policy.rs`): production refuses the permissive backend.
//!
//! - **Prover** (`prover.rs`, `prover` feature): membership tree and proof
//!   production, for tests and demos.
//!
//! ## Crate Policy
//!
//! - Depends on `zkac-core` and `zkac-crypto` internally.
//! - The backend is chosen at construction ([`build_verifier`]), never
//!   inspected at run time.

pub mod attested;
pub mod circuit;
#[cfg(any(test, feature = "permissive"))]
pub mod permissive;
pub mod policy;
#[cfg(feature = "prover")]
pub mod prover;
pub mod traits;
pub mod verifier;

pub use attested::{AttestedCircuitSystem, CircuitProvingKey, CircuitVerifyingKey};
pub use circuit::{derive_nullifier, identity_commitment, MemberSecret, MembershipCircuit, MEMBERSHIP_CIRCUIT_ID};
#[cfg(any(test, feature = "permissive"))]
pub use permissive::PermissiveVerifier;
pub use policy::{PolicyMode, ProofBackend, ProofPolicy};
#[cfg(feature = "prover")]
pub use prover::{MembershipProver, MembershipTree};
pub use traits::{ProofError, ProofSystem, Verifier, VerifyError};
pub use verifier::{build_verifier, CircuitBackedVerifier, VerifierBuildError, VerifierConfig};

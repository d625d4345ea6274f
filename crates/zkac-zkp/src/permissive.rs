//! # Permissive Verifier
//!
//! Accepts every non-empty proof regardless of the public inputs. It exists
//! so the registry, mediator and treasury can be exercised without a prover.
//!
//! ## Security Notice
//!
//! This verifier has no soundness. It is compiled only for tests or under
//! the `permissive` feature, and [`ProofPolicy::production`] refuses to
//! build it even then.
//!
//! [`ProofPolicy::production`]: crate::policy::ProofPolicy::production

use zkac_core::{Proof, PublicInputs};

use crate::policy::ProofBackend;
use crate::traits::Verifier;

/// Test double: `verify` is `!proof.is_empty()`.
#[derive(Debug, Default, Clone, Copy)]
pub struct PermissiveVerifier;

impl Verifier for PermissiveVerifier {
    fn verify(&self, proof: &Proof, _inputs: &PublicInputs) -> bool {
        !proof.is_empty()
    }

    fn backend(&self) -> ProofBackend {
        ProofBackend::Permissive
    }
}

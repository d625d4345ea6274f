//! # Attested Circuit Proof System
//!
//! The circuit-backed backend. A trusted circuit evaluator (the holder of
//! the proving key) evaluates [`MembershipCircuit`] in full and, only when
//! every constraint holds, signs the canonical public statement. Verifiers
//! hold the matching public key and learn nothing about the witness.
//!
//! ## Proof Encoding
//!
//! ```text
//! [version: 1 byte = 0x01][ed25519 signature over statement: 64 bytes]
//! ```
//!
//! The statement is the JCS canonical form of
//! `{circuit_id, root, action_hash, nullifier}`. Any other length or
//! version byte is malformed.

use zkac_core::{Proof, PublicInputs};
use zkac_crypto::ed25519::verify_with_public_key;
use zkac_crypto::{Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature};

use crate::circuit::{MembershipCircuit, MEMBERSHIP_CIRCUIT_ID};
use crate::traits::{ProofError, ProofSystem, VerifyError};

/// Current proof encoding version.
pub const PROOF_VERSION: u8 = 0x01;
/// Encoded proof length: version byte plus signature.
pub const PROOF_LEN: usize = 1 + 64;

/// Verifier-side key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CircuitVerifyingKey {
    /// Circuit the key verifies.
    pub circuit_id: String,
    /// Public half of the evaluator's key.
    pub attester: Ed25519PublicKey,
}

impl CircuitVerifyingKey {
    /// Key for the membership circuit.
    pub fn membership(attester: Ed25519PublicKey) -> Self {
        Self {
            circuit_id: MEMBERSHIP_CIRCUIT_ID.to_string(),
            attester,
        }
    }
}

/// Prover-side key.
#[derive(Debug)]
pub struct CircuitProvingKey {
    circuit_id: String,
    signer: Ed25519KeyPair,
}

impl CircuitProvingKey {
    /// Proving key for the membership circuit.
    pub fn membership(signer: Ed25519KeyPair) -> Self {
        Self {
            circuit_id: MEMBERSHIP_CIRCUIT_ID.to_string(),
            signer,
        }
    }

    /// The matching verifying key.
    pub fn verifying_key(&self) -> CircuitVerifyingKey {
        CircuitVerifyingKey {
            circuit_id: self.circuit_id.clone(),
            attester: self.signer.public_key(),
        }
    }
}

/// Circuit-backed proof system.
#[derive(Debug, Default, Clone, Copy)]
pub struct AttestedCircuitSystem;

impl AttestedCircuitSystem {
    /// Split an encoded proof into its signature.
    fn decode(proof: &Proof) -> Result<Ed25519Signature, VerifyError> {
        let bytes = proof.as_bytes();
        if bytes.len() != PROOF_LEN {
            return Err(VerifyError::MalformedProof(format!(
                "expected {PROOF_LEN} bytes, got {}",
                bytes.len()
            )));
        }
        if bytes[0] != PROOF_VERSION {
            return Err(VerifyError::MalformedProof(format!(
                "unsupported proof version 0x{:02x}",
                bytes[0]
            )));
        }
        Ed25519Signature::from_slice(&bytes[1..]).map_err(|e| VerifyError::MalformedProof(e.to_string()))
    }
}

impl ProofSystem for AttestedCircuitSystem {
    type VerifyingKey = CircuitVerifyingKey;
    type ProvingKey = CircuitProvingKey;
    type Circuit = MembershipCircuit;

    fn prove(&self, pk: &CircuitProvingKey, circuit: &MembershipCircuit) -> Result<Proof, ProofError> {
        circuit.check_constraints()?;
        let statement = circuit
            .public_inputs()
            .canonical_statement(&pk.circuit_id)
            .map_err(|e| ProofError::GenerationFailed(e.to_string()))?;
        let signature = pk.signer.sign(&statement);

        let mut bytes = Vec::with_capacity(PROOF_LEN);
        bytes.push(PROOF_VERSION);
        bytes.extend_from_slice(signature.as_bytes());
        Ok(Proof::new(bytes))
    }

    fn verify(
        &self,
        vk: &CircuitVerifyingKey,
        proof: &Proof,
        public_inputs: &PublicInputs,
    ) -> Result<bool, VerifyError> {
        let signature = Self::decode(proof)?;
        let statement = public_inputs
            .canonical_statement(&vk.circuit_id)
            .map_err(|e| VerifyError::Statement(e.to_string()))?;
        Ok(verify_with_public_key(&statement, &signature, &vk.attester).is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::{derive_nullifier, identity_commitment, MemberSecret};
    use zkac_core::{ActionHash, Root};
    use zkac_crypto::{power_of_two_path, MEMBERSHIP_TREE_DEPTH};

    struct Fixture {
        pk: CircuitProvingKey,
        circuit: MembershipCircuit,
    }

    fn fixture() -> Fixture {
        let secret = MemberSecret::from_bytes([3; 32]);
        let mut leaves = vec![[0u8; 32]; 1 << MEMBERSHIP_TREE_DEPTH];
        leaves[6] = identity_commitment(&secret);
        let (root, path) = power_of_two_path(&leaves, 6).unwrap();
        let action = ActionHash::from_bytes([0x42; 32]);
        let public = PublicInputs::new(root, action, derive_nullifier(&secret, &action));
        Fixture {
            pk: CircuitProvingKey::membership(Ed25519KeyPair::from_seed(&[9; 32])),
            circuit: MembershipCircuit::new(public, secret, path),
        }
    }

    #[test]
    fn honest_proof_verifies() {
        let f = fixture();
        let proof = AttestedCircuitSystem.prove(&f.pk, &f.circuit).unwrap();
        assert_eq!(proof.len(), PROOF_LEN);
        assert!(AttestedCircuitSystem
            .verify(&f.pk.verifying_key(), &proof, f.circuit.public_inputs())
            .unwrap());
    }

    #[test]
    fn unsatisfied_circuit_yields_no_proof() {
        let f = fixture();
        let mut public = *f.circuit.public_inputs();
        public.root = Root::from_bytes([0; 32]);
        let bad = MembershipCircuit::new(public, MemberSecret::from_bytes([3; 32]), Default::default());
        assert!(matches!(
            AttestedCircuitSystem.prove(&f.pk, &bad),
            Err(ProofError::Unsatisfied(_))
        ));
    }

    #[test]
    fn altered_public_input_fails() {
        let f = fixture();
        let proof = AttestedCircuitSystem.prove(&f.pk, &f.circuit).unwrap();
        let mut public = *f.circuit.public_inputs();
        public.action_hash = ActionHash::from_bytes([0x43; 32]);
        assert!(!AttestedCircuitSystem
            .verify(&f.pk.verifying_key(), &proof, &public)
            .unwrap());
    }

    #[test]
    fn other_attester_fails() {
        let f = fixture();
        let proof = AttestedCircuitSystem.prove(&f.pk, &f.circuit).unwrap();
        let stranger = CircuitVerifyingKey::membership(Ed25519KeyPair::from_seed(&[8; 32]).public_key());
        assert!(!AttestedCircuitSystem
            .verify(&stranger, &proof, f.circuit.public_inputs())
            .unwrap());
    }

    #[test]
    fn other_circuit_id_fails() {
        let f = fixture();
        let proof = AttestedCircuitSystem.prove(&f.pk, &f.circuit).unwrap();
        let mut vk = f.pk.verifying_key();
        vk.circuit_id = "zkac.membership.depth8.v1".to_string();
        assert!(!AttestedCircuitSystem
            .verify(&vk, &proof, f.circuit.public_inputs())
            .unwrap());
    }

    #[test]
    fn truncated_proof_is_malformed() {
        let f = fixture();
        let proof = AttestedCircuitSystem.prove(&f.pk, &f.circuit).unwrap();
        let short = Proof::new(proof.as_bytes()[..PROOF_LEN - 1].to_vec());
        assert!(matches!(
            AttestedCircuitSystem.verify(&f.pk.verifying_key(), &short, f.circuit.public_inputs()),
            Err(VerifyError::MalformedProof(_))
        ));
    }

    #[test]
    fn unknown_version_is_malformed() {
        let f = fixture();
        let mut bytes = AttestedCircuitSystem
            .prove(&f.pk, &f.circuit)
            .unwrap()
            .as_bytes()
            .to_vec();
        bytes[0] = 0x02;
        assert!(matches!(
            AttestedCircuitSystem.verify(&f.pk.verifying_key(), &Proof::new(bytes), f.circuit.public_inputs()),
            Err(VerifyError::MalformedProof(_))
        ));
    }
}

//! # Membership Prover
//!
//! Off-chain proof production. Not part of the verification path; exposed
//! behind the `prover` feature for tests and the CLI demo.
//!
//! [`MembershipTree`] is the administrator's view of the authorized set:
//! a fixed-capacity list of identity commitments, zero-padded to
//! `2^MEMBERSHIP_TREE_DEPTH` leaves. [`MembershipProver`] evaluates the
//! circuit for a member and emits `(proof, public inputs)`.

use zkac_core::{ActionHash, Proof, PublicInputs, Root};
use zkac_crypto::{power_of_two_path, MerklePath, MEMBERSHIP_TREE_DEPTH};

use crate::attested::{AttestedCircuitSystem, CircuitProvingKey, CircuitVerifyingKey};
use crate::circuit::{derive_nullifier, identity_commitment, MemberSecret, MembershipCircuit};
use crate::traits::{ProofError, ProofSystem};

/// Number of leaves the circuit can address.
pub const TREE_CAPACITY: usize = 1 << MEMBERSHIP_TREE_DEPTH;

/// The authorized set as a fixed-depth tree of identity commitments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembershipTree {
    leaves: Vec<[u8; 32]>,
    members: usize,
}

impl MembershipTree {
    /// Tree over the commitments of `secrets`, in order.
    pub fn from_secrets<'a>(secrets: impl IntoIterator<Item = &'a MemberSecret>) -> Result<Self, ProofError> {
        let commitments: Vec<[u8; 32]> = secrets.into_iter().map(identity_commitment).collect();
        Self::from_commitments(&commitments)
    }

    /// Tree over published commitments.
    pub fn from_commitments(commitments: &[[u8; 32]]) -> Result<Self, ProofError> {
        if commitments.len() > TREE_CAPACITY {
            return Err(ProofError::InvalidInputs(format!(
                "{} members exceed tree capacity {TREE_CAPACITY}",
                commitments.len()
            )));
        }
        let mut leaves = commitments.to_vec();
        leaves.resize(TREE_CAPACITY, [0u8; 32]);
        Ok(Self {
            leaves,
            members: commitments.len(),
        })
    }

    /// Number of real members (excluding padding).
    pub fn len(&self) -> usize {
        self.members
    }

    /// Whether the set has no members.
    pub fn is_empty(&self) -> bool {
        self.members == 0
    }

    /// Root of the tree.
    pub fn root(&self) -> Result<Root, ProofError> {
        self.path(0).map(|(root, _)| root)
    }

    /// Leaf position of `secret`'s commitment among the real members.
    pub fn position(&self, secret: &MemberSecret) -> Option<usize> {
        let leaf = identity_commitment(secret);
        self.leaves[..self.members].iter().position(|l| *l == leaf)
    }

    /// Root and sibling path for leaf `index`.
    pub fn path(&self, index: usize) -> Result<(Root, MerklePath), ProofError> {
        power_of_two_path(&self.leaves, index).map_err(|e| ProofError::InvalidInputs(e.to_string()))
    }
}

/// Produces membership proofs with the evaluator's proving key.
#[derive(Debug)]
pub struct MembershipProver {
    pk: CircuitProvingKey,
}

impl MembershipProver {
    /// Wrap a proving key.
    pub fn new(pk: CircuitProvingKey) -> Self {
        Self { pk }
    }

    /// Key verifiers should trust.
    pub fn verifying_key(&self) -> CircuitVerifyingKey {
        self.pk.verifying_key()
    }

    /// Prove that `secret` sits at the end of `path` under `root` and bind
    /// the proof to `action_hash`.
    ///
    /// # Errors
    ///
    /// [`ProofError::Unsatisfied`] if the secret is not a member under
    /// `root`. No proof is produced in that case.
    pub fn prove(
        &self,
        secret: &MemberSecret,
        path: &MerklePath,
        root: Root,
        action_hash: ActionHash,
    ) -> Result<(Proof, PublicInputs), ProofError> {
        let public = PublicInputs::new(root, action_hash, derive_nullifier(secret, &action_hash));
        let circuit = MembershipCircuit::new(public, secret.clone(), path.clone());
        let proof = AttestedCircuitSystem.prove(&self.pk, &circuit)?;
        Ok((proof, public))
    }

    /// Look the member up in `tree` and prove.
    pub fn prove_in(
        &self,
        tree: &MembershipTree,
        secret: &MemberSecret,
        action_hash: ActionHash,
    ) -> Result<(Proof, PublicInputs), ProofError> {
        let index = tree
            .position(secret)
            .ok_or_else(|| ProofError::InvalidInputs("secret is not in the membership tree".to_string()))?;
        let (root, path) = tree.path(index)?;
        self.prove(secret, &path, root, action_hash)
    }
}

//! # Membership Circuit
//!
//! The statement a member proves:
//!
//! 1. `identity_commitment(secret)` folds up `path` to `root`
//!    (the member is in the authorized set).
//! 2. `nullifier == H("zkac.nullifier.v1", secret, action_hash)`
//!    (the nullifier is bound to this member and this action).
//!
//! `root`, `action_hash` and `nullifier` are public. `secret` and `path`
//! are the witness and never leave the prover.

use rand::RngCore;
use thiserror::Error;

use zkac_core::digest::{sha256_parts, COMMITMENT_TAG, NULLIFIER_TAG};
use zkac_core::{hex, ActionHash, EncodingError, Nullifier, PublicInputs};
use zkac_crypto::{MerklePath, MEMBERSHIP_TREE_DEPTH};

/// Identifier of the depth-4 membership circuit. Signed into every
/// statement so a proof for one circuit cannot be replayed against another.
pub const MEMBERSHIP_CIRCUIT_ID: &str = "zkac.membership.depth4.v1";

/// A member's private secret.
#[derive(Clone, PartialEq, Eq)]
pub struct MemberSecret([u8; 32]);

impl MemberSecret {
    /// Wrap raw secret bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Fresh random secret from the OS RNG.
    pub fn generate() -> Self {
        let mut bytes = [0u8; 32];
        rand::rngs::OsRng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Parse exactly 64 hex chars.
    pub fn from_hex(s: &str) -> Result<Self, EncodingError> {
        hex::decode_fixed::<32>("member secret", s).map(Self)
    }

    /// Lowercase hex. Only for writing to the member's own key file.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Raw bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl std::fmt::Debug for MemberSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("MemberSecret(<private>)")
    }
}

/// The leaf a member occupies in the authorized-set tree.
pub fn identity_commitment(secret: &MemberSecret) -> [u8; 32] {
    sha256_parts(COMMITMENT_TAG, &[secret.as_bytes().as_slice()])
}

/// The nullifier for `secret` acting on `action_hash`.
///
/// Deterministic, so the same member performing the same action always
/// produces the same nullifier and a second attempt is recognizable.
pub fn derive_nullifier(secret: &MemberSecret, action_hash: &ActionHash) -> Nullifier {
    Nullifier::from_bytes(sha256_parts(
        NULLIFIER_TAG,
        &[secret.as_bytes().as_slice(), action_hash.as_bytes().as_slice()],
    ))
}

/// Why a witness fails to satisfy the circuit.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConstraintViolation {
    /// The path has the wrong number of levels.
    #[error("merkle path depth must be {expected}, got {actual}")]
    DepthMismatch {
        /// Circuit depth.
        expected: usize,
        /// Supplied depth.
        actual: usize,
    },
    /// The commitment does not fold to the public root.
    #[error("membership path does not fold to the public root")]
    RootMismatch,
    /// The public nullifier is not derived from this secret and action.
    #[error("nullifier is not bound to the witness secret and action")]
    NullifierMismatch,
}

/// Public statement plus private witness.
#[derive(Debug, Clone)]
pub struct MembershipCircuit {
    public: PublicInputs,
    secret: MemberSecret,
    path: MerklePath,
}

impl MembershipCircuit {
    /// Assemble a circuit instance. Nothing is checked until
    /// [`check_constraints`](Self::check_constraints).
    pub fn new(public: PublicInputs, secret: MemberSecret, path: MerklePath) -> Self {
        Self {
            public,
            secret,
            path,
        }
    }

    /// The public half.
    pub fn public_inputs(&self) -> &PublicInputs {
        &self.public
    }

    /// Evaluate every constraint against the witness.
    pub fn check_constraints(&self) -> Result<(), ConstraintViolation> {
        if self.path.depth() != MEMBERSHIP_TREE_DEPTH {
            return Err(ConstraintViolation::DepthMismatch {
                expected: MEMBERSHIP_TREE_DEPTH,
                actual: self.path.depth(),
            });
        }
        if self.path.fold(&identity_commitment(&self.secret)) != self.public.root {
            return Err(ConstraintViolation::RootMismatch);
        }
        if derive_nullifier(&self.secret, &self.public.action_hash) != self.public.nullifier {
            return Err(ConstraintViolation::NullifierMismatch);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zkac_core::Root;
    use zkac_crypto::power_of_two_path;

    fn tree(secrets: &[MemberSecret]) -> Vec<[u8; 32]> {
        let mut leaves: Vec<[u8; 32]> = secrets.iter().map(identity_commitment).collect();
        leaves.resize(1 << MEMBERSHIP_TREE_DEPTH, [0u8; 32]);
        leaves
    }

    fn satisfied() -> (MembershipCircuit, Vec<MemberSecret>) {
        let secrets: Vec<_> = (1..=3u8).map(|i| MemberSecret::from_bytes([i; 32])).collect();
        let (root, path) = power_of_two_path(&tree(&secrets), 1).unwrap();
        let action = ActionHash::from_bytes([0xAA; 32]);
        let public = PublicInputs::new(root, action, derive_nullifier(&secrets[1], &action));
        (MembershipCircuit::new(public, secrets[1].clone(), path), secrets)
    }

    #[test]
    fn honest_witness_satisfies() {
        let (circuit, _) = satisfied();
        assert_eq!(circuit.check_constraints(), Ok(()));
    }

    #[test]
    fn wrong_root_is_rejected() {
        let (circuit, _) = satisfied();
        let mut public = *circuit.public_inputs();
        public.root = Root::from_bytes([0x11; 32]);
        let c = MembershipCircuit::new(public, circuit.secret.clone(), circuit.path.clone());
        assert_eq!(c.check_constraints(), Err(ConstraintViolation::RootMismatch));
    }

    #[test]
    fn non_member_secret_is_rejected() {
        let (circuit, _) = satisfied();
        let outsider = MemberSecret::from_bytes([0x99; 32]);
        let mut public = *circuit.public_inputs();
        public.nullifier = derive_nullifier(&outsider, &public.action_hash);
        let c = MembershipCircuit::new(public, outsider, circuit.path.clone());
        assert_eq!(c.check_constraints(), Err(ConstraintViolation::RootMismatch));
    }

    #[test]
    fn foreign_nullifier_is_rejected() {
        let (circuit, secrets) = satisfied();
        let mut public = *circuit.public_inputs();
        public.nullifier = derive_nullifier(&secrets[0], &public.action_hash);
        let c = MembershipCircuit::new(public, circuit.secret.clone(), circuit.path.clone());
        assert_eq!(c.check_constraints(), Err(ConstraintViolation::NullifierMismatch));
    }

    #[test]
    fn short_path_is_rejected() {
        let (circuit, _) = satisfied();
        let mut path = circuit.path.clone();
        path.steps.pop();
        let c = MembershipCircuit::new(*circuit.public_inputs(), circuit.secret.clone(), path);
        assert_eq!(
            c.check_constraints(),
            Err(ConstraintViolation::DepthMismatch {
                expected: MEMBERSHIP_TREE_DEPTH,
                actual: MEMBERSHIP_TREE_DEPTH - 1
            })
        );
    }

    #[test]
    fn nullifier_is_deterministic_and_action_bound() {
        let s = MemberSecret::from_bytes([5; 32]);
        let a = ActionHash::from_bytes([1; 32]);
        let b = ActionHash::from_bytes([2; 32]);
        assert_eq!(derive_nullifier(&s, &a), derive_nullifier(&s, &a));
        assert_ne!(derive_nullifier(&s, &a), derive_nullifier(&s, &b));
    }

    #[test]
    fn secret_debug_is_redacted() {
        let s = MemberSecret::from_bytes([5; 32]);
        assert_eq!(format!("{s:?}"), "MemberSecret(<private>)");
        assert_eq!(MemberSecret::from_hex(&s.to_hex()).unwrap(), s);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn nullifier_differs_across_actions(
            secret in any::<[u8; 32]>(),
            a in any::<[u8; 32]>(),
            b in any::<[u8; 32]>(),
        ) {
            prop_assume!(a != b);
            let secret = MemberSecret::from_bytes(secret);
            prop_assert_ne!(
                derive_nullifier(&secret, &ActionHash::from_bytes(a)),
                derive_nullifier(&secret, &ActionHash::from_bytes(b))
            );
        }

        #[test]
        fn nullifier_differs_across_members(
            s1 in any::<[u8; 32]>(),
            s2 in any::<[u8; 32]>(),
            action in any::<[u8; 32]>(),
        ) {
            prop_assume!(s1 != s2);
            let action = ActionHash::from_bytes(action);
            prop_assert_ne!(
                derive_nullifier(&MemberSecret::from_bytes(s1), &action),
                derive_nullifier(&MemberSecret::from_bytes(s2), &action)
            );
        }
    }
}

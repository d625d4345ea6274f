//! # Root Rotation and Persistence
//!
//! Epochs are independent: rotating the root denies proofs made under the
//! old root and never releases a consumed nullifier. A snapshot carries the
//! consumed set through a restart.

use std::sync::Arc;

use zkac_access::{AccessError, AccessMediator, AuthorizationRegistry, DenialReason};
use zkac_core::{ActionDescriptor, Principal};
use zkac_crypto::Ed25519KeyPair;
use zkac_zkp::{CircuitBackedVerifier, CircuitProvingKey, MemberSecret, MembershipProver, MembershipTree};

fn admin() -> Principal {
    Principal::new("admin")
}

struct Setup {
    prover: MembershipProver,
    verifier: CircuitBackedVerifier<zkac_zkp::AttestedCircuitSystem>,
    members: Vec<MemberSecret>,
}

fn setup() -> Setup {
    let attester = Ed25519KeyPair::from_seed(&[0x31; 32]);
    Setup {
        verifier: CircuitBackedVerifier::membership(attester.public_key()),
        prover: MembershipProver::new(CircuitProvingKey::membership(attester)),
        members: (1..=4u8).map(|i| MemberSecret::from_bytes([i; 32])).collect(),
    }
}

#[test]
fn rotation_denies_old_root_and_keeps_nullifiers() {
    let s = setup();
    let action = ActionDescriptor::new("treasury", "withdraw", 100).action_hash().unwrap();

    let old_tree = MembershipTree::from_secrets(&s.members[..2]).unwrap();
    let new_tree = MembershipTree::from_secrets(&s.members).unwrap();

    let registry = Arc::new(AuthorizationRegistry::new(admin()));
    let mediator = AccessMediator::new(Arc::new(s.verifier.clone()), Arc::clone(&registry));
    assert_eq!(registry.set_root(&admin(), old_tree.root().unwrap()).unwrap().epoch, 1);

    let (spent_proof, spent) = s.prover.prove_in(&old_tree, &s.members[0], action).unwrap();
    assert!(mediator.authorize_inputs(&spent, &spent_proof).is_granted());
    let (unspent_proof, unspent) = s.prover.prove_in(&old_tree, &s.members[1], action).unwrap();

    assert_eq!(registry.set_root(&admin(), new_tree.root().unwrap()).unwrap().epoch, 2);

    // Old-root proof that was never used: stale now.
    assert_eq!(
        mediator.authorize_inputs(&unspent, &unspent_proof).denial(),
        Some(DenialReason::StaleOrUnknownRoot)
    );

    // Same member re-proving under the new root derives the same nullifier,
    // which stays consumed from epoch 1.
    let (reproof, reinputs) = s.prover.prove_in(&new_tree, &s.members[0], action).unwrap();
    assert_eq!(reinputs.nullifier, spent.nullifier);
    assert_eq!(
        mediator.authorize_inputs(&reinputs, &reproof).denial(),
        Some(DenialReason::NullifierReused)
    );
    assert_eq!(registry.consumed_record(&spent.nullifier).unwrap().epoch, 1);

    // A member added in the new epoch proceeds.
    let (fresh_proof, fresh) = s.prover.prove_in(&new_tree, &s.members[3], action).unwrap();
    let grant = mediator.authorize_inputs(&fresh, &fresh_proof).into_result().unwrap();
    assert_eq!(grant.epoch(), 2);
}

#[test]
fn non_admin_cannot_rotate() {
    let registry = AuthorizationRegistry::new(admin());
    let err = registry
        .set_root(&Principal::new("member"), zkac_core::Root::from_bytes([1; 32]))
        .unwrap_err();
    assert_eq!(
        err,
        AccessError::AdministrativeUnauthorized {
            caller: Principal::new("member")
        }
    );
    assert_eq!(registry.active_root(), None);
}

#[test]
fn snapshot_survives_restart() {
    let s = setup();
    let tree = MembershipTree::from_secrets(&s.members).unwrap();
    let action = ActionDescriptor::new("treasury", "withdraw", 250).action_hash().unwrap();

    let registry = Arc::new(AuthorizationRegistry::new(admin()));
    registry.set_root(&admin(), tree.root().unwrap()).unwrap();
    let mediator = AccessMediator::new(Arc::new(s.verifier.clone()), Arc::clone(&registry));
    let (proof, inputs) = s.prover.prove_in(&tree, &s.members[2], action).unwrap();
    assert!(mediator.authorize_inputs(&inputs, &proof).is_granted());

    let persisted = serde_json::to_vec(&registry.snapshot()).unwrap();
    drop(mediator);
    drop(registry);

    let restored = Arc::new(AuthorizationRegistry::restore(serde_json::from_slice(&persisted).unwrap()).unwrap());
    let mediator = AccessMediator::new(Arc::new(s.verifier.clone()), Arc::clone(&restored));
    assert_eq!(restored.active_root(), Some(tree.root().unwrap()));
    assert_eq!(
        mediator.authorize_inputs(&inputs, &proof).denial(),
        Some(DenialReason::NullifierReused)
    );
}

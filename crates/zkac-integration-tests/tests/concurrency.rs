//! # Concurrency
//!
//! Racing submissions through the real mediator and treasury.

use std::sync::Arc;

use zkac_access::{AccessMediator, AuthorizationRegistry, DenialReason};
use zkac_core::{Nullifier, Principal, Proof};
use zkac_crypto::Ed25519KeyPair;
use zkac_treasury::{ProtectedTreasury, TreasuryError};
use zkac_zkp::{
    CircuitBackedVerifier, CircuitProvingKey, MemberSecret, MembershipProver, MembershipTree, PermissiveVerifier,
};

const RACERS: usize = 24;

#[test]
fn racing_check_and_consume_grants_exactly_once() {
    let registry = Arc::new(AuthorizationRegistry::new(Principal::new("admin")));
    let n = Nullifier::from_bytes([0x42; 32]);
    let grants = std::thread::scope(|s| {
        let handles: Vec<_> = (0..RACERS)
            .map(|_| {
                let registry = Arc::clone(&registry);
                s.spawn(move || registry.check_and_consume(n).is_granted())
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).filter(|g| *g).count()
    });
    assert_eq!(grants, 1);
    assert_eq!(registry.consumed_count(), 1);
}

#[test]
fn racing_replays_of_one_proof_debit_once() {
    let attester = Ed25519KeyPair::from_seed(&[3; 32]);
    let verifier = CircuitBackedVerifier::membership(attester.public_key());
    let prover = MembershipProver::new(CircuitProvingKey::membership(attester));
    let member = MemberSecret::from_bytes([9; 32]);
    let tree = MembershipTree::from_secrets([&member]).unwrap();

    let owner = Principal::new("owner");
    let registry = Arc::new(AuthorizationRegistry::new(owner.clone()));
    let treasury = ProtectedTreasury::new(
        "treasury",
        owner.clone(),
        AccessMediator::new(Arc::new(verifier), registry),
        10_000,
    );
    treasury.setup_role_root(&owner, tree.root().unwrap()).unwrap();

    let action = treasury.withdrawal_action(500).action_hash().unwrap();
    let (proof, inputs) = prover.prove_in(&tree, &member, action).unwrap();

    let treasury = &treasury;
    let (proof, inputs) = (&proof, &inputs);
    let outcomes: Vec<_> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..RACERS)
            .map(|_| s.spawn(move || treasury.withdraw(500, proof, inputs)))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(outcomes.iter().filter(|o| o.is_ok()).count(), 1);
    assert!(outcomes
        .iter()
        .filter_map(|o| o.as_ref().err())
        .all(|e| matches!(e, TreasuryError::Denied(DenialReason::NullifierReused))));
    assert_eq!(treasury.balance(), 9_500);
}

#[test]
fn distinct_nullifiers_all_succeed_in_parallel() {
    let owner = Principal::new("owner");
    let registry = Arc::new(AuthorizationRegistry::new(owner.clone()));
    let root = zkac_core::Root::from_bytes([1; 32]);
    registry.set_root(&owner, root).unwrap();
    let mediator = AccessMediator::new(Arc::new(PermissiveVerifier), Arc::clone(&registry));
    let action = zkac_core::ActionHash::from_bytes([2; 32]);

    let mediator = &mediator;
    let granted = std::thread::scope(|s| {
        let handles: Vec<_> = (0..=255u8)
            .map(|b| {
                s.spawn(move || {
                    mediator
                        .authorize(root, action, Nullifier::from_bytes([b; 32]), &Proof::new(vec![1]))
                        .is_granted()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).filter(|g| *g).count()
    });
    assert_eq!(granted, 256);
    assert_eq!(registry.consumed_count(), 256);
}

//! # Demo Subcommand
//!
//! Runs the treasury scenario end to end with ephemeral keys:
//!
//! 1. Two members join; the owner registers the membership root.
//! 2. Member A withdraws 500 with a fresh proof.
//! 3. Member A replays the same proof and is refused.
//! 4. Member B withdraws 500 with its own proof.
//!
//! The verifier is always circuit-backed, so the demo passes under the
//! production policy.

use std::sync::Arc;

use anyhow::{bail, Result};
use clap::Args;

use zkac_access::{AccessMediator, AuthorizationRegistry, DenialReason};
use zkac_core::Principal;
use zkac_crypto::Ed25519KeyPair;
use zkac_treasury::{ProtectedTreasury, TreasuryError};
use zkac_zkp::{
    build_verifier, CircuitProvingKey, MemberSecret, MembershipProver, MembershipTree, VerifierConfig,
    MEMBERSHIP_CIRCUIT_ID,
};

use crate::config::ZkacConfig;

/// Arguments for `zkac demo`.
#[derive(Args, Debug)]
pub struct DemoArgs {
    /// Amount each member withdraws.
    #[arg(long, default_value_t = 500)]
    pub amount: u64,
}

/// What the scenario observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoReport {
    /// Balance before any withdrawal.
    pub opening: u64,
    /// Balance after member A's withdrawal.
    pub after_first: u64,
    /// Why the replay was refused.
    pub replay: DenialReason,
    /// Balance after member B's withdrawal.
    pub after_second: u64,
}

/// Run the scenario and print each step.
pub fn run_demo(args: &DemoArgs, config: &ZkacConfig) -> Result<u8> {
    let report = scenario(args.amount, config)?;
    println!("opening balance:        {}", report.opening);
    println!("member A withdraws {}: {}", args.amount, report.after_first);
    println!("member A replays:       denied ({})", report.replay);
    println!("member B withdraws {}: {}", args.amount, report.after_second);
    Ok(0)
}

/// The scenario itself.
pub fn scenario(amount: u64, config: &ZkacConfig) -> Result<DemoReport> {
    let attester = Ed25519KeyPair::generate();
    let verifier = build_verifier(
        &VerifierConfig::CircuitBacked {
            circuit_id: MEMBERSHIP_CIRCUIT_ID.to_string(),
            attester_public_key: attester.public_key(),
        },
        &config.proof_policy()?,
    )?;
    let prover = MembershipProver::new(CircuitProvingKey::membership(attester));

    let alice = MemberSecret::generate();
    let bob = MemberSecret::generate();
    let tree = MembershipTree::from_secrets([&alice, &bob])?;

    let owner = Principal::new(config.treasury.owner.clone());
    let registry = Arc::new(AuthorizationRegistry::new(owner.clone()));
    let treasury = ProtectedTreasury::new(
        config.treasury.scope.clone(),
        owner.clone(),
        AccessMediator::new(verifier, registry),
        config.treasury.initial_balance,
    );
    treasury.setup_role_root(&owner, tree.root()?)?;
    let opening = treasury.balance();

    let action_hash = treasury.withdrawal_action(amount).action_hash()?;

    let (proof_a, inputs_a) = prover.prove_in(&tree, &alice, action_hash)?;
    let after_first = treasury.withdraw(amount, &proof_a, &inputs_a)?.balance_after;

    let replay = match treasury.withdraw(amount, &proof_a, &inputs_a) {
        Err(TreasuryError::Denied(reason)) => reason,
        Ok(_) => bail!("replayed proof was accepted"),
        Err(e) => return Err(e.into()),
    };

    let (proof_b, inputs_b) = prover.prove_in(&tree, &bob, action_hash)?;
    let after_second = treasury.withdraw(amount, &proof_b, &inputs_b)?.balance_after;

    Ok(DemoReport {
        opening,
        after_first,
        replay,
        after_second,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_matches_expected_balances() {
        let report = scenario(500, &ZkacConfig::default()).unwrap();
        assert_eq!(
            report,
            DemoReport {
                opening: 10_000,
                after_first: 9_500,
                replay: DenialReason::NullifierReused,
                after_second: 9_000,
            }
        );
    }

    #[test]
    fn overdraw_surfaces_insufficient_funds() {
        let err = scenario(20_000, &ZkacConfig::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TreasuryError>(),
            Some(TreasuryError::InsufficientFunds { .. })
        ));
    }
}

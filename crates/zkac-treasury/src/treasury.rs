//! # Protected Treasury
//!
//! A balance guarded by the access mediator. The treasury never trusts the
//! caller's claimed action hash: it derives the hash from its own scope,
//! the `withdraw` operation and the requested amount, and asks the mediator
//! to authorize exactly that. A proof made for a different amount or a
//! different treasury is denied as an invalid proof.
//!
//! ## Ordering
//!
//! The balance lock is held across authorize and debit, so concurrent
//! withdrawals from one treasury are serialized as whole units.
//!
//! ## Burned Nullifiers
//!
//! If authorization succeeds but the balance is too low, the withdrawal
//! fails with [`TreasuryError::InsufficientFunds`] and the nullifier stays
//! consumed. The member cannot retry that exact action. This asymmetry is
//! accepted: refunding a nullifier would reopen the replay window.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use zkac_access::{AccessError, AccessMediator, Decision, Grant, RootEpoch};
use zkac_core::{ActionDescriptor, AttemptId, Nullifier, Principal, Proof, PublicInputs, Root, Timestamp};

use crate::error::TreasuryError;

/// Operation name bound into every withdrawal action hash.
pub const WITHDRAW_OPERATION: &str = "withdraw";

/// Record of one successful withdrawal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawalReceipt {
    /// Attempt that was granted.
    pub attempt: AttemptId,
    /// Amount debited.
    pub amount: u64,
    /// Balance after the debit.
    pub balance_after: u64,
    /// Nullifier consumed by the grant.
    pub nullifier: Nullifier,
    /// Root epoch the grant was issued under.
    pub epoch: u64,
    /// When the debit happened.
    pub at: Timestamp,
}

#[derive(Debug)]
struct Ledger {
    balance: u64,
    receipts: Vec<WithdrawalReceipt>,
}

/// A treasury whose balance only moves on a mediator grant.
#[derive(Debug)]
pub struct ProtectedTreasury {
    scope: String,
    owner: Principal,
    mediator: AccessMediator,
    ledger: Mutex<Ledger>,
}

impl ProtectedTreasury {
    /// A treasury named `scope`, administered by `owner`.
    pub fn new(scope: impl Into<String>, owner: Principal, mediator: AccessMediator, initial_balance: u64) -> Self {
        let scope = scope.into();
        tracing::info!(%scope, %owner, initial_balance, backend = %mediator.backend(), "treasury opened");
        Self {
            scope,
            owner,
            mediator,
            ledger: Mutex::new(Ledger {
                balance: initial_balance,
                receipts: Vec::new(),
            }),
        }
    }

    /// Scope bound into this treasury's action hashes.
    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// The owner.
    pub fn owner(&self) -> &Principal {
        &self.owner
    }

    /// Current balance.
    pub fn balance(&self) -> u64 {
        self.ledger.lock().balance
    }

    /// Every successful withdrawal, oldest first.
    pub fn receipts(&self) -> Vec<WithdrawalReceipt> {
        self.ledger.lock().receipts.clone()
    }

    /// The action a withdrawal of `amount` must be proven for.
    pub fn withdrawal_action(&self, amount: u64) -> ActionDescriptor {
        ActionDescriptor::new(self.scope.clone(), WITHDRAW_OPERATION, amount)
    }

    /// Register the authorized-set root. Owner only.
    ///
    /// # Errors
    ///
    /// [`TreasuryError::Admin`] if `caller` is not the owner or not the
    /// registry administrator.
    pub fn setup_role_root(&self, caller: &Principal, root: Root) -> Result<RootEpoch, TreasuryError> {
        if caller != &self.owner {
            return Err(TreasuryError::Admin(AccessError::AdministrativeUnauthorized {
                caller: caller.clone(),
            }));
        }
        Ok(self.mediator.registry().set_root(caller, root)?)
    }

    /// Withdraw `amount` under an anonymous membership proof.
    ///
    /// `public_inputs.action_hash` is ignored; the treasury derives the hash
    /// it authorizes from `amount`.
    ///
    /// # Errors
    ///
    /// - [`TreasuryError::ZeroAmount`] before any authorization.
    /// - [`TreasuryError::Denied`] with the mediator's reason; nothing changed.
    /// - [`TreasuryError::InsufficientFunds`] after a grant; the nullifier
    ///   is consumed and the balance is unchanged.
    pub fn withdraw(
        &self,
        amount: u64,
        proof: &Proof,
        public_inputs: &PublicInputs,
    ) -> Result<WithdrawalReceipt, TreasuryError> {
        if amount == 0 {
            return Err(TreasuryError::ZeroAmount);
        }
        let expected = self.withdrawal_action(amount).action_hash()?;

        let mut ledger = self.ledger.lock();
        let grant = match self
            .mediator
            .authorize(public_inputs.root, expected, public_inputs.nullifier, proof)
        {
            Decision::Granted(grant) => grant,
            Decision::Denied(reason) => {
                tracing::info!(scope = %self.scope, amount, reason = reason.as_str(), "withdrawal denied");
                return Err(TreasuryError::Denied(reason));
            }
        };
        Self::debit(&mut ledger, grant, amount)
    }

    fn debit(ledger: &mut Ledger, grant: Grant, amount: u64) -> Result<WithdrawalReceipt, TreasuryError> {
        let Some(balance_after) = ledger.balance.checked_sub(amount) else {
            tracing::warn!(
                attempt = %grant.attempt(),
                balance = ledger.balance,
                requested = amount,
                nullifier = ?grant.nullifier(),
                "withdrawal granted but funds insufficient; nullifier stays consumed"
            );
            return Err(TreasuryError::InsufficientFunds {
                balance: ledger.balance,
                requested: amount,
            });
        };

        ledger.balance = balance_after;
        let receipt = WithdrawalReceipt {
            attempt: grant.attempt(),
            amount,
            balance_after,
            nullifier: grant.nullifier(),
            epoch: grant.epoch(),
            at: Timestamp::now(),
        };
        ledger.receipts.push(receipt.clone());
        tracing::info!(attempt = %receipt.attempt, amount, balance_after, "withdrawal completed");
        Ok(receipt)
    }
}

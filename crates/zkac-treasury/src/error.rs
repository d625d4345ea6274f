//! Treasury errors.

use thiserror::Error;

use zkac_access::{AccessError, DenialReason};
use zkac_core::error::CanonicalizationError;

/// Why a treasury operation failed.
#[derive(Error, Debug)]
pub enum TreasuryError {
    /// The mediator refused the withdrawal. Nothing changed.
    #[error("withdrawal denied: {0}")]
    Denied(DenialReason),

    /// Granted, but the balance is too low. The nullifier stays consumed.
    #[error("insufficient funds: balance {balance}, requested {requested}")]
    InsufficientFunds {
        /// Balance at the time of the request.
        balance: u64,
        /// Amount requested.
        requested: u64,
    },

    /// Withdrawals must move a positive amount.
    #[error("withdrawal amount must be positive")]
    ZeroAmount,

    /// Administrative operation refused.
    #[error(transparent)]
    Admin(#[from] AccessError),

    /// The withdrawal action could not be hashed.
    #[error("action hash: {0}")]
    ActionHash(#[from] CanonicalizationError),
}

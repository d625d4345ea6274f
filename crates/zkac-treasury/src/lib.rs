//! # zkac-treasury - Guarded Resource
//!
//! [`ProtectedTreasury`] holds a balance that moves only when the access
//! mediator grants a withdrawal for exactly `"<scope>/withdraw:<amount>"`.

pub mod error;
pub mod treasury;

pub use error::TreasuryError;
pub use treasury::{ProtectedTreasury, WithdrawalReceipt, WITHDRAW_OPERATION};

//! # Action Descriptors
//!
//! An [`ActionDescriptor`] names one exact state change: the resource scope,
//! the operation, and the amount. Its [`ActionHash`] is what a proof binds
//! to, so a proof for `treasury/withdraw:500` is useless for
//! `treasury/withdraw:501` or for a different treasury.

use serde::{Deserialize, Serialize};

use crate::canonical::CanonicalBytes;
use crate::digest::{sha256_canonical, ACTION_TAG};
use crate::error::CanonicalizationError;
use crate::field::ActionHash;

/// One specific intended action.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionDescriptor {
    /// Which guarded resource the action targets.
    pub scope: String,
    /// Fixed semantic identifier of the operation, e.g. `withdraw`.
    pub operation: String,
    /// Amount affected by the operation.
    pub amount: u64,
}

impl ActionDescriptor {
    /// Describe an action.
    pub fn new(scope: impl Into<String>, operation: impl Into<String>, amount: u64) -> Self {
        Self {
            scope: scope.into(),
            operation: operation.into(),
            amount,
        }
    }

    /// Derive the action hash.
    ///
    /// `H("zkac.action.v1", JCS({"action": "<scope>/<operation>:<amount>"}))`.
    pub fn action_hash(&self) -> Result<ActionHash, CanonicalizationError> {
        let statement = serde_json::json!({ "action": self.to_string() });
        let canonical = CanonicalBytes::new(&statement)?;
        Ok(ActionHash::from_bytes(sha256_canonical(ACTION_TAG, &canonical)))
    }
}

impl std::fmt::Display for ActionDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}:{}", self.scope, self.operation, self.amount)
    }
}

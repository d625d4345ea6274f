//! # Authorization Registry
//!
//! Holds the currently active root and the consumed-nullifier ledger.
//!
//! ## Root Epochs
//!
//! Every `set_root` starts a new epoch. Epochs are independent: rotating
//! the root never touches the ledger, so a nullifier consumed under epoch 1
//! stays consumed under epoch 2, and nothing consumed is ever revalidated.
//!
//! ## Concurrency
//!
//! The active epoch sits behind a `parking_lot::RwLock`. A reader racing
//! `set_root` sees either the old or the new epoch, never a mixture.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use zkac_core::{Nullifier, Principal, Root, Timestamp};

use crate::error::AccessError;
use crate::ledger::{ConsumedNullifierSet, Consumption, NullifierLedger, NullifierRecord};

/// A registered root and the epoch it opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootEpoch {
    /// The authorized-set commitment.
    pub root: Root,
    /// Monotonic epoch counter, starting at 1.
    pub epoch: u64,
    /// When this root became active.
    pub activated_at: Timestamp,
}

/// Persisted form of a standalone registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    /// Administrator principal.
    pub admin: Principal,
    /// Active epoch, if any root was ever set.
    pub active: Option<RootEpoch>,
    /// Every consumed nullifier, sorted.
    pub consumed: Vec<NullifierRecord>,
}

/// Active root plus consumed nullifiers.
#[derive(Debug)]
pub struct AuthorizationRegistry {
    admin: Principal,
    active: RwLock<Option<RootEpoch>>,
    ledger: Arc<dyn NullifierLedger>,
}

impl AuthorizationRegistry {
    /// Standalone registry with an in-memory ledger.
    pub fn new(admin: Principal) -> Self {
        Self::with_ledger(admin, Arc::new(ConsumedNullifierSet::new()))
    }

    /// Registry over an external ledger.
    pub fn with_ledger(admin: Principal, ledger: Arc<dyn NullifierLedger>) -> Self {
        Self {
            admin,
            active: RwLock::new(None),
            ledger,
        }
    }

    /// The administrator.
    pub fn admin(&self) -> &Principal {
        &self.admin
    }

    /// Replace the active root, opening a new epoch.
    ///
    /// # Errors
    ///
    /// [`AccessError::AdministrativeUnauthorized`] unless `caller` is the
    /// administrator.
    pub fn set_root(&self, caller: &Principal, root: Root) -> Result<RootEpoch, AccessError> {
        if caller != &self.admin {
            tracing::warn!(%caller, "root update refused: caller is not the administrator");
            return Err(AccessError::AdministrativeUnauthorized {
                caller: caller.clone(),
            });
        }

        let mut active = self.active.write();
        let epoch = active.map_or(1, |e| e.epoch + 1);
        let next = RootEpoch {
            root,
            epoch,
            activated_at: Timestamp::now(),
        };
        *active = Some(next);
        tracing::info!(%root, epoch, "root epoch activated");
        Ok(next)
    }

    /// Active root epoch, if one is registered.
    pub fn active_epoch(&self) -> Option<RootEpoch> {
        *self.active.read()
    }

    /// Active root, if one is registered.
    pub fn active_root(&self) -> Option<Root> {
        self.active_epoch().map(|e| e.root)
    }

    /// Atomically consume `nullifier` under the current epoch.
    pub fn check_and_consume(&self, nullifier: Nullifier) -> Consumption {
        let epoch = self.active_epoch().map_or(0, |e| e.epoch);
        self.consume_under(nullifier, epoch)
    }

    /// Consume `nullifier`, recording the epoch the caller checked against.
    pub(crate) fn consume_under(&self, nullifier: Nullifier, epoch: u64) -> Consumption {
        self.ledger.consume(nullifier, epoch)
    }

    /// Whether `nullifier` has been consumed.
    pub fn is_consumed(&self, nullifier: &Nullifier) -> bool {
        self.ledger.contains(nullifier)
    }

    /// The record for a consumed nullifier.
    pub fn consumed_record(&self, nullifier: &Nullifier) -> Option<NullifierRecord> {
        self.ledger.get(nullifier)
    }

    /// Number of consumed nullifiers.
    pub fn consumed_count(&self) -> usize {
        self.ledger.len()
    }

    /// Capture the registry state for durable storage.
    ///
    /// The root read lock is held while the ledger is copied, so no record
    /// in the snapshot can carry an epoch newer than its `active` epoch.
    pub fn snapshot(&self) -> RegistrySnapshot {
        let active = self.active.read();
        RegistrySnapshot {
            admin: self.admin.clone(),
            active: *active,
            consumed: self.ledger.records(),
        }
    }

    /// Rebuild a standalone registry from a snapshot. Every nullifier in the
    /// snapshot is consumed in the result.
    ///
    /// # Errors
    ///
    /// [`AccessError::DuplicateNullifier`] or
    /// [`AccessError::EpochOutOfRange`] if the snapshot is inconsistent.
    pub fn restore(snapshot: RegistrySnapshot) -> Result<Self, AccessError> {
        let active_epoch = snapshot.active.map_or(0, |e| e.epoch);
        if let Some(bad) = snapshot.consumed.iter().find(|r| r.epoch > active_epoch) {
            return Err(AccessError::EpochOutOfRange {
                nullifier: bad.nullifier,
                epoch: bad.epoch,
                active: active_epoch,
            });
        }
        let ledger = ConsumedNullifierSet::from_records(snapshot.consumed)?;
        tracing::info!(
            epoch = active_epoch,
            consumed = ledger.len(),
            "registry restored from snapshot"
        );
        Ok(Self {
            admin: snapshot.admin,
            active: RwLock::new(snapshot.active),
            ledger: Arc::new(ledger),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin() -> Principal {
        Principal::new("treasury-owner")
    }

    fn root(b: u8) -> Root {
        Root::from_bytes([b; 32])
    }

    #[test]
    fn no_root_until_set() {
        let reg = AuthorizationRegistry::new(admin());
        assert_eq!(reg.active_root(), None);
        assert_eq!(reg.active_epoch(), None);
    }

    #[test]
    fn admin_sets_root_and_epochs_increase() {
        let reg = AuthorizationRegistry::new(admin());
        let e1 = reg.set_root(&admin(), root(1)).unwrap();
        let e2 = reg.set_root(&admin(), root(2)).unwrap();
        assert_eq!((e1.epoch, e2.epoch), (1, 2));
        assert_eq!(reg.active_root(), Some(root(2)));
    }

    #[test]
    fn non_admin_cannot_set_root() {
        let reg = AuthorizationRegistry::new(admin());
        reg.set_root(&admin(), root(1)).unwrap();
        let err = reg.set_root(&Principal::new("mallory"), root(9)).unwrap_err();
        assert!(matches!(err, AccessError::AdministrativeUnauthorized { .. }));
        assert_eq!(reg.active_root(), Some(root(1)));
    }

    #[test]
    fn rotation_keeps_consumed_nullifiers() {
        let reg = AuthorizationRegistry::new(admin());
        reg.set_root(&admin(), root(1)).unwrap();
        let n = Nullifier::from_bytes([7; 32]);
        assert!(reg.check_and_consume(n).is_granted());
        reg.set_root(&admin(), root(2)).unwrap();
        assert!(reg.is_consumed(&n));
        let again = reg.check_and_consume(n);
        assert!(!again.is_granted());
        assert_eq!(again.record().epoch, 1);
    }

    #[test]
    fn snapshot_restore_preserves_everything() {
        let reg = AuthorizationRegistry::new(admin());
        reg.set_root(&admin(), root(1)).unwrap();
        reg.set_root(&admin(), root(2)).unwrap();
        for b in 0..5u8 {
            reg.check_and_consume(Nullifier::from_bytes([b; 32]));
        }

        let json = serde_json::to_string(&reg.snapshot()).unwrap();
        let restored = AuthorizationRegistry::restore(serde_json::from_str(&json).unwrap()).unwrap();

        assert_eq!(restored.snapshot(), reg.snapshot());
        assert_eq!(restored.consumed_count(), 5);
        assert!(!restored.check_and_consume(Nullifier::from_bytes([3; 32])).is_granted());
        assert_eq!(restored.set_root(&admin(), root(3)).unwrap().epoch, 3);
    }

    #[test]
    fn restore_rejects_future_epoch() {
        let reg = AuthorizationRegistry::new(admin());
        reg.set_root(&admin(), root(1)).unwrap();
        reg.check_and_consume(Nullifier::from_bytes([1; 32]));
        let mut snap = reg.snapshot();
        snap.consumed[0].epoch = 5;
        assert!(matches!(
            AuthorizationRegistry::restore(snap),
            Err(AccessError::EpochOutOfRange { epoch: 5, active: 1, .. })
        ));
    }

    #[test]
    fn snapshot_taken_during_rotation_always_restores() {
        let reg = AuthorizationRegistry::new(admin());
        reg.set_root(&admin(), root(0)).unwrap();
        std::thread::scope(|s| {
            let reg = &reg;
            s.spawn(move || {
                for i in 1..=200u8 {
                    reg.set_root(&admin(), root(i)).unwrap();
                    assert!(reg.check_and_consume(Nullifier::from_bytes([i; 32])).is_granted());
                }
            });
            for _ in 0..200 {
                let snap = reg.snapshot();
                let restored = AuthorizationRegistry::restore(snap.clone()).unwrap();
                assert_eq!(restored.consumed_count(), snap.consumed.len());
            }
        });
        let restored = AuthorizationRegistry::restore(reg.snapshot()).unwrap();
        assert_eq!(restored.active_epoch().map(|e| e.epoch), Some(201));
        assert_eq!(restored.consumed_count(), 200);
    }
}

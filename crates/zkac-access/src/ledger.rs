//! # Consumed Nullifier Ledger
//!
//! The append-only set of nullifiers that have already authorized an
//! action. There is no removal API.
//!
//! [`NullifierLedger`] is the seam to an external serial-execution substrate
//! (a chain, a database with a unique index). [`ConsumedNullifierSet`] is the
//! standalone implementation: 16 `parking_lot::Mutex` shards keyed by the
//! nullifier's leading byte. A check-and-insert runs under one shard lock,
//! so concurrent consumers of the same nullifier serialize and exactly one
//! wins; different nullifiers mostly land on different shards.

use std::collections::HashMap;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use zkac_core::{Nullifier, Timestamp};

use crate::error::AccessError;

/// Number of lock shards.
pub const SHARD_COUNT: usize = 16;

/// A consumed nullifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NullifierRecord {
    /// The nullifier.
    pub nullifier: Nullifier,
    /// Root epoch active when it was consumed.
    pub epoch: u64,
    /// When it was consumed (UTC).
    pub consumed_at: Timestamp,
}

/// Result of an atomic check-and-consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Consumption {
    /// Newly consumed by this call.
    Granted(NullifierRecord),
    /// Already consumed earlier; carries the original record. Nothing changed.
    AlreadyUsed(NullifierRecord),
}

impl Consumption {
    /// Whether this call consumed the nullifier.
    pub fn is_granted(&self) -> bool {
        matches!(self, Consumption::Granted(_))
    }

    /// The record, whichever call created it.
    pub fn record(&self) -> &NullifierRecord {
        match self {
            Consumption::Granted(r) | Consumption::AlreadyUsed(r) => r,
        }
    }
}

/// Storage for consumed nullifiers.
///
/// `consume` must be atomic per nullifier: among any number of concurrent
/// calls for the same nullifier, exactly one returns
/// [`Consumption::Granted`].
pub trait NullifierLedger: Send + Sync + std::fmt::Debug {
    /// Check membership and insert if absent, as one step.
    fn consume(&self, nullifier: Nullifier, epoch: u64) -> Consumption;

    /// Look up a consumed nullifier.
    fn get(&self, nullifier: &Nullifier) -> Option<NullifierRecord>;

    /// Number of consumed nullifiers.
    fn len(&self) -> usize;

    /// Every record, sorted by nullifier.
    fn records(&self) -> Vec<NullifierRecord>;

    /// Whether `nullifier` has been consumed.
    fn contains(&self, nullifier: &Nullifier) -> bool {
        self.get(nullifier).is_some()
    }

    /// Whether nothing has been consumed yet.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory sharded nullifier set.
#[derive(Debug)]
pub struct ConsumedNullifierSet {
    shards: [Mutex<HashMap<Nullifier, NullifierRecord>>; SHARD_COUNT],
}

impl ConsumedNullifierSet {
    /// Empty set.
    pub fn new() -> Self {
        Self {
            shards: std::array::from_fn(|_| Mutex::new(HashMap::new())),
        }
    }

    /// Rebuild from persisted records.
    ///
    /// # Errors
    ///
    /// [`AccessError::DuplicateNullifier`] if any nullifier appears twice.
    pub fn from_records(records: impl IntoIterator<Item = NullifierRecord>) -> Result<Self, AccessError> {
        let set = Self::new();
        for record in records {
            let mut shard = set.shard(&record.nullifier).lock();
            if shard.insert(record.nullifier, record).is_some() {
                return Err(AccessError::DuplicateNullifier(record.nullifier));
            }
        }
        Ok(set)
    }

    fn shard(&self, nullifier: &Nullifier) -> &Mutex<HashMap<Nullifier, NullifierRecord>> {
        &self.shards[nullifier.shard_key() as usize % SHARD_COUNT]
    }
}

impl Default for ConsumedNullifierSet {
    fn default() -> Self {
        Self::new()
    }
}

impl NullifierLedger for ConsumedNullifierSet {
    fn consume(&self, nullifier: Nullifier, epoch: u64) -> Consumption {
        let mut shard = self.shard(&nullifier).lock();
        if let Some(existing) = shard.get(&nullifier) {
            return Consumption::AlreadyUsed(*existing);
        }
        let record = NullifierRecord {
            nullifier,
            epoch,
            consumed_at: Timestamp::now(),
        };
        shard.insert(nullifier, record);
        Consumption::Granted(record)
    }

    fn get(&self, nullifier: &Nullifier) -> Option<NullifierRecord> {
        self.shard(nullifier).lock().get(nullifier).copied()
    }

    fn len(&self) -> usize {
        self.shards.iter().map(|s| s.lock().len()).sum()
    }

    fn records(&self) -> Vec<NullifierRecord> {
        let mut all: Vec<NullifierRecord> = self
            .shards
            .iter()
            .flat_map(|s| s.lock().values().copied().collect::<Vec<_>>())
            .collect();
        all.sort_by_key(|r| r.nullifier);
        all
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn consumed_count_equals_distinct_inputs(bytes in prop::collection::vec(any::<[u8; 32]>(), 0..64)) {
            let set = ConsumedNullifierSet::new();
            let mut granted = 0usize;
            for b in &bytes {
                if set.consume(Nullifier::from_bytes(*b), 1).is_granted() {
                    granted += 1;
                }
            }
            let distinct: std::collections::HashSet<_> = bytes.iter().collect();
            prop_assert_eq!(granted, distinct.len());
            prop_assert_eq!(set.len(), distinct.len());
        }
    }
}

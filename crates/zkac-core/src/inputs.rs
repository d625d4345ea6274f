//! # Public Inputs and Proofs
//!
//! The triple `(root, action_hash, nullifier)` is everything the mediator and
//! registry ever learn about an authorization attempt. The member's secret
//! and Merkle path stay with the proof producer.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::canonical::CanonicalBytes;
use crate::error::{CanonicalizationError, EncodingError};
use crate::field::{ActionHash, Nullifier, Root};
use crate::hex;

/// The public statement a proof attests to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PublicInputs {
    /// Authorized-set commitment the member proved inclusion under.
    pub root: Root,
    /// Action the proof is bound to.
    pub action_hash: ActionHash,
    /// One-time token for this (member, action) pair.
    pub nullifier: Nullifier,
}

impl PublicInputs {
    /// Assemble the triple.
    pub fn new(root: Root, action_hash: ActionHash, nullifier: Nullifier) -> Self {
        Self {
            root,
            action_hash,
            nullifier,
        }
    }

    /// Canonical bytes of the triple, tagged with the circuit it is
    /// evaluated under.
    pub fn canonical_statement(&self, circuit_id: &str) -> Result<CanonicalBytes, CanonicalizationError> {
        CanonicalBytes::new(&serde_json::json!({
            "circuit_id": circuit_id,
            "root": self.root,
            "action_hash": self.action_hash,
            "nullifier": self.nullifier,
        }))
    }
}

/// An opaque proof produced off-chain.
///
/// The core never inspects its contents beyond handing it to a verifier.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Proof(Vec<u8>);

impl Proof {
    /// Wrap raw proof bytes.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// The raw proof bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Empty proofs are rejected by every verifier.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Lowercase hex.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Parse from hex.
    pub fn from_hex(s: &str) -> Result<Self, EncodingError> {
        hex::decode(s).map(Self)
    }
}

impl From<Vec<u8>> for Proof {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl std::fmt::Debug for Proof {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Proof({} bytes, {}..)", self.0.len(), hex::prefix(&self.0))
    }
}

impl Serialize for Proof {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Proof {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

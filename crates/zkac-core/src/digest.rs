//! # Tagged SHA-256 Digests
//!
//! Every hash in zkac is domain-separated: the tag is absorbed first,
//! length-prefixed, so a digest computed for one purpose (action hash,
//! nullifier, Merkle node) can never collide with another purpose's
//! digest over the same payload.

use sha2::{Digest, Sha256};

use crate::canonical::CanonicalBytes;

/// Domain tag for action hashes.
pub const ACTION_TAG: &str = "zkac.action.v1";
/// Domain tag for nullifier derivation.
pub const NULLIFIER_TAG: &str = "zkac.nullifier.v1";
/// Domain tag for identity commitments (Merkle leaves).
pub const COMMITMENT_TAG: &str = "zkac.commitment.v1";
/// Domain tag for interior Merkle nodes.
pub const NODE_TAG: &str = "zkac.node.v1";

/// Incremental SHA-256 over a domain tag and a sequence of parts.
///
/// Each part is length-prefixed (big-endian `u64`) so that
/// `("ab", "c")` and `("a", "bc")` hash differently.
#[derive(Clone)]
pub struct Sha256Accumulator {
    hasher: Sha256,
}

impl Sha256Accumulator {
    /// Start a digest under `tag`.
    pub fn new(tag: &str) -> Self {
        let mut acc = Self {
            hasher: Sha256::new(),
        };
        acc.update(tag.as_bytes());
        acc
    }

    /// Absorb one length-prefixed part.
    pub fn update(&mut self, part: &[u8]) -> &mut Self {
        self.hasher.update((part.len() as u64).to_be_bytes());
        self.hasher.update(part);
        self
    }

    /// Finish and return the raw 32-byte digest.
    pub fn finalize(self) -> [u8; 32] {
        self.hasher.finalize().into()
    }
}

impl std::fmt::Debug for Sha256Accumulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Sha256Accumulator(..)")
    }
}

/// Tagged digest of canonical bytes.
pub fn sha256_canonical(tag: &str, data: &CanonicalBytes) -> [u8; 32] {
    let mut acc = Sha256Accumulator::new(tag);
    acc.update(data.as_bytes());
    acc.finalize()
}

/// Tagged digest of raw parts, for fixed-width inputs that are already
/// unambiguous (32-byte secrets, hashes, node values).
pub fn sha256_parts(tag: &str, parts: &[&[u8]]) -> [u8; 32] {
    let mut acc = Sha256Accumulator::new(tag);
    for part in parts {
        acc.update(part);
    }
    acc.finalize()
}

//! # Membership Merkle Paths
//!
//! Folding a leaf commitment up a sibling path to a [`Root`]. This is the
//! membership constraint of the circuit: a member knows a leaf and a path
//! that fold to the registered root.
//!
//! Hashing is domain-separated SHA-256:
//! - Node: `H("zkac.node.v1", left, right)`.
//!
//! Building and maintaining the authorized-set tree is the job of whoever
//! administers the set; [`power_of_two_path`] exists so a prover can
//! extract its own path from a published leaf list.

use serde::{Deserialize, Serialize};

use zkac_core::digest::{sha256_parts, NODE_TAG};
use zkac_core::error::CryptoError;
use zkac_core::Root;

/// Depth of the membership tree evaluated by the circuit (16 members).
pub const MEMBERSHIP_TREE_DEPTH: usize = 4;

/// Which side of the running hash a sibling sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Sibling is the left input: `node(sibling, cur)`.
    Left,
    /// Sibling is the right input: `node(cur, sibling)`.
    Right,
}

/// One step of a Merkle path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathStep {
    /// Side the sibling is on.
    pub side: Side,
    /// Sibling node value.
    pub sibling: [u8; 32],
}

/// Sibling path from a leaf to the root, leaf level first.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MerklePath {
    /// Steps, leaf level first.
    pub steps: Vec<PathStep>,
}

impl MerklePath {
    /// Number of levels in the path.
    pub fn depth(&self) -> usize {
        self.steps.len()
    }

    /// Fold `leaf` up the path.
    pub fn fold(&self, leaf: &[u8; 32]) -> Root {
        let cur = self.steps.iter().fold(*leaf, |cur, step| match step.side {
            Side::Left => node_hash(&step.sibling, &cur),
            Side::Right => node_hash(&cur, &step.sibling),
        });
        Root::from_bytes(cur)
    }
}

/// Interior node hash.
pub fn node_hash(left: &[u8; 32], right: &[u8; 32]) -> [u8; 32] {
    sha256_parts(NODE_TAG, &[left.as_slice(), right.as_slice()])
}

/// Root and path for `leaves[pos]` in a power-of-two leaf list.
pub fn power_of_two_path(leaves: &[[u8; 32]], pos: usize) -> Result<(Root, MerklePath), CryptoError> {
    let n = leaves.len();
    if n == 0 || n & (n - 1) != 0 {
        return Err(CryptoError::DigestError(format!(
            "leaf count must be a non-zero power of two, got {n}"
        )));
    }
    if pos >= n {
        return Err(CryptoError::DigestError(format!(
            "leaf position {pos} out of range for {n} leaves"
        )));
    }

    let mut level = leaves.to_vec();
    let mut pos = pos;
    let mut steps = Vec::new();
    while level.len() > 1 {
        let sibling_pos = pos ^ 1;
        let side = if sibling_pos < pos { Side::Left } else { Side::Right };
        steps.push(PathStep {
            side,
            sibling: level[sibling_pos],
        });
        level = level
            .chunks_exact(2)
            .map(|pair| node_hash(&pair[0], &pair[1]))
            .collect();
        pos /= 2;
    }
    Ok((Root::from_bytes(level[0]), MerklePath { steps }))
}

//! # zkac-crypto - Cryptographic Primitives
//!
//! - **Ed25519** key pairs, signatures and strict verification over
//!   `CanonicalBytes`, used by the circuit-backed proof system.
//! - **Merkle paths** over tagged SHA-256 for the membership constraint.
//!
//! ## Crate Policy
//!
//! - Depends only on `zkac-core` internally.
//! - Tests use real Ed25519 and real SHA-256; nothing is mocked.

pub mod ed25519;
pub mod merkle;

pub use ed25519::{Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature};
pub use merkle::{node_hash, power_of_two_path, MerklePath, PathStep, Side, MEMBERSHIP_TREE_DEPTH};

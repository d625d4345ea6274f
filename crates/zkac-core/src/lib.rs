//! # zkac-core - Foundational Types
//!
//! The leaf of the zkac crate graph. Defines the values that cross the
//! authorization boundary and the canonicalization/digest pipeline every
//! other crate hashes and signs through.
//!
//! ## Key Design Principles
//!
//! 1. **Distinct fixed-width newtypes.** [`Root`], [`ActionHash`] and
//!    [`Nullifier`] are separate types; they cannot be swapped by accident,
//!    and they decode only from exactly 64 hex characters.
//!
//! 2. **`CanonicalBytes` for everything hashed or signed.** Action
//!    statements and circuit statements are JCS-canonicalized before any
//!    digest or signature touches them.
//!
//! 3. **Domain-separated digests.** Every SHA-256 in the system carries a
//!    tag ([`digest::ACTION_TAG`], [`digest::NULLIFIER_TAG`], ...).
//!
//! ## Crate Policy
//!
//! - No dependencies on other `zkac-*` crates.
//! - No `unsafe` code.
//! - No `.unwrap()` outside tests.

pub mod action;
pub mod canonical;
pub mod digest;
pub mod error;
pub mod field;
pub mod hex;
pub mod identity;
pub mod inputs;
pub mod temporal;

pub use action::ActionDescriptor;
pub use canonical::CanonicalBytes;
pub use digest::{sha256_canonical, sha256_parts, Sha256Accumulator};
pub use error::{CanonicalizationError, CryptoError, EncodingError, ZkacError};
pub use field::{ActionHash, Nullifier, Root, FIELD_BYTES};
pub use identity::{AttemptId, Principal};
pub use inputs::{Proof, PublicInputs};
pub use temporal::Timestamp;

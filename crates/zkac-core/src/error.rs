//! # Error Types
//!
//! Errors shared by every zkac crate. Higher layers (verifier, registry,
//! treasury) define their own enums and wrap these where they cross a
//! crate boundary.

use thiserror::Error;

/// Top-level error type for the foundational crate.
#[derive(Error, Debug)]
pub enum ZkacError {
    /// Canonicalization failed.
    #[error("canonicalization error: {0}")]
    Canonicalization(#[from] CanonicalizationError),

    /// A boundary value did not match its exact wire encoding.
    #[error("encoding error: {0}")]
    Encoding(#[from] EncodingError),

    /// A timestamp or other scalar failed validation.
    #[error("validation error: {0}")]
    Validation(String),
}

/// Error during canonical serialization.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// Floats have no single canonical rendering; amounts are integers.
    #[error("float values are not permitted in canonical representations: {0}")]
    FloatRejected(f64),

    /// JSON serialization failed.
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}

/// A value at the protocol boundary was not in its exact expected form.
///
/// Fixed-width values are never widened, truncated, or reinterpreted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    /// Hex string had the wrong number of characters.
    #[error("{kind} must be exactly {expected} hex chars, got {actual}")]
    WrongLength {
        /// Which value was being decoded.
        kind: &'static str,
        /// Required hex length.
        expected: usize,
        /// Observed hex length.
        actual: usize,
    },

    /// A non-hex character was encountered.
    #[error("invalid hex at position {position}")]
    InvalidHex {
        /// Byte offset of the offending pair.
        position: usize,
    },

    /// Odd-length hex string.
    #[error("hex string must have even length")]
    OddLength,
}

/// Error in cryptographic operations.
#[derive(Error, Debug)]
pub enum CryptoError {
    /// Signature verification failed.
    #[error("signature verification failed: {0}")]
    VerificationFailed(String),

    /// Key parsing failed.
    #[error("key error: {0}")]
    KeyError(String),

    /// Input could not be canonicalized for signing or hashing.
    #[error("digest error: {0}")]
    DigestError(String),
}

impl From<CanonicalizationError> for CryptoError {
    fn from(e: CanonicalizationError) -> Self {
        Self::DigestError(e.to_string())
    }
}

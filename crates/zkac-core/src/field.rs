//! # Fixed-Width Protocol Values
//!
//! `Root`, `ActionHash` and `Nullifier` are distinct 32-byte newtypes. A
//! nullifier can never be passed where a root is expected, and all three
//! cross the boundary as exactly 64 hex characters.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::EncodingError;
use crate::hex;

/// Width in bytes of every fixed-width protocol value.
pub const FIELD_BYTES: usize = 32;

macro_rules! fixed_width_value {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name([u8; FIELD_BYTES]);

        impl $name {
            /// Wrap raw bytes.
            pub const fn from_bytes(bytes: [u8; FIELD_BYTES]) -> Self {
                Self(bytes)
            }

            /// The raw bytes.
            pub fn as_bytes(&self) -> &[u8; FIELD_BYTES] {
                &self.0
            }

            /// Lowercase hex, exactly 64 chars.
            pub fn to_hex(&self) -> String {
                hex::encode(&self.0)
            }

            /// Parse exactly 64 hex chars.
            pub fn from_hex(s: &str) -> Result<Self, EncodingError> {
                hex::decode_fixed::<FIELD_BYTES>($kind, s).map(Self)
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!(stringify!($name), "({}..)"), hex::prefix(&self.0))
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.to_hex())
            }
        }

        impl std::str::FromStr for $name {
            type Err = EncodingError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_hex(s)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_hex())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                Self::from_hex(&s).map_err(serde::de::Error::custom)
            }
        }
    };
}

fixed_width_value!(
    /// Commitment to an authorized membership set (a Merkle root).
    Root,
    "root"
);

fixed_width_value!(
    /// Identifier binding a proof to one specific intended action.
    ActionHash,
    "action hash"
);

fixed_width_value!(
    /// One-time token derived from a member secret and an action hash.
    ///
    /// Deterministic: the same member authorizing the same action always
    /// yields the same nullifier, which is what makes replay detectable.
    Nullifier,
    "nullifier"
);

impl Nullifier {
    /// Leading byte, used to pick a lock shard in the consumed set.
    pub fn shard_key(&self) -> u8 {
        self.0[0]
    }
}

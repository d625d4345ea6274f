//! # Canonical Serialization
//!
//! `CanonicalBytes` is the only input accepted by the digest and signing
//! functions in zkac. Every statement that gets hashed (action descriptors)
//! or signed (circuit attestations) goes through here first, so two parties
//! rendering the same statement always produce the same bytes.
//!
//! ## Rules
//!
//! 1. Floats are rejected. Amounts are integers.
//! 2. Object keys are sorted, separators compact (RFC 8785 via `serde_jcs`).
//! 3. Fixed-width values serialize as their exact hex strings (see
//!    [`crate::field`]), so no numeric coercion happens here.

use serde::Serialize;
use serde_json::Value;

use crate::error::CanonicalizationError;

/// Bytes produced exclusively by JCS canonicalization.
///
/// The inner buffer is private; [`CanonicalBytes::new()`] is the only
/// constructor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalBytes(Vec<u8>);

impl CanonicalBytes {
    /// Canonicalize any serializable value.
    ///
    /// # Errors
    ///
    /// [`CanonicalizationError::FloatRejected`] if the value contains a
    /// non-integral number anywhere in its tree.
    pub fn new(obj: &impl Serialize) -> Result<Self, CanonicalizationError> {
        let value = serde_json::to_value(obj)?;
        reject_floats(&value)?;
        let s = serde_jcs::to_string(&value)?;
        Ok(Self(s.into_bytes()))
    }

    /// The canonical byte sequence.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the byte sequence is empty. Never true for a JSON value.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

fn reject_floats(value: &Value) -> Result<(), CanonicalizationError> {
    match value {
        Value::Null | Value::Bool(_) | Value::String(_) => Ok(()),
        Value::Number(n) => {
            if n.is_f64() && !n.is_i64() && !n.is_u64() {
                if let Some(f) = n.as_f64() {
                    return Err(CanonicalizationError::FloatRejected(f));
                }
            }
            Ok(())
        }
        Value::Array(items) => items.iter().try_for_each(reject_floats),
        Value::Object(map) => map.values().try_for_each(reject_floats),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_sorted_and_compact() {
        let data = serde_json::json!({"nullifier": "bb", "action_hash": "aa", "root": "cc"});
        let cb = CanonicalBytes::new(&data).unwrap();
        assert_eq!(
            std::str::from_utf8(cb.as_bytes()).unwrap(),
            r#"{"action_hash":"aa","nullifier":"bb","root":"cc"}"#
        );
    }

    #[test]
    fn nested_objects_are_sorted() {
        let data = serde_json::json!({"statement": {"z": 1, "a": 2}, "circuit": "m"});
        let cb = CanonicalBytes::new(&data).unwrap();
        assert_eq!(
            std::str::from_utf8(cb.as_bytes()).unwrap(),
            r#"{"circuit":"m","statement":{"a":2,"z":1}}"#
        );
    }

    #[test]
    fn float_amount_rejected() {
        let data = serde_json::json!({"amount": 500.5});
        match CanonicalBytes::new(&data) {
            Err(CanonicalizationError::FloatRejected(f)) => assert_eq!(f, 500.5),
            other => panic!("expected FloatRejected, got {other:?}"),
        }
    }

    #[test]
    fn deeply_nested_float_rejected() {
        let data = serde_json::json!({"a": [{"b": {"c": 0.25}}]});
        assert!(CanonicalBytes::new(&data).is_err());
    }

    #[test]
    fn integer_amount_accepted() {
        let data = serde_json::json!({"amount": 10000u64});
        let cb = CanonicalBytes::new(&data).unwrap();
        assert_eq!(cb.as_bytes(), br#"{"amount":10000}"#);
        assert!(!cb.is_empty());
        assert_eq!(cb.len(), cb.as_bytes().len());
    }
}

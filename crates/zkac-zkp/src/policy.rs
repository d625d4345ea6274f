//! # Proof Backend Policy
//!
//! Decides whether a verifier backend may be constructed for the current
//! deployment context.
//!
//! ## Problem
//!
//! The permissive verifier accepts any non-empty proof. It carries no
//! cryptographic soundness at all. If it were wired into a production
//! mediator, anyone could spend any treasury by submitting one byte.
//!
//! ## Solution
//!
//! [`build_verifier`](crate::verifier::build_verifier) consults a
//! [`ProofPolicy`] before constructing anything. In production mode the
//! permissive backend is refused, even when the `permissive` feature
//! happens to be compiled in.
//!
//! ## Configuration
//!
//! The policy mode is determined by:
//! 1. Runtime environment variable (`ZKAC_PROOF_POLICY`)
//! 2. Explicit `ProofPolicy::new()` construction
//!
//! Without the variable, release builds (`not(debug_assertions)`) default to
//! `Production` and debug builds to `Development`. A value that names no
//! mode is an error, never a silent fallback.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable consulted by [`ProofPolicy::from_environment`].
pub const POLICY_ENV_VAR: &str = "ZKAC_PROOF_POLICY";

/// Errors from proof policy enforcement.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PolicyError {
    /// Permissive verifier refused in production mode.
    #[error("{backend} verifier refused: production mode requires a circuit-backed verifier")]
    PermissiveRejected {
        /// The backend that was refused.
        backend: &'static str,
    },
    /// `ZKAC_PROOF_POLICY` holds a value that names no mode.
    #[error("unrecognized {var} value {value:?}: expected production, prod, development or dev", var = POLICY_ENV_VAR)]
    UnknownMode {
        /// The rejected value.
        value: String,
    },
}

/// Which verifier backend is in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProofBackend {
    /// Accepts any non-empty proof. No soundness.
    Permissive,
    /// Verifies the membership circuit.
    CircuitBacked,
}

impl ProofBackend {
    /// Whether this backend actually checks the circuit.
    pub fn is_sound(self) -> bool {
        matches!(self, ProofBackend::CircuitBacked)
    }

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            ProofBackend::Permissive => "permissive",
            ProofBackend::CircuitBacked => "circuit-backed",
        }
    }
}

impl std::fmt::Display for ProofBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Proof policy mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyMode {
    /// Refuse the permissive backend unconditionally.
    Production,
    /// Allow the permissive backend (tests and local demos only).
    Development,
}

/// Runtime policy over which verifier backends may be constructed.
///
/// ```rust
/// use zkac_zkp::policy::{ProofBackend, ProofPolicy};
///
/// let policy = ProofPolicy::production();
/// assert!(policy.validate(ProofBackend::CircuitBacked).is_ok());
/// assert!(policy.validate(ProofBackend::Permissive).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProofPolicy {
    mode: PolicyMode,
}

impl ProofPolicy {
    /// Create a policy with the given mode.
    pub fn new(mode: PolicyMode) -> Self {
        Self { mode }
    }

    /// Production policy.
    pub fn production() -> Self {
        Self::new(PolicyMode::Production)
    }

    /// Development policy.
    pub fn development() -> Self {
        Self::new(PolicyMode::Development)
    }

    /// Policy from `ZKAC_PROOF_POLICY`, falling back to the build profile.
    ///
    /// An unrecognized value fails closed to production.
    pub fn from_environment() -> Self {
        Self::from_env_value(std::env::var(POLICY_ENV_VAR).ok().as_deref()).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to production proof policy");
            Self::production()
        })
    }

    /// Parse an env-var value. An absent value gives the build-profile
    /// default; an unknown one is an error.
    pub fn from_env_value(value: Option<&str>) -> Result<Self, PolicyError> {
        let Some(raw) = value else {
            return Ok(Self::build_default());
        };
        match raw.to_lowercase().as_str() {
            "production" | "prod" => Ok(Self::production()),
            "development" | "dev" => Ok(Self::development()),
            _ => Err(PolicyError::UnknownMode {
                value: raw.to_string(),
            }),
        }
    }

    /// Release builds are production; debug builds are development.
    pub fn build_default() -> Self {
        if cfg!(not(debug_assertions)) {
            Self::production()
        } else {
            Self::development()
        }
    }

    /// Whether `backend` may be constructed under this policy.
    pub fn validate(&self, backend: ProofBackend) -> Result<(), PolicyError> {
        match (self.mode, backend) {
            (PolicyMode::Production, ProofBackend::Permissive) => Err(PolicyError::PermissiveRejected {
                backend: backend.name(),
            }),
            _ => Ok(()),
        }
    }

    /// Current policy mode.
    pub fn mode(&self) -> PolicyMode {
        self.mode
    }
}

impl Default for ProofPolicy {
    fn default() -> Self {
        Self::from_environment()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn production_rejects_permissive() {
        let err = ProofPolicy::production()
            .validate(ProofBackend::Permissive)
            .unwrap_err();
        assert!(err.to_string().contains("permissive"));
    }

    #[test]
    fn production_accepts_circuit_backed() {
        assert!(ProofPolicy::production()
            .validate(ProofBackend::CircuitBacked)
            .is_ok());
    }

    #[test]
    fn development_accepts_both() {
        let policy = ProofPolicy::development();
        assert!(policy.validate(ProofBackend::Permissive).is_ok());
        assert!(policy.validate(ProofBackend::CircuitBacked).is_ok());
    }

    #[test]
    fn env_values_parse_case_insensitively() {
        assert_eq!(
            ProofPolicy::from_env_value(Some("PROD")).unwrap().mode(),
            PolicyMode::Production
        );
        assert_eq!(
            ProofPolicy::from_env_value(Some("development")).unwrap().mode(),
            PolicyMode::Development
        );
    }

    #[test]
    fn unknown_env_value_is_rejected() {
        assert_eq!(
            ProofPolicy::from_env_value(Some("producton")),
            Err(PolicyError::UnknownMode {
                value: "producton".to_string()
            })
        );
        let err = ProofPolicy::from_env_value(Some("")).unwrap_err();
        assert!(err.to_string().contains(POLICY_ENV_VAR));
    }

    #[test]
    fn absent_env_value_uses_build_default() {
        assert_eq!(ProofPolicy::from_env_value(None), Ok(ProofPolicy::build_default()));
    }

    #[test]
    #[cfg(not(debug_assertions))]
    fn release_build_defaults_to_production() {
        assert_eq!(ProofPolicy::build_default().mode(), PolicyMode::Production);
    }

    #[test]
    fn only_circuit_backed_is_sound() {
        assert!(ProofBackend::CircuitBacked.is_sound());
        assert!(!ProofBackend::Permissive.is_sound());
    }

    #[test]
    fn backend_serde_is_snake_case() {
        let json = serde_json::to_string(&ProofBackend::CircuitBacked).unwrap();
        assert_eq!(json, "\"circuit_backed\"");
    }
}

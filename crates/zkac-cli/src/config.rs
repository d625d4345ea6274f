//! # CLI Configuration
//!
//! Loaded from the YAML file named by `--config`:
//!
//! ```yaml
//! policy: production
//! verifier:
//!   backend: circuit_backed
//!   attester_public_key: 3b6a27bcceb6a42d62a3a8d02a6f0d73653215771de243a63ac048a18b59da29
//! treasury:
//!   scope: treasury
//!   owner: treasury-owner
//!   initial_balance: 10000
//! ```
//!
//! `ZKAC_PROOF_POLICY` overrides `policy`; a value naming no mode is an
//! error. Without either, the build profile decides.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use zkac_zkp::policy::{PolicyError, POLICY_ENV_VAR};
use zkac_zkp::{PolicyMode, ProofPolicy, VerifierConfig};

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ZkacConfig {
    /// Proof policy mode.
    #[serde(default)]
    pub policy: Option<PolicyMode>,
    /// Verifier backend. Required by `verify`; `demo` generates its own.
    #[serde(default)]
    pub verifier: Option<VerifierConfig>,
    /// Guarded treasury parameters.
    #[serde(default)]
    pub treasury: TreasuryConfig,
}

/// Treasury parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct TreasuryConfig {
    /// Scope bound into withdrawal action hashes.
    pub scope: String,
    /// Owner principal.
    pub owner: String,
    /// Opening balance.
    pub initial_balance: u64,
}

impl Default for TreasuryConfig {
    fn default() -> Self {
        Self {
            scope: "treasury".to_string(),
            owner: "treasury-owner".to_string(),
            initial_balance: 10_000,
        }
    }
}

impl ZkacConfig {
    /// Load from `path`, or defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            tracing::debug!("no config file given; using defaults");
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&text)
            .with_context(|| format!("failed to parse config: {}", path.display()))?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Effective proof policy, honoring `ZKAC_PROOF_POLICY`.
    pub fn proof_policy(&self) -> Result<ProofPolicy, PolicyError> {
        self.proof_policy_with(std::env::var(POLICY_ENV_VAR).ok().as_deref())
    }

    /// Effective proof policy given an explicit env value. An unrecognized
    /// env value is an error and never replaces the file's mode.
    pub fn proof_policy_with(&self, env_value: Option<&str>) -> Result<ProofPolicy, PolicyError> {
        match (env_value, self.policy) {
            (Some(v), _) => ProofPolicy::from_env_value(Some(v)),
            (None, Some(mode)) => Ok(ProofPolicy::new(mode)),
            (None, None) => Ok(ProofPolicy::build_default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const PK: &str = "3b6a27bcceb6a42d62a3a8d02a6f0d73653215771de243a63ac048a18b59da29";

    fn write(text: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(text.as_bytes()).unwrap();
        f
    }

    #[test]
    fn full_config_parses() {
        let f = write(&format!(
            "policy: production\nverifier:\n  backend: circuit_backed\n  attester_public_key: {PK}\ntreasury:\n  scope: vault\n  owner: alice\n  initial_balance: 42\n"
        ));
        let config = ZkacConfig::load(Some(f.path())).unwrap();
        assert_eq!(config.policy, Some(PolicyMode::Production));
        assert_eq!(config.treasury.scope, "vault");
        assert_eq!(config.treasury.initial_balance, 42);
        assert!(matches!(config.verifier, Some(VerifierConfig::CircuitBacked { .. })));
    }

    #[test]
    fn missing_path_gives_defaults() {
        let config = ZkacConfig::load(None).unwrap();
        assert_eq!(config.treasury, TreasuryConfig::default());
        assert!(config.verifier.is_none());
    }

    #[test]
    fn short_attester_key_is_rejected() {
        let f = write("verifier:\n  backend: circuit_backed\n  attester_public_key: abcd\n");
        assert!(ZkacConfig::load(Some(f.path())).is_err());
    }

    #[test]
    fn unknown_field_is_rejected() {
        let f = write("treasury:\n  balance: 5\n");
        assert!(ZkacConfig::load(Some(f.path())).is_err());
    }

    #[test]
    fn env_overrides_file_policy() {
        let config = ZkacConfig {
            policy: Some(PolicyMode::Development),
            ..Default::default()
        };
        assert_eq!(
            config.proof_policy_with(Some("production")).unwrap().mode(),
            PolicyMode::Production
        );
        assert_eq!(config.proof_policy_with(None).unwrap().mode(), PolicyMode::Development);
    }

    #[test]
    fn misspelled_env_policy_cannot_downgrade_production_file() {
        let config = ZkacConfig {
            policy: Some(PolicyMode::Production),
            ..Default::default()
        };
        assert_eq!(
            config.proof_policy_with(Some("producton")),
            Err(PolicyError::UnknownMode {
                value: "producton".to_string()
            })
        );
        assert_eq!(
            config.proof_policy_with(None).unwrap().mode(),
            PolicyMode::Production
        );
    }
}

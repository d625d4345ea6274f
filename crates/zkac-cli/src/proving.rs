//! # Proof Subcommands
//!
//! - `zkac root` prints the membership root of a members file.
//! - `zkac prove` evaluates the membership circuit for one member and one
//!   treasury withdrawal and writes a proof bundle.
//! - `zkac verify` checks a bundle with the configured verifier (or an
//!   attester public key given by `--attester-pub`), exactly as
//!   the treasury would, without consuming anything.
//!
//! A members file is YAML:
//!
//! ```yaml
//! members:
//!   - <64 hex chars: identity commitment>
//! ```

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;
use serde::{Deserialize, Serialize};

use zkac_core::{hex, ActionDescriptor, Proof, PublicInputs};
use zkac_treasury::WITHDRAW_OPERATION;
use zkac_zkp::{
    build_verifier, CircuitProvingKey, MembershipProver, MembershipTree, VerifierConfig, MEMBERSHIP_CIRCUIT_ID,
};

use crate::config::ZkacConfig;
use crate::keys::{read_attester_key, read_member_secret, read_public_key};

/// Published identity commitments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembersFile {
    /// Commitments in leaf order.
    pub members: Vec<String>,
}

impl MembersFile {
    /// Read and parse a members file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read members file: {}", path.display()))?;
        serde_yaml::from_str(&text).with_context(|| format!("failed to parse members file: {}", path.display()))
    }

    /// Build the membership tree.
    pub fn tree(&self) -> Result<MembershipTree> {
        let commitments = self
            .members
            .iter()
            .enumerate()
            .map(|(i, c)| {
                hex::decode_fixed::<32>("commitment", c).with_context(|| format!("members[{i}] is not a commitment"))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(MembershipTree::from_commitments(&commitments)?)
    }
}

/// A proof and the public inputs it attests to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofBundle {
    /// Encoded proof.
    pub proof: Proof,
    /// `(root, action_hash, nullifier)`.
    pub public_inputs: PublicInputs,
}

impl ProofBundle {
    /// Read a bundle from JSON.
    pub fn load(path: &Path) -> Result<Self> {
        let text =
            std::fs::read_to_string(path).with_context(|| format!("failed to read bundle: {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("failed to parse bundle: {}", path.display()))
    }
}

/// Arguments for `zkac root`.
#[derive(Args, Debug)]
pub struct RootArgs {
    /// Members file.
    #[arg(long)]
    pub members: PathBuf,
}

/// Arguments for `zkac prove`.
#[derive(Args, Debug)]
pub struct ProveArgs {
    /// Attester private key file.
    #[arg(long)]
    pub attester_key: PathBuf,
    /// Members file.
    #[arg(long)]
    pub members: PathBuf,
    /// Member secret file.
    #[arg(long)]
    pub secret: PathBuf,
    /// Withdrawal amount the proof is bound to.
    #[arg(long)]
    pub amount: u64,
    /// Output bundle path; stdout if omitted.
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

/// Arguments for `zkac verify`.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Proof bundle to check.
    #[arg(value_name = "BUNDLE")]
    pub bundle: PathBuf,
    /// Withdrawal amount to check the bundle against.
    #[arg(long)]
    pub amount: u64,
    /// Attester public key file; overrides the config's `verifier` section.
    #[arg(long, value_name = "PATH")]
    pub attester_pub: Option<PathBuf>,
}

/// Print the membership root.
pub fn run_root(args: &RootArgs) -> Result<u8> {
    let tree = MembersFile::load(&args.members)?.tree()?;
    println!("{}", tree.root()?);
    Ok(0)
}

/// Produce a proof bundle.
pub fn run_prove(args: &ProveArgs, config: &ZkacConfig) -> Result<u8> {
    let tree = MembersFile::load(&args.members)?.tree()?;
    let secret = read_member_secret(&args.secret)?;
    let prover = MembershipProver::new(CircuitProvingKey::membership(read_attester_key(&args.attester_key)?));

    let action = ActionDescriptor::new(config.treasury.scope.clone(), WITHDRAW_OPERATION, args.amount);
    let (proof, public_inputs) = prover
        .prove_in(&tree, &secret, action.action_hash()?)
        .with_context(|| format!("cannot prove {action}"))?;
    tracing::info!(%action, nullifier = ?public_inputs.nullifier, "proof produced");

    let json = serde_json::to_string_pretty(&ProofBundle { proof, public_inputs })?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, json).with_context(|| format!("failed to write bundle: {}", path.display()))?;
            println!("OK: wrote proof bundle to {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(0)
}

/// Check a bundle against the configured verifier. Exit code 2 on an
/// invalid proof.
pub fn run_verify(args: &VerifyArgs, config: &ZkacConfig) -> Result<u8> {
    let verifier_config = match (&args.attester_pub, &config.verifier) {
        (Some(path), _) => VerifierConfig::CircuitBacked {
            circuit_id: MEMBERSHIP_CIRCUIT_ID.to_string(),
            attester_public_key: read_public_key(path)?,
        },
        (None, Some(configured)) => configured.clone(),
        (None, None) => bail!("verify requires --attester-pub or a `verifier` section in the config file"),
    };
    let verifier = build_verifier(&verifier_config, &config.proof_policy()?)?;
    let bundle = ProofBundle::load(&args.bundle)?;

    let action = ActionDescriptor::new(config.treasury.scope.clone(), WITHDRAW_OPERATION, args.amount);
    let mut inputs = bundle.public_inputs;
    inputs.action_hash = action.action_hash()?;

    if verifier.verify(&bundle.proof, &inputs) {
        println!("VALID: proof attests to {action} under root {}", inputs.root);
        Ok(0)
    } else {
        println!("INVALID: proof does not attest to {action}");
        Ok(2)
    }
}

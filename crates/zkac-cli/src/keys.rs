//! # Key Subcommands
//!
//! `zkac keygen` writes an attester (circuit evaluator) Ed25519 key pair.
//! `zkac member` writes a fresh member secret and prints its identity
//! commitment, which the administrator adds to the members file.
//!
//! Key files hold lowercase hex, nothing else. Secret files are written
//! owner-only (`0600`) on Unix.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use zkac_core::hex;
use zkac_crypto::{Ed25519KeyPair, Ed25519PublicKey};
use zkac_zkp::{identity_commitment, MemberSecret};

/// Arguments for `zkac keygen`.
#[derive(Args, Debug)]
pub struct KeygenArgs {
    /// Output directory for the key files.
    #[arg(long, short, default_value = ".")]
    pub output: PathBuf,
    /// Prefix for the key filenames.
    #[arg(long, default_value = "attester")]
    pub prefix: String,
}

/// Arguments for `zkac member`.
#[derive(Args, Debug)]
pub struct MemberArgs {
    /// Output directory for the secret file.
    #[arg(long, short, default_value = ".")]
    pub output: PathBuf,
    /// Member name, used as the filename.
    #[arg(long)]
    pub name: String,
}

/// Generate an attester key pair.
pub fn run_keygen(args: &KeygenArgs) -> Result<u8> {
    create_dir(&args.output)?;
    let kp = Ed25519KeyPair::generate();

    let key_path = args.output.join(format!("{}.key", args.prefix));
    let pub_path = args.output.join(format!("{}.pub", args.prefix));
    write_secret_hex(&key_path, &hex::encode(&kp.seed()))?;
    write_hex(&pub_path, &kp.public_key().to_hex())?;

    println!("OK: generated attester key pair");
    println!("  Private key: {}", key_path.display());
    println!("  Public key:  {}", pub_path.display());
    println!("  {}", kp.public_key());
    Ok(0)
}

/// Generate a member secret.
pub fn run_member(args: &MemberArgs) -> Result<u8> {
    create_dir(&args.output)?;
    let secret = MemberSecret::generate();
    let path = args.output.join(format!("{}.secret", args.name));
    write_secret_hex(&path, &secret.to_hex())?;

    println!("OK: generated member secret");
    println!("  Secret:     {}", path.display());
    println!("  Commitment: {}", hex::encode(&identity_commitment(&secret)));
    Ok(0)
}

/// Read an attester key pair from a seed file.
pub fn read_attester_key(path: &Path) -> Result<Ed25519KeyPair> {
    let text = read_trimmed(path)?;
    let seed = hex::decode_fixed::<32>("attester key", &text)
        .with_context(|| format!("invalid attester key file: {}", path.display()))?;
    Ok(Ed25519KeyPair::from_seed(&seed))
}

/// Read an attester public key file.
pub fn read_public_key(path: &Path) -> Result<Ed25519PublicKey> {
    let text = read_trimmed(path)?;
    Ed25519PublicKey::from_hex(&text).with_context(|| format!("invalid public key file: {}", path.display()))
}

/// Read a member secret file.
pub fn read_member_secret(path: &Path) -> Result<MemberSecret> {
    let text = read_trimmed(path)?;
    MemberSecret::from_hex(&text).with_context(|| format!("invalid member secret file: {}", path.display()))
}

fn read_trimmed(path: &Path) -> Result<String> {
    let text = std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    Ok(text.trim().to_string())
}

fn create_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).with_context(|| format!("failed to create output directory: {}", dir.display()))
}

fn write_hex(path: &Path, hex: &str) -> Result<()> {
    std::fs::write(path, hex).with_context(|| format!("failed to write {}", path.display()))
}

fn write_secret_hex(path: &Path, hex: &str) -> Result<()> {
    let mut options = std::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options
        .open(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    // `mode` only applies on creation; tighten a pre-existing file too.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(std::fs::Permissions::from_mode(0o600))
            .with_context(|| format!("failed to restrict {}", path.display()))?;
    }
    file.write_all(hex.as_bytes())
        .with_context(|| format!("failed to write {}", path.display()))
}

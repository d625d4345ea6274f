//! # zkac-cli - Command-Line Interface
//!
//! ## Subcommands
//!
//! - `keygen`: attester (circuit evaluator) Ed25519 key pair
//! - `member`: fresh member secret and its identity commitment
//! - `root`: membership root of a members file
//! - `prove`: proof bundle for one member and one withdrawal
//! - `verify`: check a bundle with the configured verifier
//! - `demo`: end-to-end treasury scenario with ephemeral keys
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from logic; handlers delegate to the
//!   library crates.
//! - Handlers return `anyhow::Result<u8>`; the `u8` is the exit code.

pub mod config;
pub mod demo;
pub mod keys;
pub mod proving;

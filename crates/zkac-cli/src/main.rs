//! # zkac CLI entry point
//!
//! Parses command-line arguments, loads configuration and dispatches to
//! subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use zkac_cli::config::ZkacConfig;
use zkac_cli::demo::{run_demo, DemoArgs};
use zkac_cli::keys::{run_keygen, run_member, KeygenArgs, MemberArgs};
use zkac_cli::proving::{run_prove, run_root, run_verify, ProveArgs, RootArgs, VerifyArgs};

/// Anonymous, replay-safe authorization toolchain.
#[derive(Parser, Debug)]
#[command(name = "zkac", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to configuration file (YAML).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate an attester Ed25519 key pair.
    Keygen(KeygenArgs),

    /// Generate a member secret and print its identity commitment.
    Member(MemberArgs),

    /// Print the membership root of a members file.
    Root(RootArgs),

    /// Produce a proof bundle for a treasury withdrawal.
    Prove(ProveArgs),

    /// Verify a proof bundle with the configured verifier.
    Verify(VerifyArgs),

    /// Run the end-to-end treasury scenario.
    Demo(DemoArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);
    if cli.json_logs {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "zkac CLI starting");

    let result = ZkacConfig::load(cli.config.as_deref()).and_then(|config| match &cli.command {
        Commands::Keygen(args) => run_keygen(args),
        Commands::Member(args) => run_member(args),
        Commands::Root(args) => run_root(args),
        Commands::Prove(args) => run_prove(args, &config),
        Commands::Verify(args) => run_verify(args, &config),
        Commands::Demo(args) => run_demo(args, &config),
    });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

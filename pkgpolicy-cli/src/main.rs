use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "pkgpolicy", about = "Inspect package manager group policy")]
#[command(version, propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Policy store file (overrides PKGPOLICY_STORE)
    #[arg(long, global = true, value_name = "PATH")]
    store: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show every toggle policy and its state
    Toggles,
    /// Show every value policy and its resolved value
    Values,
    /// List sources declared by a source list policy
    Sources(commands::sources::SourcesArgs),
    /// Validate a certificate chain against a source's pins
    VerifyChain(commands::sources::VerifyChainArgs),
    /// Show the resolved policy store path
    Path,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let store_path = config::StoreLocator::resolve(cli.store)?;

    match cli.command {
        Commands::Toggles => commands::policy::run_toggles(&store_path),
        Commands::Values => commands::policy::run_values(&store_path),
        Commands::Sources(args) => commands::sources::run_sources(&store_path, args),
        Commands::VerifyChain(args) => commands::sources::run_verify_chain(&store_path, args),
        Commands::Path => commands::policy::run_path(&store_path),
    }
}

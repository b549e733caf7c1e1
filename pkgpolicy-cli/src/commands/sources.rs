//! Source list commands
//!
//! Lists administrator-declared sources and checks certificate chains
//! against their pins.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use clap::{Args, ValueEnum};
use pkgpolicy_core::{
    AdditionalSources, AllowedSources, GroupPolicy, PinningChain, PolicyStore, SourceFromPolicy,
};

use crate::config::load_policy;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SourceList {
    /// Sources added on top of the user's own
    Additional,
    /// The only sources users may add
    Allowed,
}

impl SourceList {
    fn key_name(self) -> &'static str {
        match self {
            Self::Additional => "AdditionalSources",
            Self::Allowed => "AllowedSources",
        }
    }

    fn read<S: PolicyStore>(self, policy: &GroupPolicy<S>) -> Option<Vec<SourceFromPolicy>> {
        match self {
            Self::Additional => policy.get_value::<AdditionalSources>(),
            Self::Allowed => policy.get_value::<AllowedSources>(),
        }
    }
}

#[derive(Args)]
pub struct SourcesArgs {
    /// Which source list policy to read
    #[arg(value_enum)]
    pub list: SourceList,

    /// Print each source as exported JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct VerifyChainArgs {
    /// Which source list policy declares the source
    #[arg(value_enum)]
    pub list: SourceList,

    /// Source name
    pub source: String,

    /// DER certificate files, root first and leaf last
    #[arg(required = true)]
    pub certificates: Vec<PathBuf>,
}

pub fn run_sources(store_path: &Path, args: SourcesArgs) -> Result<()> {
    let policy = load_policy(store_path)?;

    let Some(sources) = args.list.read(&policy) else {
        println!("{} is not configured", args.list.key_name());
        return Ok(());
    };

    if args.json {
        for source in &sources {
            println!("{}", source.to_json_string()?);
        }
        return Ok(());
    }

    if sources.is_empty() {
        println!("{} is configured with no valid sources", args.list.key_name());
        return Ok(());
    }

    for source in &sources {
        print_source(source);
    }
    Ok(())
}

pub fn run_verify_chain(store_path: &Path, args: VerifyChainArgs) -> Result<()> {
    let policy = load_policy(store_path)?;
    let source = find_source(&policy, args.list, &args.source)?;

    let chain = args
        .certificates
        .iter()
        .map(|path| {
            std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
        })
        .collect::<Result<Vec<_>>>()?;

    verify(&policy, &source, &chain)?;

    if source.pinning_configuration.is_empty() {
        println!("Source '{}' declares no pins; any chain is accepted", source.name);
    } else {
        println!("Certificate chain matches the pins for '{}'", source.name);
    }
    Ok(())
}

fn find_source<S: PolicyStore>(
    policy: &GroupPolicy<S>,
    list: SourceList,
    name: &str,
) -> Result<SourceFromPolicy> {
    let sources = list
        .read(policy)
        .ok_or_else(|| anyhow!("{} is not configured", list.key_name()))?;

    sources
        .into_iter()
        .find(|source| source.name == name)
        .ok_or_else(|| anyhow!("No source named '{}' in {}", name, list.key_name()))
}

fn verify<S: PolicyStore>(
    policy: &GroupPolicy<S>,
    source: &SourceFromPolicy,
    chain: &[Vec<u8>],
) -> Result<()> {
    if !source
        .pinning_configuration
        .validate_der(chain, policy.certificate_parser())
    {
        tracing::debug!(source = %source.name, length = chain.len(), "Pinning validation failed");
        bail!("Certificate chain does not match the pins for '{}'", source.name);
    }
    Ok(())
}

fn print_source(source: &SourceFromPolicy) {
    println!("{}", source.name);
    println!("  Type:        {}", source.source_type);
    println!("  Arg:         {}", source.arg);
    if !source.data.is_empty() {
        println!("  Data:        {}", source.data);
    }
    println!("  Identifier:  {}", source.identifier);
    println!("  Trust:       {}", source.trust_level.join(", "));
    println!("  Explicit:    {}", if source.explicit { "yes" } else { "no" });
    for (index, chain) in source.pinning_configuration.chains().iter().enumerate() {
        println!("  Pinning {}:   {}", index, describe_chain(chain));
    }
    println!();
}

fn describe_chain(chain: &PinningChain) -> String {
    chain
        .details()
        .iter()
        .map(|details| {
            let modes: Vec<_> = details.validations().iter().map(|mode| mode.as_str()).collect();
            format!("{} [{}]", details.certificate().subject_name(), modes.join(","))
        })
        .collect::<Vec<_>>()
        .join(" -> ")
}

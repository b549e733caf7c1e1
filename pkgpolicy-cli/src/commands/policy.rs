//! Policy overview commands

use std::path::Path;

use anyhow::Result;
use pkgpolicy_core::{PolicyCatalog, PolicyValue};

use crate::config::load_policy;

pub fn run_toggles(store_path: &Path) -> Result<()> {
    let policy = load_policy(store_path)?;

    println!("  {:50} {:14}  {}", "Policy", "State", "Key");
    println!("  {:50} {:14}  {}", "─".repeat(50), "─".repeat(14), "─".repeat(30));
    for descriptor in PolicyCatalog::all_policies() {
        let state = policy.get_state(descriptor.policy);
        println!(
            "  {:50} {:14}  {}",
            descriptor.display_name,
            state.as_str(),
            descriptor.key_name
        );
    }
    Ok(())
}

pub fn run_values(store_path: &Path) -> Result<()> {
    let policy = load_policy(store_path)?;

    for descriptor in PolicyCatalog::value_policies() {
        let value = match policy.value_of(descriptor.id) {
            Some(value) => describe(&value),
            None => "<not configured>".to_string(),
        };
        println!("  {:28} {}", descriptor.key_name, value);
    }
    Ok(())
}

pub fn run_path(store_path: &Path) -> Result<()> {
    let status = if store_path.exists() { "" } else { " (not found)" };
    println!("Policy store: {}{}", store_path.display(), status);
    Ok(())
}

fn describe(value: &PolicyValue) -> String {
    match value {
        PolicyValue::Integer(n) => n.to_string(),
        PolicyValue::String(s) => s.clone(),
        PolicyValue::Sources(sources) => match sources.len() {
            1 => "1 source".to_string(),
            n => format!("{} sources", n),
        },
    }
}

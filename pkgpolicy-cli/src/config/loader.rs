use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use pkgpolicy_core::{GroupPolicy, MemoryStore, load_store_from_file};

/// Environment variable naming the policy store file
pub const STORE_ENV_VAR: &str = "PKGPOLICY_STORE";

pub struct StoreLocator;

impl StoreLocator {
    /// Resolve the store path: flag, then environment, then user config dir
    pub fn resolve(flag: Option<PathBuf>) -> Result<PathBuf> {
        let env = std::env::var_os(STORE_ENV_VAR).map(PathBuf::from);
        Self::pick(flag, env, Self::user_store_path())
            .ok_or_else(|| anyhow!("No policy store: pass --store or set {}", STORE_ENV_VAR))
    }

    /// Get user store path (platform-specific)
    pub fn user_store_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "pkgpolicy").map(|dirs| dirs.config_dir().join("policies.toml"))
    }

    fn pick(
        flag: Option<PathBuf>,
        env: Option<PathBuf>,
        user: Option<PathBuf>,
    ) -> Option<PathBuf> {
        flag.or(env.filter(|path| !path.as_os_str().is_empty())).or(user)
    }
}

/// Bind group policy to the store at `path`
///
/// A missing file means no policy is configured.
pub fn load_policy(path: &Path) -> Result<GroupPolicy<MemoryStore>> {
    if !path.exists() {
        tracing::info!(path = %path.display(), "Policy store not found, no policies configured");
        return Ok(GroupPolicy::new(MemoryStore::new()));
    }

    let store = load_store_from_file(path)
        .with_context(|| format!("Failed to load policy store {}", path.display()))?;
    Ok(GroupPolicy::new(store))
}

//! Storage path resolution
//!
//! Resolves the stable on-disk roots for profile storage and cache data.
//! Volatile mounts can drop session state across reboots, so candidates
//! under them fall back to home-anchored defaults.

use std::path::{Path, PathBuf};

/// Directory name appended to the platform data and cache roots.
pub const PROFILE_DIR_NAME: &str = "axon-desktop";

const VOLATILE_PREFIXES: &[&str] = &["/tmp", "/run/", "/var/tmp"];

/// Stable roots for profile storage and cache data, resolved once at
/// startup and immutable for the process lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfilePaths {
    pub storage_root: PathBuf,
    pub cache_root: PathBuf,
}

impl ProfilePaths {
    /// Resolve the platform-default roots.
    pub fn resolve() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::from_candidates(dirs::data_local_dir(), dirs::cache_dir(), &home)
    }

    /// Resolution against explicit candidates; `resolve` feeds in the
    /// platform directories.
    pub fn from_candidates(
        data_dir: Option<PathBuf>,
        cache_dir: Option<PathBuf>,
        home: &Path,
    ) -> Self {
        let storage_root =
            stable_root(data_dir, home.join(".local").join("share")).join(PROFILE_DIR_NAME);
        let cache_root = stable_root(cache_dir, home.join(".cache")).join(PROFILE_DIR_NAME);

        Self {
            storage_root,
            cache_root,
        }
    }
}

fn stable_root(candidate: Option<PathBuf>, fallback: PathBuf) -> PathBuf {
    match candidate {
        Some(path) if !is_volatile(&path) => path,
        _ => fallback,
    }
}

fn is_volatile(path: &Path) -> bool {
    let path = path.to_string_lossy();
    VOLATILE_PREFIXES
        .iter()
        .any(|prefix| path.starts_with(prefix))
}

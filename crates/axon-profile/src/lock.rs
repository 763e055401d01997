//! Profile locking
//!
//! One process owns the persistent profile at a time. Ownership is an OS
//! advisory lock on a file inside the storage root: the kernel drops it
//! when the owning process dies, so a stale lock file left by a crash
//! never wedges the next start. Contended starts degrade to isolated
//! per-process paths instead of waiting or aborting.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::paths::ProfilePaths;

/// Lock file name inside the primary storage root.
pub const LOCK_FILE_NAME: &str = "profile.lock";

/// Resolved storage locations for this process.
///
/// The isolated pair is set only when the primary profile was locked by
/// another live process. Isolated profiles are fully functional but never
/// merge back into the primary profile and are not cleaned up here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageRoots {
    pub primary_storage_path: PathBuf,
    pub primary_cache_path: PathBuf,
    pub isolated_storage_path: Option<PathBuf>,
    pub isolated_cache_path: Option<PathBuf>,
}

impl StorageRoots {
    /// Storage path this process should actually write to.
    pub fn active_storage_path(&self) -> &Path {
        self.isolated_storage_path
            .as_deref()
            .unwrap_or(&self.primary_storage_path)
    }

    /// Cache path this process should actually write to.
    pub fn active_cache_path(&self) -> &Path {
        self.isolated_cache_path
            .as_deref()
            .unwrap_or(&self.primary_cache_path)
    }

    pub fn is_isolated(&self) -> bool {
        self.isolated_storage_path.is_some()
    }
}

/// Holds the exclusive profile lock for the process lifetime.
///
/// There is no explicit unlock: dropping the manager (or process exit)
/// releases the lock.
#[derive(Default)]
pub struct ProfileLockManager {
    // Keeps the advisory lock held while the handle is alive.
    lock: Option<File>,
}

impl ProfileLockManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn holds_primary_lock(&self) -> bool {
        self.lock.is_some()
    }

    /// Resolve the storage roots this process may use.
    ///
    /// Attempts a zero-wait exclusive lock on the primary storage root.
    /// Any failure to take it, contention included, degrades to isolated
    /// per-process paths; directory creation is best-effort throughout and
    /// never aborts startup.
    pub fn acquire_storage_roots(&mut self, paths: &ProfilePaths) -> StorageRoots {
        ensure_dir(&paths.storage_root);
        ensure_dir(&paths.cache_root);

        let lock_path = paths.storage_root.join(LOCK_FILE_NAME);
        match try_lock(&lock_path) {
            Ok(file) => {
                self.lock = Some(file);

                tracing::info!(
                    storage = %paths.storage_root.display(),
                    cache = %paths.cache_root.display(),
                    "acquired primary profile storage"
                );

                StorageRoots {
                    primary_storage_path: paths.storage_root.clone(),
                    primary_cache_path: paths.cache_root.clone(),
                    isolated_storage_path: None,
                    isolated_cache_path: None,
                }
            }
            Err(error) => {
                tracing::warn!(
                    path = %lock_path.display(),
                    %error,
                    "profile storage lock is held by another process, using isolated profile paths"
                );

                let suffix = isolated_suffix();
                let isolated_storage = paths.storage_root.join(&suffix);
                let isolated_cache = paths.cache_root.join(&suffix);
                ensure_dir(&isolated_storage);
                ensure_dir(&isolated_cache);

                StorageRoots {
                    primary_storage_path: paths.storage_root.clone(),
                    primary_cache_path: paths.cache_root.clone(),
                    isolated_storage_path: Some(isolated_storage),
                    isolated_cache_path: Some(isolated_cache),
                }
            }
        }
    }
}

fn try_lock(lock_path: &Path) -> std::io::Result<File> {
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(false)
        .open(lock_path)?;
    file.try_lock_exclusive()?;
    Ok(file)
}

fn isolated_suffix() -> String {
    format!(
        "isolated-{}-{}",
        std::process::id(),
        chrono::Utc::now().timestamp_millis()
    )
}

/// Best-effort directory creation; failures are reported, never fatal.
fn ensure_dir(path: &Path) {
    if let Err(error) = std::fs::create_dir_all(path) {
        tracing::warn!(path = %path.display(), %error, "failed to create profile directory");
    }
}

//! Shell state container
//!
//! Owns the process-wide privileged state: the storage roots and profile
//! lock, the bridge channel with its per-process prefix, and the flush
//! controller. Collaborators receive what they need explicitly; there is
//! no ambient global. Lifecycle is process start to process termination.

use std::sync::Arc;

use axon_bridge::{BridgeChannel, ClipboardCommitter, ClipboardWriter};
use axon_profile::{FlushController, FlushSink, ProfileLockManager, ProfilePaths, StorageRoots};

use crate::config::Config;

pub struct Shell {
    config: Config,
    storage_roots: StorageRoots,
    /// Held for the process lifetime; dropping would release the profile.
    lock_manager: ProfileLockManager,
    bridge: BridgeChannel,
    flush: FlushController,
}

impl Shell {
    /// Wire the shell: take the profile lock (or degrade to isolated
    /// paths), build the bridge channel with a fresh per-process prefix,
    /// and arm the flush controller.
    pub fn new(
        config: Config,
        paths: &ProfilePaths,
        runtime: tokio::runtime::Handle,
        clipboard: Arc<dyn ClipboardWriter>,
        flush_sink: Arc<dyn FlushSink>,
    ) -> Self {
        let mut lock_manager = ProfileLockManager::new();
        let storage_roots = lock_manager.acquire_storage_roots(paths);

        let committer = ClipboardCommitter::new(runtime.clone(), clipboard);
        let bridge = BridgeChannel::new(committer);
        let flush = FlushController::with_intervals(
            runtime,
            flush_sink,
            config.flush_debounce(),
            config.shutdown_flush_wait(),
        );

        tracing::info!(
            storage = %storage_roots.active_storage_path().display(),
            cache = %storage_roots.active_cache_path().display(),
            isolated = storage_roots.is_isolated(),
            "Shell initialized"
        );

        Self {
            config,
            storage_roots,
            lock_manager,
            bridge,
            flush,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn storage_roots(&self) -> &StorageRoots {
        &self.storage_roots
    }

    pub fn bridge(&self) -> &BridgeChannel {
        &self.bridge
    }

    pub fn flush_controller(&self) -> &FlushController {
        &self.flush
    }

    pub fn holds_primary_profile(&self) -> bool {
        self.lock_manager.holds_primary_lock()
    }
}

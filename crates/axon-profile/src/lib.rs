//! AXON Profile
//!
//! Lifecycle of the persistent browsing profile: stable storage path
//! resolution, cross-process ownership via an advisory lock with an
//! isolated-path fallback, and debounced flush scheduling with a bounded
//! final flush at shutdown.

mod flush;
mod lock;
mod paths;

pub use flush::{FlushController, FlushSink, DEBOUNCE_INTERVAL, SHUTDOWN_FLUSH_WAIT};
pub use lock::{ProfileLockManager, StorageRoots, LOCK_FILE_NAME};
pub use paths::{ProfilePaths, PROFILE_DIR_NAME};

//! AXON Core
//!
//! Central coordination layer for the AXON shell: configuration, the
//! privileged state container, and process-wide logging.

mod config;
mod downloads;
mod error;
mod shell;

pub use config::Config;
pub use downloads::{resolve_save_path, sanitize_file_name};
pub use error::CoreError;
pub use shell::Shell;

// Re-export core components
pub use axon_bridge::{
    BridgeChannel, BridgeResponse, ClipboardCommitter, ClipboardTarget, ClipboardWriter,
    PayloadError,
};
pub use axon_profile::{
    FlushController, FlushSink, ProfileLockManager, ProfilePaths, StorageRoots,
};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}

//! Application state management
use axon_core::Shell;
use std::sync::Arc;

/// Thread-safe application state wrapper
pub struct AppState {
    shell: Arc<Shell>,
}

impl AppState {
    pub fn new(shell: Shell) -> Self {
        Self {
            shell: Arc::new(shell),
        }
    }

    pub fn shell(&self) -> &Shell {
        &self.shell
    }
}

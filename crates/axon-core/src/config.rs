//! Shell configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// URL the content webview loads at startup
    pub start_url: String,
    /// Main window title
    pub window_title: String,
    /// Initial window size
    pub window_width: f64,
    pub window_height: f64,
    /// Directory accepted downloads land in
    pub download_dir: PathBuf,
    /// Quiet interval before a persistence flush, in milliseconds
    pub flush_debounce_ms: u64,
    /// Bounded shutdown wait for asynchronous writes, in milliseconds
    pub shutdown_flush_wait_ms: u64,
}

impl Config {
    pub fn new() -> Self {
        let download_dir = dirs::download_dir().unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("Downloads")
        });

        Self {
            start_url: "https://chatgpt.com".to_string(),
            window_title: "AXON".to_string(),
            window_width: 1000.0,
            window_height: 700.0,
            download_dir,
            flush_debounce_ms: 1200,
            shutdown_flush_wait_ms: 250,
        }
    }

    pub fn flush_debounce(&self) -> Duration {
        Duration::from_millis(self.flush_debounce_ms)
    }

    pub fn shutdown_flush_wait(&self) -> Duration {
        Duration::from_millis(self.shutdown_flush_wait_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

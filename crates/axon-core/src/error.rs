//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Download target unavailable: {0}")]
    DownloadTarget(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

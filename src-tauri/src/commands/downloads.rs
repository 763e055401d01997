//! Download acceptance
//!
//! The rendering engine performs the transfer; the host only picks a safe
//! destination or cancels. Suggested names never escape the configured
//! download directory.

use std::path::{Path, PathBuf};

use axon_core::Shell;

/// Decide the destination for a requested download.
///
/// `suggested` is whatever the engine derived from the response headers.
/// It is reduced to a non-empty file name under the configured download
/// directory; `None` cancels the download.
pub fn accept_download(shell: &Shell, url: &url::Url, suggested: &Path) -> Option<PathBuf> {
    let suggested_name = suggested
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("download");

    match axon_core::resolve_save_path(&shell.config().download_dir, suggested_name) {
        Ok(path) => {
            tracing::info!(url = %url, path = %path.display(), "accepting download");
            Some(path)
        }
        Err(error) => {
            // Explicit diagnostics prevent silently failed downloads
            tracing::warn!(url = %url, %error, "cancelling download");
            None
        }
    }
}

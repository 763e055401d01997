//! Download save-path handling
//!
//! The rendering engine performs the transfer; the host only decides where
//! it may land. Suggested names are reduced to a non-empty final path
//! component and the target directory must exist before acceptance.

use std::path::{Path, PathBuf};

use crate::error::CoreError;
use crate::Result;

/// Reduce a suggested file name to a safe final path component.
pub fn sanitize_file_name(file_name: &str) -> String {
    let name = Path::new(file_name)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("download")
        .trim();

    if name.is_empty() {
        "download".to_string()
    } else {
        name.to_string()
    }
}

/// Resolve the on-disk target for a download, creating the target
/// directory if needed.
pub fn resolve_save_path(download_dir: &Path, suggested_name: &str) -> Result<PathBuf> {
    let file_name = sanitize_file_name(suggested_name);

    std::fs::create_dir_all(download_dir).map_err(|error| {
        CoreError::DownloadTarget(format!("{}: {error}", download_dir.display()))
    })?;

    Ok(download_dir.join(file_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("report.pdf"), "report.pdf");
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("dir/notes.txt"), "notes.txt");

        // Degenerate suggestions get the fallback name
        assert_eq!(sanitize_file_name(""), "download");
        assert_eq!(sanitize_file_name("   "), "download");
        assert_eq!(sanitize_file_name(".."), "download");
        assert_eq!(sanitize_file_name("/"), "download");
    }

    #[test]
    fn test_resolve_save_path_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested").join("downloads");

        let path = resolve_save_path(&target, "file.zip").unwrap();
        assert_eq!(path, target.join("file.zip"));
        assert!(target.is_dir());
    }

    #[test]
    fn test_resolve_save_path_rejects_unwritable_directory() {
        let dir = tempfile::tempdir().unwrap();

        // A file where the download dir should be makes creation fail
        let blocked = dir.path().join("downloads");
        std::fs::write(&blocked, b"not a directory").unwrap();

        let result = resolve_save_path(&blocked, "file.zip");
        assert!(matches!(result, Err(CoreError::DownloadTarget(_))));
    }
}

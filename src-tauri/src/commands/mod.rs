//! Tauri IPC Commands
//!
//! The guest-facing surface is intentionally narrow: one clipboard-bridge
//! call plus the download acceptance path. Everything else the content
//! webview does stays inside the rendering engine.

pub mod bridge;
pub mod downloads;

/// Label of the content webview inside the main window.
pub const CONTENT_WEBVIEW_LABEL: &str = "content";

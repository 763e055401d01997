//! Profile flush trigger
//!
//! The engine persists cookies and site data on its own schedule; the
//! flush controller decides when to nudge it. Touching the cookie store
//! pushes pending writes through its IO path, which is all the nudge can
//! be — there is no synchronous flush call to make.

use axon_core::FlushSink;
use tauri::{AppHandle, Manager};

use crate::commands::CONTENT_WEBVIEW_LABEL;

pub struct WebviewFlushSink {
    app: AppHandle,
}

impl WebviewFlushSink {
    pub fn new(app: AppHandle) -> Self {
        Self { app }
    }
}

impl FlushSink for WebviewFlushSink {
    fn trigger_flush(&self) {
        let Some(webview) = self.app.get_webview(CONTENT_WEBVIEW_LABEL) else {
            tracing::debug!("content webview not available for profile flush");
            return;
        };

        match webview.cookies() {
            Ok(cookies) => {
                tracing::debug!(cookie_count = cookies.len(), "triggered profile flush");
            }
            Err(error) => {
                tracing::debug!(%error, "profile flush trigger failed");
            }
        }
    }
}

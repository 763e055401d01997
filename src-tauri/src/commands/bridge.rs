//! Clipboard bridge command
//!
//! The single guest call-and-wait surface. Prefix-matched traffic is
//! always answered with one of the fixed wire strings, whatever the
//! validation outcome; `None` tells the caller the message was not bridge
//! traffic and default handling applies, untouched.

use tauri::{State, Webview};

use crate::state::AppState;

#[tauri::command]
pub fn bridge_prompt(
    webview: Webview,
    state: State<AppState>,
    origin: String,
    message: String,
) -> Option<&'static str> {
    // The top-level page host backs trust decisions when the claimed
    // origin is a frame-transition artifact
    let page_host = webview
        .url()
        .ok()
        .and_then(|url| url.host_str().map(|host| host.to_string()))
        .unwrap_or_default();

    state
        .shell()
        .bridge()
        .dispatch(&origin, &page_host, &message)
        .map(|response| response.as_str())
}

//! AXON - Tauri Application
//!
//! The native shell around the embedded service: one window, one content
//! webview, the clipboard bridge installed into every frame, and the
//! persistent profile wired to the flush controller. Rust owns all
//! privileged state; the webview only renders.

mod clipboard;
mod commands;
mod inject;
mod persistence;
mod state;

use std::sync::Arc;

use axon_core::{Config, ProfilePaths, Shell};
use commands::CONTENT_WEBVIEW_LABEL;
use state::AppState;
use tauri::webview::{DownloadEvent, PageLoadEvent, WebviewBuilder};
use tauri::window::WindowBuilder;
use tauri::{
    AppHandle, LogicalPosition, LogicalSize, Manager, RunEvent, WebviewUrl, WindowEvent,
};

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    // Initialize logging
    axon_core::init_logging();

    tauri::Builder::default()
        .setup(|app| {
            let config = Config::default();
            let paths = ProfilePaths::resolve();

            // The debounce, re-assert and shutdown timers all live on
            // tauri's tokio runtime
            let runtime =
                tauri::async_runtime::block_on(async { tokio::runtime::Handle::current() });

            let clipboard_writer = Arc::new(clipboard::NativeClipboard::new(app.handle().clone()));
            let flush_sink = Arc::new(persistence::WebviewFlushSink::new(app.handle().clone()));

            let shell = Shell::new(config, &paths, runtime, clipboard_writer, flush_sink);

            let start_url: url::Url = shell
                .config()
                .start_url
                .parse()
                .map_err(|e| axon_core::CoreError::Config(format!("invalid start URL: {e}")))?;
            let title = shell.config().window_title.clone();
            let (width, height) = (shell.config().window_width, shell.config().window_height);
            let storage_root = shell.storage_roots().active_storage_path().to_path_buf();
            let bridge_script = inject::copy_bridge_script(shell.bridge().prefix());

            // Store state in Tauri
            app.manage(AppState::new(shell));

            let window = WindowBuilder::new(app, "main")
                .title(title)
                .inner_size(width, height)
                .center()
                .build()?;

            let app_handle_for_load = app.handle().clone();
            let app_handle_for_download = app.handle().clone();

            let content = WebviewBuilder::new(
                CONTENT_WEBVIEW_LABEL,
                WebviewUrl::External(start_url),
            )
            .auto_resize()
            .enable_clipboard_access()
            .data_directory(storage_root)
            .initialization_script_for_all_frames(bridge_script.as_str())
            .on_page_load(move |_webview, payload| {
                // A finished navigation settles session credentials;
                // schedule a debounced flush
                if matches!(payload.event(), PageLoadEvent::Finished) {
                    if let Some(state) = app_handle_for_load.try_state::<AppState>() {
                        state.shell().flush_controller().mark_dirty();
                    }
                }
            })
            .on_download(move |_webview, event| {
                if let DownloadEvent::Requested { url, destination } = event {
                    let Some(state) = app_handle_for_download.try_state::<AppState>() else {
                        return false;
                    };
                    return match commands::downloads::accept_download(
                        state.shell(),
                        &url,
                        destination,
                    ) {
                        Some(path) => {
                            *destination = path;
                            true
                        }
                        None => false,
                    };
                }
                true
            });

            let content = window.add_child(
                content,
                LogicalPosition::new(0.0, 0.0),
                LogicalSize::new(width, height),
            )?;
            let _ = content.show();

            tracing::info!("AXON shell started");

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![commands::bridge::bridge_prompt])
        .on_window_event(|window, event| {
            if let WindowEvent::CloseRequested { .. } = event {
                shutdown_flush(window.app_handle());
            }
        })
        .build(tauri::generate_context!())
        .expect("error while building AXON shell")
        .run(|app_handle, event| {
            if let RunEvent::ExitRequested { .. } = event {
                shutdown_flush(app_handle);
            }
        });
}

/// Bounded final flush before termination proceeds.
///
/// Both the close handler and the exit path land here; the controller
/// performs the bounded wait at most once, so the second call is free.
fn shutdown_flush(app: &AppHandle) {
    if let Some(state) = app.try_state::<AppState>() {
        let controller = state.shell().flush_controller().clone();
        tauri::async_runtime::block_on(async move {
            controller.shutdown_flush().await;
        });
    }
}

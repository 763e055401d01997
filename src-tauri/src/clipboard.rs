//! Native clipboard backend
//!
//! arboard drives the OS clipboards. The backends are not safe to use off
//! the UI thread, so every write is marshalled onto it; failures anywhere
//! on this path are swallowed because clipboard access is best-effort.

use arboard::Clipboard;
use axon_core::{ClipboardTarget, ClipboardWriter};
use tauri::AppHandle;

pub struct NativeClipboard {
    app: AppHandle,
}

impl NativeClipboard {
    pub fn new(app: AppHandle) -> Self {
        Self { app }
    }
}

impl ClipboardWriter for NativeClipboard {
    fn write_text(&self, target: ClipboardTarget, text: &str) {
        let text = text.to_string();

        let marshalled = self.app.run_on_main_thread(move || {
            let Ok(mut clipboard) = Clipboard::new() else {
                tracing::debug!("clipboard subsystem unavailable");
                return;
            };

            let result = match target {
                ClipboardTarget::Clipboard => clipboard.set_text(text),
                ClipboardTarget::Selection => set_selection_text(&mut clipboard, text),
            };

            if let Err(error) = result {
                tracing::debug!(%error, "clipboard write failed");
            }
        });

        if let Err(error) = marshalled {
            tracing::debug!(%error, "failed to reach the main thread for clipboard write");
        }
    }
}

#[cfg(target_os = "linux")]
fn set_selection_text(clipboard: &mut Clipboard, text: String) -> Result<(), arboard::Error> {
    use arboard::{LinuxClipboardKind, SetExtLinux};

    // Middle-click paste reads the primary selection
    clipboard
        .set()
        .clipboard(LinuxClipboardKind::Primary)
        .text(text)
}

#[cfg(not(target_os = "linux"))]
fn set_selection_text(_clipboard: &mut Clipboard, _text: String) -> Result<(), arboard::Error> {
    // No selection buffer on this platform
    Ok(())
}

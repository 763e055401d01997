//! Clipboard commit path
//!
//! Validated bridge text lands here. The committer performs one immediate
//! write and one delayed re-assert of the same text so late competing
//! writers lose the race.

use std::sync::Arc;
use std::time::Duration;

/// Delay before the second write of the same text.
pub const REASSERT_DELAY: Duration = Duration::from_millis(150);

/// Which OS clipboard buffer a write addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardTarget {
    /// Standard copy/paste buffer.
    Clipboard,
    /// Middle-click selection buffer, where the platform has one.
    Selection,
}

/// Platform clipboard backend.
///
/// Implementations must marshal every write onto the UI-owning execution
/// context and swallow clipboard subsystem failures; the bridge never
/// observes them.
pub trait ClipboardWriter: Send + Sync {
    fn write_text(&self, target: ClipboardTarget, text: &str);
}

pub struct ClipboardCommitter {
    runtime: tokio::runtime::Handle,
    writer: Arc<dyn ClipboardWriter>,
    reassert_delay: Duration,
}

impl ClipboardCommitter {
    pub fn new(runtime: tokio::runtime::Handle, writer: Arc<dyn ClipboardWriter>) -> Self {
        Self::with_reassert_delay(runtime, writer, REASSERT_DELAY)
    }

    pub fn with_reassert_delay(
        runtime: tokio::runtime::Handle,
        writer: Arc<dyn ClipboardWriter>,
        reassert_delay: Duration,
    ) -> Self {
        Self {
            runtime,
            writer,
            reassert_delay,
        }
    }

    /// Write `text` to both clipboard targets now, and once more after the
    /// re-assert delay. Whitespace-only text is never committed.
    pub fn commit(&self, text: &str) {
        if text.trim().is_empty() {
            return;
        }

        write_both(self.writer.as_ref(), text);

        let writer = Arc::clone(&self.writer);
        let text = text.to_string();
        let delay = self.reassert_delay;
        self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            write_both(writer.as_ref(), &text);
        });
    }
}

fn write_both(writer: &dyn ClipboardWriter, text: &str) {
    writer.write_text(ClipboardTarget::Clipboard, text);
    writer.write_text(ClipboardTarget::Selection, text);
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct RecordingWriter {
        writes: Mutex<Vec<(ClipboardTarget, String)>>,
    }

    impl ClipboardWriter for RecordingWriter {
        fn write_text(&self, target: ClipboardTarget, text: &str) {
            self.writes.lock().push((target, text.to_string()));
        }
    }

    fn committer(writer: Arc<RecordingWriter>) -> ClipboardCommitter {
        ClipboardCommitter::new(tokio::runtime::Handle::current(), writer)
    }

    #[tokio::test(start_paused = true)]
    async fn test_commit_writes_both_targets() {
        let writer = Arc::new(RecordingWriter::default());
        committer(Arc::clone(&writer)).commit("fn main() {}");

        let writes = writer.writes.lock().clone();
        assert_eq!(
            writes,
            vec![
                (ClipboardTarget::Clipboard, "fn main() {}".to_string()),
                (ClipboardTarget::Selection, "fn main() {}".to_string()),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_commit_reasserts_after_delay() {
        let writer = Arc::new(RecordingWriter::default());
        committer(Arc::clone(&writer)).commit("let x = 1;");

        assert_eq!(writer.writes.lock().len(), 2);

        tokio::time::sleep(REASSERT_DELAY + Duration::from_millis(10)).await;

        let writes = writer.writes.lock().clone();
        assert_eq!(writes.len(), 4);
        assert!(writes.iter().all(|(_, text)| text == "let x = 1;"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_whitespace_only_text_is_dropped() {
        let writer = Arc::new(RecordingWriter::default());
        committer(Arc::clone(&writer)).commit("  \n\t ");

        tokio::time::sleep(REASSERT_DELAY * 2).await;
        assert!(writer.writes.lock().is_empty());
    }
}

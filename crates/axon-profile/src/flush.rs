//! Persistence flush scheduling
//!
//! The storage subsystem persists asynchronously on its own schedule; this
//! controller only decides WHEN to nudge it. Mutation bursts coalesce into
//! one debounced flush, and the host's termination sequence gets exactly
//! one bounded final flush.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;

/// Quiet interval after the last mutation before a flush fires. Session
/// cookie churn is high during login and model switches.
pub const DEBOUNCE_INTERVAL: Duration = Duration::from_millis(1200);

/// Bounded window granted to the asynchronous write path during shutdown.
pub const SHUTDOWN_FLUSH_WAIT: Duration = Duration::from_millis(250);

/// Best-effort trigger into the underlying storage subsystem.
pub trait FlushSink: Send + Sync {
    fn trigger_flush(&self);
}

#[derive(Debug, Default)]
struct PersistenceState {
    dirty: bool,
    flush_in_progress: bool,
    shutdown_flush_complete: bool,
}

/// Debounced flush scheduling over an explicit dirty flag.
///
/// All state transitions are expected to happen on the host's UI-owning
/// execution context; the timers below are scheduled continuations on the
/// supplied runtime, not blocking waits.
pub struct FlushController {
    runtime: tokio::runtime::Handle,
    state: Arc<Mutex<PersistenceState>>,
    sink: Arc<dyn FlushSink>,
    debounce_interval: Duration,
    shutdown_wait: Duration,
    debounce_timer: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl FlushController {
    pub fn new(runtime: tokio::runtime::Handle, sink: Arc<dyn FlushSink>) -> Self {
        Self::with_intervals(runtime, sink, DEBOUNCE_INTERVAL, SHUTDOWN_FLUSH_WAIT)
    }

    pub fn with_intervals(
        runtime: tokio::runtime::Handle,
        sink: Arc<dyn FlushSink>,
        debounce_interval: Duration,
        shutdown_wait: Duration,
    ) -> Self {
        Self {
            runtime,
            state: Arc::new(Mutex::new(PersistenceState::default())),
            sink,
            debounce_interval,
            shutdown_wait,
            debounce_timer: Arc::new(Mutex::new(None)),
        }
    }

    /// Record a storage mutation and (re-)arm the debounce timer.
    ///
    /// Bursts coalesce: the flush fires once, a quiet interval after the
    /// LAST event, not the first.
    pub fn mark_dirty(&self) {
        self.state.lock().dirty = true;

        let mut timer = self.debounce_timer.lock();
        if let Some(pending) = timer.take() {
            pending.abort();
        }

        let controller = self.clone();
        *timer = Some(self.runtime.spawn(async move {
            tokio::time::sleep(controller.debounce_interval).await;
            controller.try_flush();
        }));
    }

    /// Final flush for the host's termination sequence.
    ///
    /// Cancels any pending debounce, forces one flush attempt even if no
    /// mutation was ever recorded, then yields a bounded window to the
    /// asynchronous write path. Termination proceeds whether or not the
    /// underlying write finished. Runs at most once; later calls return
    /// immediately.
    pub async fn shutdown_flush(&self) {
        if self.state.lock().shutdown_flush_complete {
            return;
        }

        if let Some(pending) = self.debounce_timer.lock().take() {
            pending.abort();
        }

        // A flush may never have been scheduled; force one regardless
        self.state.lock().dirty = true;
        self.try_flush();

        tokio::time::sleep(self.shutdown_wait).await;
        self.state.lock().shutdown_flush_complete = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.state.lock().dirty
    }

    /// Attempt one flush; a no-op while another flush is in progress or
    /// nothing is dirty.
    fn try_flush(&self) {
        {
            let mut state = self.state.lock();
            if state.flush_in_progress || !state.dirty {
                return;
            }
            state.flush_in_progress = true;
        }

        self.sink.trigger_flush();

        let mut state = self.state.lock();
        state.dirty = false;
        state.flush_in_progress = false;
    }
}

impl Clone for FlushController {
    fn clone(&self) -> Self {
        Self {
            runtime: self.runtime.clone(),
            state: Arc::clone(&self.state),
            sink: Arc::clone(&self.sink),
            debounce_interval: self.debounce_interval,
            shutdown_wait: self.shutdown_wait,
            debounce_timer: Arc::clone(&self.debounce_timer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingSink {
        flushes: AtomicUsize,
    }

    impl FlushSink for CountingSink {
        fn trigger_flush(&self) {
            self.flushes.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn controller(sink: Arc<CountingSink>) -> FlushController {
        FlushController::new(tokio::runtime::Handle::current(), sink)
    }

    #[tokio::test(start_paused = true)]
    async fn test_mutation_burst_coalesces_to_one_flush() {
        let sink = Arc::new(CountingSink::default());
        let controller = controller(Arc::clone(&sink));

        for _ in 0..5 {
            controller.mark_dirty();
        }

        tokio::time::sleep(DEBOUNCE_INTERVAL + Duration::from_millis(100)).await;
        assert_eq!(sink.flushes.load(Ordering::SeqCst), 1);
        assert!(!controller.is_dirty());

        // The single-shot timer does not fire again on its own
        tokio::time::sleep(DEBOUNCE_INTERVAL * 2).await;
        assert_eq!(sink.flushes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_debounce_times_from_last_event() {
        let sink = Arc::new(CountingSink::default());
        let controller = controller(Arc::clone(&sink));

        controller.mark_dirty();
        tokio::time::sleep(Duration::from_millis(800)).await;
        assert_eq!(sink.flushes.load(Ordering::SeqCst), 0);

        // Re-arming pushes the deadline past the original one
        controller.mark_dirty();
        tokio::time::sleep(Duration::from_millis(800)).await;
        assert_eq!(sink.flushes.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(sink.flushes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_flushes_even_when_never_dirty() {
        let sink = Arc::new(CountingSink::default());
        let controller = controller(Arc::clone(&sink));

        controller.shutdown_flush().await;
        assert_eq!(sink.flushes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_bounded_wait_happens_once() {
        let sink = Arc::new(CountingSink::default());
        let controller = controller(Arc::clone(&sink));

        let before = tokio::time::Instant::now();
        controller.shutdown_flush().await;
        controller.shutdown_flush().await;

        // Close handler plus destructor must pay the wait a single time
        assert_eq!(before.elapsed(), SHUTDOWN_FLUSH_WAIT);
        assert_eq!(sink.flushes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_cancels_pending_debounce() {
        let sink = Arc::new(CountingSink::default());
        let controller = controller(Arc::clone(&sink));

        controller.mark_dirty();
        controller.shutdown_flush().await;
        assert_eq!(sink.flushes.load(Ordering::SeqCst), 1);

        // The cancelled timer never fires a second flush
        tokio::time::sleep(DEBOUNCE_INTERVAL * 2).await;
        assert_eq!(sink.flushes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_mutation_after_flush_schedules_another() {
        let sink = Arc::new(CountingSink::default());
        let controller = controller(Arc::clone(&sink));

        controller.mark_dirty();
        tokio::time::sleep(DEBOUNCE_INTERVAL + Duration::from_millis(100)).await;
        assert_eq!(sink.flushes.load(Ordering::SeqCst), 1);

        controller.mark_dirty();
        tokio::time::sleep(DEBOUNCE_INTERVAL + Duration::from_millis(100)).await;
        assert_eq!(sink.flushes.load(Ordering::SeqCst), 2);
    }
}

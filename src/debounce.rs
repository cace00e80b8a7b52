use crate::store::MovieStore;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

/// Quiet interval before a typed query is sent
pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

/// Delays search invocations until input has been idle for `delay`.
///
/// Every input restarts the timer. When it fires, a non-blank query runs
/// `search_movies` and a blank one runs `clear_search`. Only the timer is
/// cancellable: a search that has already been sent runs to completion and
/// the store decides whether its results are still wanted. Dropping the
/// debouncer cancels any pending timer.
pub struct SearchDebouncer {
    store: Arc<MovieStore>,
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl SearchDebouncer {
    pub fn new(store: Arc<MovieStore>) -> Self {
        Self::with_delay(store, DEFAULT_SEARCH_DEBOUNCE)
    }

    pub fn with_delay(store: Arc<MovieStore>, delay: Duration) -> Self {
        Self {
            store,
            delay,
            pending: Mutex::new(None),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Restart the timer for `query`. Must be called inside a tokio runtime.
    pub fn on_input(&self, query: &str) {
        let query = query.trim().to_string();
        let store = self.store.clone();
        let delay = self.delay;

        let mut pending = self.pending.lock();
        if let Some(previous) = pending.take() {
            previous.abort();
        }

        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if query.is_empty() {
                debug!("Debounced input is blank, clearing search");
                store.clear_search();
            } else {
                debug!("Debounced search for '{}'", query);
                // Detached so a later input cannot cancel a request in flight
                tokio::spawn(async move { store.search_movies(&query).await });
            }
        }));
    }

    /// Whether a timer is armed and has not fired yet
    pub fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Drop the pending timer, if any
    pub fn cancel(&self) {
        if let Some(handle) = self.pending.lock().take() {
            handle.abort();
        }
    }
}

impl Drop for SearchDebouncer {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.get_mut().take() {
            handle.abort();
        }
    }
}

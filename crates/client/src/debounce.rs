//! Trailing-edge debouncing for free-text inputs.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;

/// Delivers only the last value submitted within a quiet period.
///
/// Each [`call`](Debouncer::call) restarts the timer; when `delay` passes
/// without another call, the callback runs once with the latest value.
/// Must be used from within a Tokio runtime.
///
/// # Example
///
/// ```rust,ignore
/// use std::time::Duration;
/// use bizdir_client::{Debouncer, FilterPatch};
///
/// let session = session.clone();
/// let postcode = Debouncer::new(Duration::from_millis(500), move |value: String| {
///     let session = session.clone();
///     tokio::spawn(async move {
///         session.update_filters(FilterPatch::new().postcode(value)).await
///     });
/// });
///
/// postcode.call("2".to_string());
/// postcode.call("20".to_string());
/// postcode.call("200".to_string()); // only this one reaches the session
/// ```
pub struct Debouncer<T> {
    delay: Duration,
    callback: Arc<dyn Fn(T) + Send + Sync>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new<F>(delay: Duration, callback: F) -> Self
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        Self {
            delay,
            callback: Arc::new(callback),
            pending: Mutex::new(None),
        }
    }

    /// Submits a value, replacing any value still waiting.
    pub fn call(&self, value: T) {
        let callback = Arc::clone(&self.callback);
        let delay = self.delay;
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            callback(value);
        });

        if let Some(previous) = self.pending.lock().replace(task) {
            previous.abort();
        }
    }

    /// Drops the waiting value, if any.
    pub fn cancel(&self) {
        if let Some(pending) = self.pending.lock().take() {
            pending.abort();
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.get_mut().take() {
            pending.abort();
        }
    }
}

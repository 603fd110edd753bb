//! Traits for the notification system

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Error a listener reports back from `update`
pub type ListenerError = Box<dyn std::error::Error + Send + Sync>;

/// Observer told that a cached result changed
///
/// Notifications carry no payload: a listener re-reads whatever it displays
/// from the hub. `update` runs on the thread that performed the mutation, so
/// it must not block; a UI should queue its own redraw and return.
pub trait ComputationListener: Send + Sync {
    fn update(&self) -> Result<(), ListenerError>;

    /// Identifier used in logs and statistics
    fn listener_id(&self) -> &str {
        "anonymous"
    }
}

/// Listener backed by a closure
pub struct FnListener<F> {
    id: String,
    callback: F,
}

impl<F> ComputationListener for FnListener<F>
where
    F: Fn() -> Result<(), ListenerError> + Send + Sync,
{
    fn update(&self) -> Result<(), ListenerError> {
        (self.callback)()
    }

    fn listener_id(&self) -> &str {
        &self.id
    }
}

/// Wrap a closure as a listener
///
/// # Examples
/// ```
/// use repostate::notifications::api::{listener_fn, NotificationHub};
///
/// let hub = NotificationHub::new();
/// let listener = listener_fn("printer", || {
///     println!("results changed");
///     Ok(())
/// });
/// assert!(hub.add_listener(listener.clone()));
/// assert!(!hub.add_listener(listener));
/// ```
pub fn listener_fn<F>(id: impl Into<String>, callback: F) -> std::sync::Arc<FnListener<F>>
where
    F: Fn() -> Result<(), ListenerError> + Send + Sync,
{
    std::sync::Arc::new(FnListener {
        id: id.into(),
        callback,
    })
}

/// Delivery statistics tracked per registered listener
pub struct ListenerStatistics {
    delivered: AtomicUsize,
    error_count: AtomicUsize,
}

impl Default for ListenerStatistics {
    fn default() -> Self {
        Self::new()
    }
}

impl ListenerStatistics {
    pub fn new() -> Self {
        Self {
            delivered: AtomicUsize::new(0),
            error_count: AtomicUsize::new(0),
        }
    }

    pub fn delivered(&self) -> usize {
        self.delivered.load(Ordering::Relaxed)
    }

    pub fn record_delivery(&self) {
        self.delivered.fetch_add(1, Ordering::Relaxed);
    }

    pub fn error_count(&self) -> usize {
        self.error_count.load(Ordering::Relaxed)
    }

    pub fn record_error(&self) {
        self.error_count.fetch_add(1, Ordering::Relaxed);
    }
}

/// Snapshot of one listener's statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListenerStats {
    pub listener_id: String,
    pub delivered: usize,
    pub failed: usize,
}

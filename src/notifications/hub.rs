//! NotificationHub implementation

use crate::core::error_handling::panic_message;
use crate::core::sync::{recover_read, recover_write};
use crate::notifications::error::{NotificationError, NotificationResult};
use crate::notifications::traits::{ComputationListener, ListenerStatistics, ListenerStats};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, RwLock};

struct Registration {
    listener: Arc<dyn ComputationListener>,
    statistics: Arc<ListenerStatistics>,
}

impl Registration {
    fn is(&self, listener: &Arc<dyn ComputationListener>) -> bool {
        // Compare data pointers only; vtable pointers of one object may differ
        // between codegen units.
        std::ptr::eq(
            Arc::as_ptr(&self.listener) as *const (),
            Arc::as_ptr(listener) as *const (),
        )
    }
}

/// Ordered set of listeners with synchronous broadcast
///
/// Listeners are identified by the `Arc` they were registered with, so adding
/// the same `Arc` (or a clone of it) twice registers it once.
#[derive(Default)]
pub struct NotificationHub {
    listeners: RwLock<Vec<Registration>>,
}

impl NotificationHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener`; returns false if it was already registered
    pub fn add_listener(&self, listener: Arc<dyn ComputationListener>) -> bool {
        let mut listeners = recover_write(self.listeners.write(), "listener registry");
        if listeners.iter().any(|r| r.is(&listener)) {
            log::debug!(
                "Listener '{}' already registered, ignoring",
                listener.listener_id()
            );
            return false;
        }

        log::trace!("Registering listener '{}'", listener.listener_id());
        listeners.push(Registration {
            listener,
            statistics: Arc::new(ListenerStatistics::new()),
        });
        true
    }

    pub fn listener_count(&self) -> usize {
        recover_read(self.listeners.read(), "listener registry").len()
    }

    /// Call every listener in registration order on the current thread
    ///
    /// A failing or panicking listener is logged and recorded; delivery
    /// continues with the rest. The registry lock is not held while listeners run, so a listener
    /// may register further listeners (they are called from the next
    /// notification on).
    pub fn notify_all(&self) -> NotificationResult<()> {
        let targets: Vec<(Arc<dyn ComputationListener>, Arc<ListenerStatistics>)> =
            recover_read(self.listeners.read(), "listener registry")
                .iter()
                .map(|r| (Arc::clone(&r.listener), Arc::clone(&r.statistics)))
                .collect();

        let mut failed_listeners = Vec::new();
        for (listener, statistics) in &targets {
            let outcome = catch_unwind(AssertUnwindSafe(|| listener.update()))
                .unwrap_or_else(|payload| Err(panic_message(payload.as_ref()).into()));

            match outcome {
                Ok(()) => statistics.record_delivery(),
                Err(e) => {
                    statistics.record_error();
                    log::warn!("Listener '{}' failed: {}", listener.listener_id(), e);
                    failed_listeners.push(listener.listener_id().to_string());
                }
            }
        }

        if failed_listeners.is_empty() {
            Ok(())
        } else {
            Err(NotificationError::DeliveryFailed {
                attempted: targets.len(),
                failed_listeners,
            })
        }
    }

    /// Delivery statistics for every listener, in registration order
    pub fn listener_statistics(&self) -> Vec<ListenerStats> {
        recover_read(self.listeners.read(), "listener registry")
            .iter()
            .map(|r| ListenerStats {
                listener_id: r.listener.listener_id().to_string(),
                delivered: r.statistics.delivered(),
                failed: r.statistics.error_count(),
            })
            .collect()
    }
}

//! Public API for the notification system
//!
//! External modules should import from here rather than directly from
//! internal modules.

pub use crate::notifications::error::{NotificationError, NotificationResult};
pub use crate::notifications::hub::NotificationHub;
pub use crate::notifications::traits::{
    listener_fn, ComputationListener, FnListener, ListenerError, ListenerStatistics,
    ListenerStats,
};

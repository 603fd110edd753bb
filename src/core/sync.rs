//! Synchronization utilities for robust lock handling
//!
//! The hub's locks only ever guard single map or vector operations, so a
//! panic while holding one cannot leave the data half-updated. These helpers
//! therefore recover the guard from a poisoned lock instead of failing, and
//! log that it happened.

use std::sync::{LockResult, PoisonError, RwLockReadGuard, RwLockWriteGuard};

/// Take an RwLock read guard, recovering it if the lock is poisoned
///
/// # Arguments
/// * `result` - The result from an RwLock read() operation
/// * `context` - Name of the guarded structure, used in the warning
///
/// # Examples
/// ```
/// use std::sync::RwLock;
/// use repostate::core::sync::recover_read;
///
/// let lock = RwLock::new(42);
/// assert_eq!(*recover_read(lock.read(), "answer"), 42);
/// ```
pub fn recover_read<'a, T>(
    result: LockResult<RwLockReadGuard<'a, T>>,
    context: &str,
) -> RwLockReadGuard<'a, T> {
    result.unwrap_or_else(|poison_err: PoisonError<_>| {
        log::warn!(
            "Recovered poisoned read lock on {} (a panic occurred while it was held)",
            context
        );
        poison_err.into_inner()
    })
}

/// Take an RwLock write guard, recovering it if the lock is poisoned
pub fn recover_write<'a, T>(
    result: LockResult<RwLockWriteGuard<'a, T>>,
    context: &str,
) -> RwLockWriteGuard<'a, T> {
    result.unwrap_or_else(|poison_err: PoisonError<_>| {
        log::warn!(
            "Recovered poisoned write lock on {} (a panic occurred while it was held)",
            context
        );
        poison_err.into_inner()
    })
}

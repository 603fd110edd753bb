//! Analysis Coordination
//!
//! [`StateHub`](hub::StateHub) is the service the rest of the program talks
//! to. It dispatches relationship and local-state computations to the
//! [`StateChecker`](checker::StateChecker) registered for each repository
//! kind, records the outcomes in two result caches, and tells registered
//! listeners whenever a cached result changes.
//!
//! ## Failure policy
//!
//! - A kind with no registered checker is logged and recorded as `Error`.
//! - A checker that answers "no value" is recorded as `Error`.
//! - A checker that fails (I/O, any other error, or a panic) is logged; nothing is recorded,
//!   no listener is called, and the caller gets `None`. The last good result
//!   stays visible.
//!
//! `try_calculate_*` return the failure as an [`AnalysisError`](error::AnalysisError)
//! instead, for callers with their own reporting policy.

pub(crate) mod batch;
pub(crate) mod checker;
pub(crate) mod coordinator;
pub(crate) mod error;
pub(crate) mod hub;
pub(crate) mod process_checker;
pub(crate) mod refresh;

// Public API module - the only public interface for the analysis system
pub mod api;

#[cfg(test)]
mod tests;

//! Public API for the analysis system
//!
//! External modules should import from here rather than directly from
//! internal modules.

use std::sync::{Arc, OnceLock};

pub use crate::analysis::batch::BatchBaseline;
pub use crate::analysis::checker::{CheckerRegistry, StateChecker};
pub use crate::analysis::error::{AnalysisError, AnalysisResult, CheckerError, CheckerResult};
pub use crate::analysis::hub::StateHub;
pub use crate::analysis::process_checker::ProcessChecker;
pub use crate::analysis::refresh::{refresh_all, RefreshSummary};

/// Process-wide hub instance
///
/// Components receive their `Arc<StateHub>` from the composition root; this
/// slot is where the root keeps the one it built so code without an injected
/// handle reaches the same instance.
static SHARED_HUB: OnceLock<Arc<StateHub>> = OnceLock::new();

/// Install `hub` as the process-wide instance
///
/// Must happen before the first [`shared_hub`] call. If an instance is
/// already installed it is returned as the error and `hub` is dropped.
pub fn install_shared_hub(hub: StateHub) -> Result<Arc<StateHub>, Arc<StateHub>> {
    let hub = Arc::new(hub);
    match SHARED_HUB.set(Arc::clone(&hub)) {
        Ok(()) => {
            log::debug!("Installed shared state hub");
            Ok(hub)
        }
        Err(_) => {
            log::warn!("Shared state hub already installed, keeping the existing instance");
            Err(shared_hub())
        }
    }
}

/// Access the process-wide hub
///
/// Each call returns the same shared instance. If none was installed, the
/// first call creates one with no checkers registered.
pub fn shared_hub() -> Arc<StateHub> {
    Arc::clone(SHARED_HUB.get_or_init(|| {
        log::trace!("Initializing shared state hub with no checkers");
        Arc::new(StateHub::new(CheckerRegistry::new()))
    }))
}

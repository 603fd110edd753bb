//! One refresh round: batch reset, then every computation concurrently

use crate::analysis::batch::BatchBaseline;
use crate::analysis::hub::StateHub;
use crate::core::time::human_readable_delta;
use crate::model::Preferences;
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;

/// Outcome counts for one refresh round
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RefreshSummary {
    /// Entries reset to pending before computing
    pub reset: usize,
    /// Computations that recorded a result (including `Error` classifications)
    pub computed: usize,
    /// Computations that failed and left their entry untouched
    pub failed: usize,
    #[serde(skip)]
    pub elapsed: Duration,
    /// What each source held before this round reset it
    #[serde(skip)]
    pub baseline: BatchBaseline,
}

/// Reset `prefs` to pending, then compute every local state and relationship
///
/// Each computation runs on tokio's blocking pool since checkers block.
/// The round completes when all of them have finished; there is no timeout.
pub async fn refresh_all(hub: Arc<StateHub>, prefs: &Preferences) -> RefreshSummary {
    let start = Instant::now();
    let baseline = hub.reset_for_batch(prefs);

    let mut tasks: Vec<JoinHandle<bool>> = Vec::with_capacity(prefs.computation_count());
    for project in prefs.projects() {
        let project = Arc::new(project.clone());

        {
            let hub = Arc::clone(&hub);
            let project = Arc::clone(&project);
            tasks.push(tokio::task::spawn_blocking(move || {
                hub.calculate_local_state(&project).is_some()
            }));
        }

        for peer in project.peers.clone() {
            let hub = Arc::clone(&hub);
            let project = Arc::clone(&project);
            tasks.push(tokio::task::spawn_blocking(move || {
                hub.calculate_relationship(&peer, &project).is_some()
            }));
        }
    }

    let mut summary = RefreshSummary {
        reset: baseline.resets(),
        baseline,
        ..RefreshSummary::default()
    };
    for outcome in futures::future::join_all(tasks).await {
        match outcome {
            Ok(true) => summary.computed += 1,
            Ok(false) => summary.failed += 1,
            Err(e) => {
                log::error!("Analysis task did not complete: {}", e);
                summary.failed += 1;
            }
        }
    }
    summary.elapsed = start.elapsed();

    log::info!(
        "Refresh round finished in {}: {} computed, {} failed",
        human_readable_delta(summary.elapsed),
        summary.computed,
        summary.failed
    );
    summary
}

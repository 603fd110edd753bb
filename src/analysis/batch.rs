//! Batch reset ahead of a refresh round

use crate::analysis::hub::StateHub;
use crate::model::{DataSource, LocalState, Preferences, Relationship};
use std::collections::HashMap;

/// Values the sources of a batch held just before it was reset
///
/// A source that was never computed maps to `None`. A source reset twice in
/// one batch (a peer shared by two projects) keeps the value from its first
/// reset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchBaseline {
    resets: usize,
    local_states: HashMap<DataSource, Option<LocalState>>,
    relationships: HashMap<DataSource, Option<Relationship>>,
}

impl BatchBaseline {
    /// Number of entries reset, counting repeats
    pub fn resets(&self) -> usize {
        self.resets
    }

    /// `None` if `source`'s local state was not part of the batch
    pub fn local_state_before(&self, source: &DataSource) -> Option<Option<LocalState>> {
        self.local_states.get(source).copied()
    }

    /// `None` if `source`'s relationship was not part of the batch
    pub fn relationship_before(&self, source: &DataSource) -> Option<Option<Relationship>> {
        self.relationships.get(source).copied()
    }
}

impl StateHub {
    /// Mark every source in `prefs` as pending before recomputing it
    ///
    /// Each project's environment local state and each peer relationship is
    /// reset to `Pending` with its old current value kept as `previous`
    /// (`None` for a source never seen before). Listeners are not notified;
    /// they hear about each source again when its computation completes.
    ///
    /// Returns the number of entries reset.
    pub fn prepare_for_batch(&self, prefs: &Preferences) -> usize {
        self.reset_for_batch(prefs).resets()
    }

    /// [`prepare_for_batch`](Self::prepare_for_batch), also returning what
    /// each reset entry held beforehand
    pub fn reset_for_batch(&self, prefs: &Preferences) -> BatchBaseline {
        let mut baseline = BatchBaseline::default();
        for project in prefs.projects() {
            let local = self.local_states.reset_to_pending(&project.environment);
            baseline
                .local_states
                .entry(project.environment.clone())
                .or_insert(local.previous());
            baseline.resets += 1;

            for peer in &project.peers {
                let rel = self.relationships.reset_to_pending(peer);
                baseline
                    .relationships
                    .entry(peer.clone())
                    .or_insert(rel.previous());
                baseline.resets += 1;
            }
        }

        log::debug!(
            "Reset {} entries to pending across {} projects",
            baseline.resets,
            prefs.projects().len()
        );
        baseline
    }
}

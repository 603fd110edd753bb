//! StateHub - result caches, listeners and checkers in one service

use crate::analysis::checker::CheckerRegistry;
use crate::cache::ResultCache;
use crate::model::{
    DataSource, LocalState, LocalStateResult, Relationship, RelationshipResult, RepoKind,
};
use crate::notifications::api::{ComputationListener, ListenerStats, NotificationHub};
use std::sync::Arc;

/// Coordination hub between the analysis and whoever displays its results
///
/// Build one per process and share it as `Arc<StateHub>`; every method takes
/// `&self` and is safe to call from any thread. The computation methods live
/// in `coordinator.rs` and the batch reset in `batch.rs`.
///
/// # Example
///
/// ```rust
/// use repostate::analysis::api::{CheckerRegistry, StateHub};
/// use repostate::model::{DataSource, Relationship, RepoKind};
///
/// let hub = StateHub::new(CheckerRegistry::new());
/// let peer = DataSource::new("alice", "ssh://host//alice", RepoKind::Hg);
///
/// // Never computed: reported as pending
/// assert_eq!(hub.get_relationship(&peer).current(), Relationship::Pending);
/// ```
pub struct StateHub {
    pub(crate) relationships: ResultCache<Relationship>,
    pub(crate) local_states: ResultCache<LocalState>,
    pub(crate) notifications: NotificationHub,
    pub(crate) checkers: CheckerRegistry,
}

impl StateHub {
    pub fn new(checkers: CheckerRegistry) -> Self {
        log::debug!(
            "Creating state hub with checkers for: {:?}",
            checkers.supported_kinds()
        );
        Self {
            relationships: ResultCache::new(),
            local_states: ResultCache::new(),
            notifications: NotificationHub::new(),
            checkers,
        }
    }

    /// Register a listener; returns false if it was already registered
    pub fn add_listener(&self, listener: Arc<dyn ComputationListener>) -> bool {
        self.notifications.add_listener(listener)
    }

    /// Cached relationship for `source`, `Pending` if never computed
    pub fn get_relationship(&self, source: &DataSource) -> RelationshipResult {
        self.relationships.get(source)
    }

    /// Cached local state for `source`, `Pending` if never computed
    pub fn get_local_state(&self, source: &DataSource) -> LocalStateResult {
        self.local_states.get(source)
    }

    /// Snapshot of every cached relationship
    pub fn get_relationships(&self) -> Vec<RelationshipResult> {
        self.relationships.values()
    }

    /// Snapshot of every cached local state
    pub fn get_local_states(&self) -> Vec<LocalStateResult> {
        self.local_states.values()
    }

    pub fn listener_statistics(&self) -> Vec<ListenerStats> {
        self.notifications.listener_statistics()
    }

    pub fn supported_kinds(&self) -> Vec<RepoKind> {
        self.checkers.supported_kinds()
    }
}

//! ResultCache implementation

use crate::core::sync::{recover_read, recover_write};
use crate::model::{Classification, DataSource, StateResult};
use std::collections::HashMap;
use std::sync::RwLock;

/// Concurrency-safe map from data source to its latest result
///
/// Entries are created on first lookup or first update and are only ever
/// overwritten, never removed. Every mutating operation holds the write lock
/// for exactly one map operation, which makes each one atomic per key.
pub struct ResultCache<C: Classification> {
    entries: RwLock<HashMap<DataSource, StateResult<C>>>,
}

impl<C: Classification> Default for ResultCache<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Classification> ResultCache<C> {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Stored result for `source`, materializing a `Pending` entry on a miss
    pub fn get(&self, source: &DataSource) -> StateResult<C> {
        if let Some(existing) = recover_read(self.entries.read(), C::LABEL).get(source) {
            return existing.clone();
        }

        // Another thread may have inserted between the two locks; entry() keeps
        // whichever value got there first.
        let mut entries = recover_write(self.entries.write(), C::LABEL);
        entries
            .entry(source.clone())
            .or_insert_with(|| {
                log::trace!("No {} cached for {}, recording as pending", C::LABEL, source);
                StateResult::pending(source.clone())
            })
            .clone()
    }

    /// Atomically replace the entry for `source` with the value `update` builds
    /// from the prior entry (`None` if there was none)
    pub fn upsert_with<F>(&self, source: &DataSource, update: F) -> StateResult<C>
    where
        F: FnOnce(Option<&StateResult<C>>) -> StateResult<C>,
    {
        let mut entries = recover_write(self.entries.write(), C::LABEL);
        let next = update(entries.get(source));
        entries.insert(source.clone(), next.clone());
        next
    }

    /// Store `current` for `source`, carrying the prior current value forward as `previous`
    pub fn put(&self, source: &DataSource, current: C) -> StateResult<C> {
        self.upsert_with(source, |prior| {
            StateResult::succeeding(source.clone(), current, prior)
        })
    }

    /// Mark `source` as being recomputed; a never-seen source gets `previous = None`
    pub fn reset_to_pending(&self, source: &DataSource) -> StateResult<C> {
        self.put(source, C::PENDING)
    }

    /// Point-in-time copy of all stored results, ordered by source
    pub fn values(&self) -> Vec<StateResult<C>> {
        let mut snapshot: Vec<_> = recover_read(self.entries.read(), C::LABEL)
            .values()
            .cloned()
            .collect();
        snapshot.sort_by(|a, b| a.source().cmp(b.source()));
        snapshot
    }

    pub fn len(&self) -> usize {
        recover_read(self.entries.read(), C::LABEL).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

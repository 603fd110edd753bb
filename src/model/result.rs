//! Immutable analysis results

use crate::model::classification::{Classification, LocalState, Relationship};
use crate::model::data_source::DataSource;
use serde::Serialize;

/// Latest classification of one data source together with the value it replaced
///
/// Results are never mutated after construction; an update produces a new
/// result whose `previous` is the old result's `current`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateResult<C: Classification> {
    source: DataSource,
    current: C,
    previous: Option<C>,
}

pub type RelationshipResult = StateResult<Relationship>;
pub type LocalStateResult = StateResult<LocalState>;

impl<C: Classification> StateResult<C> {
    pub fn new(source: DataSource, current: C, previous: Option<C>) -> Self {
        Self {
            source,
            current,
            previous,
        }
    }

    /// Result for a source nothing has been computed for yet
    pub fn pending(source: DataSource) -> Self {
        Self::new(source, C::PENDING, None)
    }

    /// Build the result that replaces `prior` (if any) with `current`
    pub fn succeeding(source: DataSource, current: C, prior: Option<&Self>) -> Self {
        Self::new(source, current, prior.map(|p| p.current))
    }

    pub fn source(&self) -> &DataSource {
        &self.source
    }

    pub fn current(&self) -> C {
        self.current
    }

    pub fn previous(&self) -> Option<C> {
        self.previous
    }

    /// Whether `current` differs from `previous`; a first result counts as changed
    pub fn has_changed(&self) -> bool {
        self.previous != Some(self.current)
    }
}

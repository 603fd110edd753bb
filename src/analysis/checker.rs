//! State checker capability and per-kind registry

use crate::analysis::error::{AnalysisError, AnalysisResult, CheckerResult};
use crate::model::{DataSource, LocalState, ProjectPreferences, Relationship, RepoKind};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Performs the version-control analysis for one repository kind
///
/// Calls may block for as long as the underlying analysis takes; the hub
/// runs them on whatever thread asked for the computation and applies no
/// timeout. `Ok(None)` means the checker ran but could not classify the
/// source; the hub records that as `Error`.
pub trait StateChecker: Send + Sync {
    /// Classify how `source`'s history relates to `project`'s environment
    fn relationship(
        &self,
        project: &ProjectPreferences,
        source: &DataSource,
    ) -> CheckerResult<Option<Relationship>>;

    /// Classify the state of `project`'s environment working copy
    fn local_state(&self, project: &ProjectPreferences) -> CheckerResult<Option<LocalState>>;

    /// Name used in logs
    fn name(&self) -> &str {
        "checker"
    }
}

/// Checkers keyed by repository kind
///
/// A kind with no entry is unsupported; looking it up yields
/// [`AnalysisError::Unsupported`].
#[derive(Clone, Default)]
pub struct CheckerRegistry {
    checkers: BTreeMap<RepoKind, Arc<dyn StateChecker>>,
}

impl CheckerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `checker` for `kind`, replacing any earlier registration
    pub fn register(&mut self, kind: RepoKind, checker: Arc<dyn StateChecker>) {
        if let Some(existing) = self.checkers.insert(kind, checker) {
            log::warn!(
                "Replaced state checker '{}' registered for {} repositories",
                existing.name(),
                kind
            );
        }
    }

    pub fn with_checker(mut self, kind: RepoKind, checker: Arc<dyn StateChecker>) -> Self {
        self.register(kind, checker);
        self
    }

    pub fn checker_for(&self, kind: RepoKind) -> AnalysisResult<&Arc<dyn StateChecker>> {
        self.checkers
            .get(&kind)
            .ok_or(AnalysisError::Unsupported { kind })
    }

    pub fn supported_kinds(&self) -> Vec<RepoKind> {
        self.checkers.keys().copied().collect()
    }
}

//! Computation dispatch and the fail-soft boundary

use crate::analysis::checker::StateChecker;
use crate::analysis::error::{AnalysisError, AnalysisResult, CheckerError, CheckerResult};
use crate::analysis::hub::StateHub;
use crate::cache::ResultCache;
use crate::core::error_handling::{log_error_with_context, panic_message};
use crate::core::time::elapsed_since;
use crate::model::{
    Classification, DataSource, LocalStateResult, ProjectPreferences, RelationshipResult,
    StateResult,
};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::Instant;

impl StateHub {
    /// Compute how `source` relates to `project`'s environment
    ///
    /// Returns `None` if the checker failed; the failure is logged and the
    /// cache and listeners are left untouched.
    pub fn calculate_relationship(
        &self,
        source: &DataSource,
        project: &ProjectPreferences,
    ) -> Option<RelationshipResult> {
        match self.try_calculate_relationship(source, project) {
            Ok(result) => Some(result),
            Err(e) => {
                log_error_with_context(&e, &format!("Computing relationship for {}", source));
                None
            }
        }
    }

    /// Compute the local state of `project`'s environment
    ///
    /// Returns `None` if the checker failed, as for
    /// [`calculate_relationship`](Self::calculate_relationship).
    pub fn calculate_local_state(&self, project: &ProjectPreferences) -> Option<LocalStateResult> {
        match self.try_calculate_local_state(project) {
            Ok(result) => Some(result),
            Err(e) => {
                log_error_with_context(
                    &e,
                    &format!("Computing local state for {}", project.environment),
                );
                None
            }
        }
    }

    /// Like [`calculate_relationship`](Self::calculate_relationship) but hands
    /// checker failures back instead of logging them
    pub fn try_calculate_relationship(
        &self,
        source: &DataSource,
        project: &ProjectPreferences,
    ) -> AnalysisResult<RelationshipResult> {
        let classification =
            self.classify(source, |checker| checker.relationship(project, source))?;
        Ok(self.record(&self.relationships, source, classification))
    }

    pub fn try_calculate_local_state(
        &self,
        project: &ProjectPreferences,
    ) -> AnalysisResult<LocalStateResult> {
        let source = &project.environment;
        let classification = self.classify(source, |checker| checker.local_state(project))?;
        Ok(self.record(&self.local_states, source, classification))
    }

    /// Run the checker registered for `source.kind`
    ///
    /// Unsupported kinds and "no value" answers become `C::ERROR`; checker
    /// failures are returned.
    fn classify<C, F>(&self, source: &DataSource, check: F) -> AnalysisResult<C>
    where
        C: Classification,
        F: FnOnce(&dyn StateChecker) -> CheckerResult<Option<C>>,
    {
        let start = Instant::now();

        let checker = match self.checkers.checker_for(source.kind) {
            Ok(checker) => checker,
            Err(unsupported) => {
                log_error_with_context(
                    &unsupported,
                    &format!("Computing {} for {}", C::LABEL, source),
                );
                return Ok(C::ERROR);
            }
        };

        log::trace!(
            "Dispatching {} computation for {} to '{}'",
            C::LABEL,
            source,
            checker.name()
        );

        // A panicking checker counts as a generic checker failure
        let outcome = catch_unwind(AssertUnwindSafe(|| check(&**checker))).unwrap_or_else(
            |payload| {
                Err(CheckerError::generic(format!(
                    "checker '{}' panicked: {}",
                    checker.name(),
                    panic_message(payload.as_ref())
                )))
            },
        );

        let classification = match outcome {
            Ok(Some(classification)) => classification,
            Ok(None) => {
                log::warn!(
                    "Checker '{}' returned no {} for {}, recording {}",
                    checker.name(),
                    C::LABEL,
                    source,
                    C::ERROR
                );
                C::ERROR
            }
            Err(e) => return Err(AnalysisError::from_checker(source.clone(), e)),
        };

        log::info!(
            "Computed {} for {} in {}: {}",
            C::LABEL,
            source,
            elapsed_since(start),
            classification
        );
        Ok(classification)
    }

    /// Store `classification` and tell the listeners
    fn record<C: Classification>(
        &self,
        cache: &ResultCache<C>,
        source: &DataSource,
        classification: C,
    ) -> StateResult<C> {
        let result = cache.put(source, classification);
        if let Err(e) = self.notifications.notify_all() {
            log_error_with_context(&e, &format!("Notifying listeners of {} change", C::LABEL));
        }
        result
    }
}

//! Shared fixtures for integration tests

#![allow(dead_code)]

use repostate::analysis::api::{CheckerError, CheckerResult, StateChecker};
use repostate::model::{DataSource, LocalState, ProjectPreferences, Relationship, RepoKind};
use std::collections::HashMap;
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;

pub fn hg(name: &str) -> DataSource {
    DataSource::new(name, format!("/srv/hg/{name}"), RepoKind::Hg)
}

pub fn git(name: &str) -> DataSource {
    DataSource::new(name, format!("/srv/git/{name}.git"), RepoKind::Git)
}

/// Checker answering from fixed tables keyed by source name
///
/// Sources missing from the tables fail with a generic error.
#[derive(Default)]
pub struct TableChecker {
    pub relationships: Mutex<HashMap<String, Relationship>>,
    pub local_states: Mutex<HashMap<String, LocalState>>,
}

impl TableChecker {
    pub fn with_relationship(self, name: &str, relationship: Relationship) -> Self {
        self.relationships
            .lock()
            .unwrap()
            .insert(name.to_string(), relationship);
        self
    }

    pub fn with_local_state(self, name: &str, state: LocalState) -> Self {
        self.local_states
            .lock()
            .unwrap()
            .insert(name.to_string(), state);
        self
    }

    pub fn set_relationship(&self, name: &str, relationship: Relationship) {
        self.relationships
            .lock()
            .unwrap()
            .insert(name.to_string(), relationship);
    }
}

impl StateChecker for TableChecker {
    fn relationship(
        &self,
        _project: &ProjectPreferences,
        source: &DataSource,
    ) -> CheckerResult<Option<Relationship>> {
        match self.relationships.lock().unwrap().get(&source.name) {
            Some(relationship) => Ok(Some(*relationship)),
            None => Err(CheckerError::generic(format!("no answer for {}", source.name))),
        }
    }

    fn local_state(&self, project: &ProjectPreferences) -> CheckerResult<Option<LocalState>> {
        match self.local_states.lock().unwrap().get(&project.environment.name) {
            Some(state) => Ok(Some(*state)),
            None => Err(CheckerError::generic(format!(
                "no answer for {}",
                project.environment.name
            ))),
        }
    }

    fn name(&self) -> &str {
        "table"
    }
}

/// Write `contents` to a temporary `.toml` file that lives as long as the handle
pub fn write_config(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("Failed to create temp config");
    file.write_all(contents.as_bytes())
        .expect("Failed to write temp config");
    file
}

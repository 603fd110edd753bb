//! Test helpers for the analysis system

use crate::analysis::api::{CheckerError, CheckerRegistry, CheckerResult, StateChecker, StateHub};
use crate::model::{
    DataSource, LocalState, ProjectPreferences, Relationship, RepoKind,
};
use crate::notifications::api::{listener_fn, ComputationListener};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// What a scripted checker answers for one source
#[derive(Debug, Clone, Copy)]
pub enum Reply<C> {
    Value(C),
    NoValue,
    IoFailure,
    GenericFailure,
    Panic,
}

impl<C: Copy> Reply<C> {
    fn answer(self) -> CheckerResult<Option<C>> {
        match self {
            Reply::Value(c) => Ok(Some(c)),
            Reply::NoValue => Ok(None),
            Reply::IoFailure => Err(CheckerError::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "remote unreachable",
            ))),
            Reply::GenericFailure => Err(CheckerError::generic("repository is corrupt")),
            Reply::Panic => panic!("checker bug"),
        }
    }
}

/// Checker whose answers are set per source name; unscripted sources get no value
#[derive(Default)]
pub struct ScriptedChecker {
    relationships: Mutex<HashMap<String, Reply<Relationship>>>,
    local_states: Mutex<HashMap<String, Reply<LocalState>>>,
    calls: AtomicUsize,
}

impl ScriptedChecker {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_relationship(&self, name: &str, reply: Reply<Relationship>) {
        self.relationships
            .lock()
            .unwrap()
            .insert(name.to_string(), reply);
    }

    pub fn set_local_state(&self, name: &str, reply: Reply<LocalState>) {
        self.local_states
            .lock()
            .unwrap()
            .insert(name.to_string(), reply);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl StateChecker for ScriptedChecker {
    fn relationship(
        &self,
        _project: &ProjectPreferences,
        source: &DataSource,
    ) -> CheckerResult<Option<Relationship>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let reply = self.relationships.lock().unwrap().get(&source.name).copied();
        reply.unwrap_or(Reply::NoValue).answer()
    }

    fn local_state(&self, project: &ProjectPreferences) -> CheckerResult<Option<LocalState>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let reply = self
            .local_states
            .lock()
            .unwrap()
            .get(&project.environment.name)
            .copied();
        reply.unwrap_or(Reply::NoValue).answer()
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

pub fn hg(name: &str) -> DataSource {
    DataSource::new(name, format!("ssh://hg.example.org//{name}"), RepoKind::Hg)
}

pub fn git(name: &str) -> DataSource {
    DataSource::new(name, format!("https://git.example.org/{name}.git"), RepoKind::Git)
}

pub fn project(environment: DataSource, peers: Vec<DataSource>) -> ProjectPreferences {
    ProjectPreferences {
        name: "crystal".to_string(),
        environment,
        peers,
    }
}

/// Hub with `checker` registered for Mercurial only
pub fn hg_hub(checker: Arc<ScriptedChecker>) -> StateHub {
    StateHub::new(CheckerRegistry::new().with_checker(RepoKind::Hg, checker))
}

/// Listener that counts its invocations
pub fn counting_listener() -> (Arc<dyn ComputationListener>, Arc<AtomicUsize>) {
    let count = Arc::new(AtomicUsize::new(0));
    let listener: Arc<dyn ComputationListener> = {
        let count = Arc::clone(&count);
        listener_fn("counter", move || {
            count.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
    };
    (listener, count)
}

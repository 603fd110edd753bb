//! Which data sources to watch

use crate::model::data_source::DataSource;
use serde::Deserialize;

/// One project: the developer's own workspace plus the peers it is compared against
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProjectPreferences {
    pub name: String,
    /// The local workspace
    pub environment: DataSource,
    #[serde(default)]
    pub peers: Vec<DataSource>,
}

impl ProjectPreferences {
    pub fn new(name: impl Into<String>, environment: DataSource) -> Self {
        Self {
            name: name.into(),
            environment,
            peers: Vec::new(),
        }
    }

    pub fn with_peer(mut self, peer: DataSource) -> Self {
        self.peers.push(peer);
        self
    }
}

/// Ordered collection of project preferences
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Preferences {
    projects: Vec<ProjectPreferences>,
}

impl Preferences {
    pub fn new(projects: Vec<ProjectPreferences>) -> Self {
        Self { projects }
    }

    pub fn projects(&self) -> &[ProjectPreferences] {
        &self.projects
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Total number of computations one refresh round performs
    pub fn computation_count(&self) -> usize {
        self.projects.iter().map(|p| 1 + p.peers.len()).sum()
    }
}

impl FromIterator<ProjectPreferences> for Preferences {
    fn from_iter<I: IntoIterator<Item = ProjectPreferences>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

//! Repository identity

use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::{Display, EnumIter, EnumString};

/// Version-control system used by a data source
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum RepoKind {
    /// Mercurial
    Hg,
    Git,
}

/// One repository instance the hub tracks
///
/// Equality and hashing are by value, so two `DataSource`s describing the
/// same repository share one cache entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DataSource {
    /// Short display name, e.g. a collaborator's name
    pub name: String,
    /// Path or URL the repository is reached through
    pub location: String,
    pub kind: RepoKind,
}

impl DataSource {
    pub fn new(name: impl Into<String>, location: impl Into<String>, kind: RepoKind) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
            kind,
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: {}", self.name, self.kind, self.location)
    }
}

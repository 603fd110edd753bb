//! Analysis classifications
//!
//! Both classification kinds carry the two sentinels every cache entry can
//! hold regardless of what the analysis would report: `Pending` (nothing
//! computed yet, or a recomputation is under way) and `Error` (the analysis
//! ran but could not classify the source).

use serde::Serialize;
use std::fmt;
use std::hash::Hash;
use std::str::FromStr;
use strum_macros::{Display, EnumIter, EnumString};

/// Common behaviour of classification values stored in a result cache
pub trait Classification:
    Copy + Eq + Hash + fmt::Debug + fmt::Display + FromStr + Send + Sync + 'static
{
    /// Value a cache entry holds before any computation has finished
    const PENDING: Self;
    /// Value recorded when a computation could not classify its source
    const ERROR: Self;

    /// Human-readable name of the classification family, used in logs
    const LABEL: &'static str;

    fn is_pending(&self) -> bool {
        *self == Self::PENDING
    }

    fn is_error(&self) -> bool {
        *self == Self::ERROR
    }
}

/// How a peer's history relates to the local environment
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Relationship {
    /// Both histories contain the same changesets
    Same,
    /// The environment has changesets the peer lacks
    Ahead,
    /// The peer has changesets the environment lacks
    Behind,
    /// Histories diverged but merge without textual conflicts
    MergeClean,
    MergeConflict,
    /// Merge is textually clean but the result does not build
    CompileConflict,
    /// Merge builds but its tests fail
    TestConflict,
    Pending,
    Error,
}

impl Relationship {
    /// True for classifications that require the developer to act before
    /// integrating the peer's work
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Relationship::MergeConflict | Relationship::CompileConflict | Relationship::TestConflict
        )
    }
}

impl Classification for Relationship {
    const PENDING: Self = Relationship::Pending;
    const ERROR: Self = Relationship::Error;
    const LABEL: &'static str = "relationship";
}

/// Condition of the local working copy
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LocalState {
    /// Nothing to commit and nothing to resolve
    AllClear,
    /// Working copy has uncommitted changes
    Uncheckpointed,
    /// An unfinished merge needs resolving
    MustResolve,
    Pending,
    Error,
}

impl Classification for LocalState {
    const PENDING: Self = LocalState::Pending;
    const ERROR: Self = LocalState::Error;
    const LABEL: &'static str = "local state";
}

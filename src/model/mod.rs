//! Domain model shared by the cache, the coordinator and the binary
//!
//! Data sources identify repositories, classifications describe what an
//! analysis found, and results pair the current classification with the
//! one it replaced.

pub mod classification;
pub mod data_source;
pub mod preferences;
pub mod result;

pub use classification::{Classification, LocalState, Relationship};
pub use data_source::{DataSource, RepoKind};
pub use preferences::{Preferences, ProjectPreferences};
pub use result::{LocalStateResult, RelationshipResult, StateResult};

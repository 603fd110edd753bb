//! Result Cache
//!
//! Keeps the latest analysis result per data source. A lookup never comes
//! back empty: an unknown source is recorded as `Pending` the first time it
//! is asked for. Updates go through one locked read-modify-write step so the
//! `previous` value of every stored result is the `current` value it
//! actually replaced.

pub(crate) mod store;

pub use store::ResultCache;

#[cfg(test)]
mod tests;

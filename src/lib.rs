pub mod analysis;
pub mod app;
pub mod cache;
pub mod core;
pub mod model;
pub mod notifications;

include!(concat!(env!("OUT_DIR"), "/version.rs"));

/// Package version with the build's git hash and time
pub fn version_string() -> String {
    format!(
        "{} ({}, built {})",
        env!("CARGO_PKG_VERSION"),
        GIT_HASH,
        BUILD_TIME
    )
}

//! Configuration file loading tests

use crate::common::write_config;
use repostate::app::config::{ConfigError, HubConfig};
use repostate::core::logging::LogFormat;
use repostate::model::RepoKind;
use std::path::Path;
use std::time::Duration;

const CRYSTAL: &str = r#"
refresh_seconds = 30

[logging]
level = "debug"
format = "json"

[[checker]]
kind = "hg"
program = "crystal-hg-check"
args = ["--quiet"]

[[project]]
name = "crystal"
environment = { name = "me", location = "/home/me/crystal", kind = "hg" }
peers = [
    { name = "alice", location = "ssh://host//alice/crystal", kind = "hg" },
    { name = "bob", location = "ssh://host//bob/crystal", kind = "hg" },
]

[[project]]
name = "docs"
environment = { name = "me-docs", location = "/home/me/docs", kind = "git" }
"#;

#[tokio::test]
async fn test_load_from_file() {
    let file = write_config(CRYSTAL);
    let config = HubConfig::load(Some(file.path())).await.unwrap();

    assert_eq!(config.refresh_seconds, Some(30));
    assert_eq!(config.logging.level.as_deref(), Some("debug"));
    assert_eq!(config.logging.format, Some(LogFormat::Json));
    assert_eq!(config.projects.projects().len(), 2);
    assert_eq!(config.projects.computation_count(), 4);

    let crystal = &config.projects.projects()[0];
    assert_eq!(crystal.peers[1].kind, RepoKind::Hg);
    assert!(config.projects.projects()[1].peers.is_empty());
}

#[tokio::test]
async fn test_missing_explicit_file_is_not_found() {
    let missing = Path::new("/nonexistent/repostate.toml");
    match HubConfig::load(Some(missing)).await {
        Err(ConfigError::NotFound { path }) => assert_eq!(path, missing),
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn test_syntax_error_is_parse_error() {
    let file = write_config("[[project]\nname = ");
    assert!(matches!(
        HubConfig::load(Some(file.path())).await,
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn test_registry_covers_configured_kinds() {
    let config = HubConfig::from_toml_str(CRYSTAL).unwrap();
    let registry = config.build_registry();

    assert_eq!(registry.supported_kinds(), vec![RepoKind::Hg]);
    let checker = registry.checker_for(RepoKind::Hg).unwrap();
    assert_eq!(checker.name(), "process:crystal-hg-check");
    assert!(registry.checker_for(RepoKind::Git).is_err());
}

#[test]
fn test_cli_interval_overrides_file() {
    let config = HubConfig::from_toml_str(CRYSTAL).unwrap();
    assert_eq!(config.refresh_interval(None), Some(Duration::from_secs(30)));
    assert_eq!(config.refresh_interval(Some(5)), Some(Duration::from_secs(5)));
}

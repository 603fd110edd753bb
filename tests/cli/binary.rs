//! Run the built binary once against shell-script checkers

#![cfg(unix)]

use crate::common::write_config;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread::sleep;
use std::time::Duration;
use tempfile::TempDir;

const BIN: &str = env!("CARGO_BIN_EXE_repostate");

fn write_checker(dir: &Path) -> String {
    let script = dir.join("check.sh");
    fs::write(
        &script,
        "#!/bin/sh\n\
         case \"$1\" in\n\
           relationship) case \"$3\" in *alice*) echo MERGE_CLEAN ;; *) exit 3 ;; esac ;;\n\
           local-state) echo uncheckpointed ;;\n\
         esac\n",
    )
    .expect("Failed to write checker script");
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755))
        .expect("Failed to make checker executable");
    script.display().to_string()
}

fn config_for(program: &str) -> String {
    format!(
        r#"
[[checker]]
kind = "hg"
program = "{program}"

[[project]]
name = "crystal"
environment = {{ name = "me", location = "/srv/hg/me", kind = "hg" }}
peers = [
    {{ name = "alice", location = "/srv/hg/alice", kind = "hg" }},
    {{ name = "bob", location = "/srv/hg/bob", kind = "hg" }},
]
"#
    )
}

#[test]
fn test_single_round_json_report() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = write_config(&config_for(&write_checker(dir.path())));

    let output = Command::new(BIN)
        .args(["--config-file"])
        .arg(config.path())
        .args(["--once", "--output", "json", "--no-color", "--log-level", "off"])
        .output()
        .expect("Failed to run repostate");
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is one JSON report");
    assert_eq!(report["summary"]["computed"], 2);
    assert_eq!(report["summary"]["failed"], 1);

    let project = &report["projects"][0];
    assert_eq!(project["local_state"]["current"], "UNCHECKPOINTED");
    assert_eq!(project["relationships"][0]["current"], "MERGE_CLEAN");
    // bob's checker exits non-zero, so he stays pending
    assert_eq!(project["relationships"][1]["current"], "PENDING");
}

#[test]
fn test_text_report_lists_sources() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = write_config(&config_for(&write_checker(dir.path())));

    let output = Command::new(BIN)
        .arg("--config-file")
        .arg(config.path())
        .args(["--once", "--no-color", "--log-level", "off"])
        .output()
        .expect("Failed to run repostate");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("2 computed, 1 failed"), "got: {}", stdout);
    assert!(stdout.contains("me (local)"));
    assert!(stdout.contains("MERGE_CLEAN"));
}

#[test]
fn test_invalid_config_exits_non_zero() {
    let config = write_config("refresh_seconds = 10\n");

    let output = Command::new(BIN)
        .arg("--config-file")
        .arg(config.path())
        .arg("--once")
        .output()
        .expect("Failed to run repostate");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("at least one [[project]] is required"), "got: {}", stderr);
}

#[test]
fn test_sighup_reloads_log_level_from_config() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let checker = write_checker(dir.path());
    let config_path = dir.path().join("repostate.toml");
    fs::write(
        &config_path,
        format!("[logging]\nlevel = \"warn\"\n{}", config_for(&checker)),
    )
    .expect("Failed to write config");

    let child = Command::new(BIN)
        .arg("--config-file")
        .arg(&config_path)
        .args(["--interval", "60", "--no-color"])
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to start repostate");
    let pid = child.id() as libc::pid_t;

    sleep(Duration::from_secs(1));
    fs::write(
        &config_path,
        format!("[logging]\nlevel = \"info\"\n{}", config_for(&checker)),
    )
    .expect("Failed to rewrite config");
    unsafe {
        libc::kill(pid, libc::SIGHUP);
    }
    sleep(Duration::from_secs(1));
    unsafe {
        libc::kill(pid, libc::SIGTERM);
    }

    let output = child.wait_with_output().expect("repostate did not exit");
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Log level reloaded: info"), "got: {}", stderr);
}

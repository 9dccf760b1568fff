//! Shared test helpers for integration tests
//!
//! This module provides common utilities used across all test files.

#![allow(dead_code)]

use assert_cmd::cargo;
use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

pub const CATALOG_HEADER: &str = "Power Rating (Watts),Weight (kg),Rated RPM,Rated Torque,Input voltage,Voltage Type,Model,Flange Size,Company Name,Link,Prices";

/// Helper to get an armsizer command isolated from the caller's environment
pub fn armsizer() -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("armsizer"));
    cmd.env_remove("ARMSIZER_CATALOG")
        .env_remove("RUST_LOG")
        .env("XDG_CONFIG_HOME", std::env::temp_dir().join("armsizer-test-no-config"));
    cmd
}

/// Temp directory holding the stock `arm.yaml` and `motors.csv`
pub fn setup_stock_project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    armsizer()
        .current_dir(tmp.path())
        .args(["init", "--with-catalog"])
        .assert()
        .success();
    tmp
}

/// Write a file into the temp directory and return its path
pub fn write_file(tmp: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = tmp.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

/// Write a catalog from data rows (header added)
pub fn write_catalog(tmp: &TempDir, name: &str, rows: &[&str]) -> PathBuf {
    let mut content = String::from(CATALOG_HEADER);
    for row in rows {
        content.push('\n');
        content.push_str(row);
    }
    content.push('\n');
    write_file(tmp, name, &content)
}

/// A design where only link 6 has material and every joint sits at 0
///
/// Joint 6 then carries a 5 kg payload at 0.2 m and a 0.2 m x 0.02 m
/// steel rod: 11.741 N·m.
pub const SINGLE_LINK_DESIGN: &str = r#"
title: Single link
payload_mass: 5
link_density: 7850
pivot_mode: explicit
links:
  - {}
  - {}
  - {}
  - {}
  - {}
  - { length: 0.2, radius: 0.02 }
joints:
  - { pivot: 0 }
  - { pivot: 0 }
  - { pivot: 0 }
  - { pivot: 0 }
  - { pivot: 0 }
  - { pivot: 0, body_length: 0.1, rpm: 3000, reduction_ratio: 50, safety_factor: 1.5 }
"#;

/// Run a command and parse its stdout as JSON
pub fn run_json(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().unwrap();
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

//! CLI Integration Tests
//!
//! Tests for `kout` CLI commands using `assert_cmd`.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Get the CLI binary command
#[allow(deprecated)]
fn kout_cmd() -> Command {
    let mut cmd = Command::cargo_bin("kout").unwrap();
    cmd.env_remove("RUST_LOG").env_remove("KOUT_CONFIG");
    cmd
}

/// S -knows-> A, S -knows-> B, A -knows-> C, B -created-> lop
fn write_graph(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("graph.json");
    fs::write(
        &path,
        r#"{
            "vertices": [
                { "id": "lop", "properties": { "lang": "java" } }
            ],
            "edges": [
                { "from": "S", "to": "A", "label": "knows", "properties": { "weight": 0.4 } },
                { "from": "S", "to": "B", "label": "knows", "properties": { "weight": 1.0 } },
                { "from": "A", "to": "C", "label": "knows" },
                { "from": "B", "to": "lop", "label": "created" }
            ]
        }"#,
    )
    .unwrap();
    path
}

// =============================================================================
// Help & Version Tests
// =============================================================================

#[test]
fn test_help_displays_usage() {
    kout_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("kout CLI"))
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_invalid_command_shows_error() {
    kout_cmd()
        .arg("invalid_command_xyz")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

// =============================================================================
// Traversal Tests
// =============================================================================

#[test]
fn test_count_one_hop() {
    let dir = TempDir::new().unwrap();
    let graph = write_graph(&dir);

    kout_cmd()
        .current_dir(dir.path())
        .args(["count"])
        .arg(&graph)
        .args(["S", "--depth", "1", "--label", "knows"])
        .assert()
        .success()
        .stdout("2\n");
}

#[test]
fn test_count_two_hops_all_labels() {
    let dir = TempDir::new().unwrap();
    let graph = write_graph(&dir);

    kout_cmd()
        .current_dir(dir.path())
        .arg("count")
        .arg(&graph)
        .args(["S", "--depth", "2"])
        .assert()
        .success()
        .stdout("4\n");
}

#[test]
fn test_collect_json_output() {
    let dir = TempDir::new().unwrap();
    let graph = write_graph(&dir);

    kout_cmd()
        .current_dir(dir.path())
        .arg("collect")
        .arg(&graph)
        .args(["\"S\"", "-d", "2", "--scope", "exactly", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""ids": ["#))
        .stdout(predicate::str::contains(r#""C""#))
        .stdout(predicate::str::contains(r#""lop""#))
        .stdout(predicate::str::contains(r#""status": "complete""#))
        .stdout(predicate::str::contains(r#""edges_examined""#));
}

#[test]
fn test_collect_with_edge_filter() {
    let dir = TempDir::new().unwrap();
    let graph = write_graph(&dir);

    kout_cmd()
        .current_dir(dir.path())
        .arg("collect")
        .arg(&graph)
        .args(["S", "--depth", "1", "--label", "knows"])
        .args([
            "--filter",
            r#"{"conditions":[{"op":"gt","key":"weight","value":0.5}]}"#,
        ])
        .assert()
        .success()
        .stdout("B\n");
}

#[test]
fn test_limit_reached_notice() {
    let dir = TempDir::new().unwrap();
    let graph = write_graph(&dir);

    kout_cmd()
        .current_dir(dir.path())
        .arg("collect")
        .arg(&graph)
        .args(["S", "--depth", "2", "--limit", "1"])
        .assert()
        .success()
        .stdout("A\n")
        .stderr(predicate::str::contains("limit reached"));
}

#[test]
fn test_capacity_exceeded_fails() {
    let dir = TempDir::new().unwrap();
    let graph = write_graph(&dir);

    kout_cmd()
        .current_dir(dir.path())
        .arg("count")
        .arg(&graph)
        .args(["S", "--depth", "2", "--capacity", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("KOUT-003"));
}

#[test]
fn test_unknown_source_fails() {
    let dir = TempDir::new().unwrap();
    let graph = write_graph(&dir);

    kout_cmd()
        .current_dir(dir.path())
        .arg("count")
        .arg(&graph)
        .args(["nobody", "--depth", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("KOUT-002"));
}

#[test]
fn test_invalid_depth_fails() {
    let dir = TempDir::new().unwrap();
    let graph = write_graph(&dir);

    kout_cmd()
        .current_dir(dir.path())
        .arg("count")
        .arg(&graph)
        .args(["S", "--depth", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("KOUT-001"));
}

// =============================================================================
// Configuration Tests
// =============================================================================

#[test]
fn test_config_file_sets_defaults() {
    let dir = TempDir::new().unwrap();
    let graph = write_graph(&dir);
    fs::write(
        dir.path().join("kout.toml"),
        "[traversal]\ndirection = \"in\"\n",
    )
    .unwrap();

    kout_cmd()
        .current_dir(dir.path())
        .arg("collect")
        .arg(&graph)
        .args(["C", "--depth", "2"])
        .assert()
        .success()
        .stdout("A\nS\n");
}

#[test]
fn test_config_command_prints_toml() {
    let dir = TempDir::new().unwrap();

    kout_cmd()
        .current_dir(dir.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("[traversal]"))
        .stdout(predicate::str::contains("max_degree = 10000"));
}

#[test]
fn test_invalid_config_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("kout.toml"), "[logging]\nlevel = \"loud\"\n").unwrap();

    kout_cmd()
        .current_dir(dir.path())
        .arg("config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("logging.level"));
}

// =============================================================================
// Info Command Tests
// =============================================================================

#[test]
fn test_info_shows_counts() {
    let dir = TempDir::new().unwrap();
    let graph = write_graph(&dir);

    kout_cmd()
        .arg("info")
        .arg(&graph)
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"Vertices\D*5").unwrap())
        .stdout(predicate::str::is_match(r"Edges\D*4").unwrap())
        .stdout(predicate::str::is_match(r"Max out-degree\D*2").unwrap())
        .stdout(predicate::str::is_match(r"Max in-degree\D*1").unwrap())
        .stdout(predicate::str::contains("knows"))
        .stdout(predicate::str::contains("created"));
}

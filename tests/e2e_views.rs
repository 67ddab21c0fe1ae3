mod common;
use common::cli::{RwWorkspace, rw_command, run_rw};
use predicates::prelude::*;

#[test]
fn test_list_text() {
    let workspace = RwWorkspace::new();
    rw_command(&workspace)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Deep pothole causing vehicle damage"))
        .stdout(predicate::str::contains("3 issue(s)"));
}

#[test]
fn test_list_json_filtered() {
    let workspace = RwWorkspace::new();
    let output = run_rw(&workspace, ["list", "--severity", "high", "--json"], "list_high");
    assert!(output.status.success(), "list failed: {}", output.stderr);

    let cards = output.json();
    let cards = cards.as_array().unwrap();
    assert_eq!(cards.len(), 2);
    assert!(cards.iter().all(|c| c["severity"]["label"] == "High Severity"));
}

#[test]
fn test_list_status_alias() {
    let workspace = RwWorkspace::new();
    let output = run_rw(&workspace, ["list", "--status", "in_progress", "--json"], "list_ip");
    assert!(output.status.success());
    let cards = output.json();
    assert_eq!(cards.as_array().unwrap().len(), 1);
    assert_eq!(cards[0]["status"]["label"], "in progress");
}

#[test]
fn test_list_invalid_status() {
    let workspace = RwWorkspace::new();
    rw_command(&workspace)
        .args(["list", "--status", "closed"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("closed"));
}

#[test]
fn test_show_card() {
    let workspace = RwWorkspace::new();
    let output = run_rw(&workspace, ["show", "2", "--json"], "show");
    assert!(output.status.success());
    let card = output.json();
    assert_eq!(card["type_label"], "Incomplete Construction");
    assert_eq!(card["date_reported"], "2023-04-05");
}

#[test]
fn test_show_unknown_id() {
    let workspace = RwWorkspace::new();
    rw_command(&workspace)
        .args(["show", "42"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("42"));
}

#[test]
fn test_map_json() {
    let workspace = RwWorkspace::new();
    let output = run_rw(&workspace, ["map", "--json"], "map");
    assert!(output.status.success());
    let json = output.json();
    assert_eq!(json["zoom"], 13);
    assert_eq!(json["markers"].as_array().unwrap().len(), 3);
    assert_eq!(json["markers"][1]["color"], "#F97316");
    assert_eq!(json["markers"][0]["pulse"], true);
}

#[test]
fn test_hotspots_text() {
    let workspace = RwWorkspace::new();
    rw_command(&workspace)
        .arg("hotspots")
        .assert()
        .success()
        .stdout(predicate::str::contains("Downtown Bridge Entrance"))
        .stdout(predicate::str::contains("41 incidents across 4 hotspots"));
}

#[test]
fn test_version_json() {
    let workspace = RwWorkspace::new();
    let output = run_rw(&workspace, ["version", "--json"], "version");
    assert!(output.status.success());
    assert_eq!(output.json()["version"], env!("CARGO_PKG_VERSION"));
}

#[test]
fn test_bad_config_is_reported() {
    let workspace = RwWorkspace::new();
    workspace.write_config("form:\n  default_severity: extreme\n");
    rw_command(&workspace)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("form.default_severity"));
}

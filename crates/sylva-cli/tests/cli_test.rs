use assert_cmd::prelude::*;
use std::path::{Path, PathBuf};
use std::process::Command;

fn repo_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("expected crates/<name> layout")
        .to_path_buf()
}

fn fixture(name: &str) -> String {
    let path = repo_root().join("fixtures").join("trees").join(name);
    assert!(path.exists(), "fixture missing: {}", path.display());
    path.to_string_lossy().to_string()
}

fn stdout_of(args: &[&str]) -> String {
    let exe = assert_cmd::cargo_bin!("sylva-cli");
    let output = Command::new(exe)
        .args(args)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    String::from_utf8(output).expect("utf-8 stdout")
}

#[test]
fn layout_prints_the_root_only_graph_by_default() {
    let out = stdout_of(&["layout", &fixture("solar_system.json")]);
    let json: serde_json::Value = serde_json::from_str(&out).expect("layout JSON");
    let nodes = json["nodes"].as_array().expect("nodes array");
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0]["id"], "root");
    assert_eq!(nodes[0]["hasChildren"], true);
    assert_eq!(nodes[0]["isExpanded"], false);
    assert_eq!(json["edges"], serde_json::json!([]));
    assert_eq!(json["bounds"]["minX"], -70.0);
}

#[test]
fn layout_applies_expand_clicks_in_order() {
    let out = stdout_of(&[
        "layout",
        "--expand",
        "root",
        "--expand",
        "planets",
        "--pretty",
        &fixture("solar_system.json"),
    ]);
    let json: serde_json::Value = serde_json::from_str(&out).expect("layout JSON");
    let ids: Vec<&str> = json["nodes"]
        .as_array()
        .expect("nodes array")
        .iter()
        .filter_map(|n| n["id"].as_str())
        .collect();
    assert_eq!(ids, ["root", "planets", "mars", "moon", "sun", "missions"]);
    let edge_ids: Vec<&str> = json["edges"]
        .as_array()
        .expect("edges array")
        .iter()
        .filter_map(|e| e["id"].as_str())
        .collect();
    assert!(edge_ids.contains(&"e-planets-mars"));
    assert!(out.contains('\n'), "--pretty output spans lines");
}

#[test]
fn outline_reads_stdin_and_honors_config() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let config = tmp.path().join("sylva.json");
    std::fs::write(&config, r#"{"layout":{"levelSpacing":10}}"#).expect("write config");

    let exe = assert_cmd::cargo_bin!("sylva-cli");
    let output = assert_cmd::Command::new(exe)
        .args([
            "outline",
            "--expand-all",
            "--config",
            config.to_string_lossy().as_ref(),
            "-",
        ])
        .write_stdin(std::fs::read_to_string(fixture("fenced_model_output.txt")).expect("read"))
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(output).expect("utf-8 stdout");
    assert_eq!(
        text,
        "- Cats (90%)\n  - Breeds (85%)\n    * Siamese (80%)\n  * Diet (75%)\n"
    );
}

#[test]
fn check_reports_problems_and_fails() {
    let exe = assert_cmd::cargo_bin!("sylva-cli");
    let output = Command::new(exe)
        .args(["check", &fixture("messy.json")])
        .assert()
        .failure()
        .code(1)
        .get_output()
        .clone();
    let stdout = String::from_utf8(output.stdout).expect("utf-8 stdout");
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        [
            "missing id replaced with `root_2`",
            "subtopic #3 of `root` is a string, not an object; skipped",
            "accuracy of `dup` is out of range: 1.4",
            "topic `root_2` has an empty label",
            "accuracy of `7` is out of range: NaN",
            "duplicate id `dup` (2 occurrences)",
        ]
    );
    let stderr = String::from_utf8(output.stderr).expect("utf-8 stderr");
    assert!(stderr.contains("6 problems found"), "stderr: {stderr}");
}

#[test]
fn check_passes_on_a_clean_tree() {
    let out = stdout_of(&["check", &fixture("solar_system.json")]);
    assert!(out.is_empty());
}

#[test]
fn unknown_flags_are_usage_errors() {
    let exe = assert_cmd::cargo_bin!("sylva-cli");
    Command::new(exe)
        .args(["layout", "--frobnicate"])
        .assert()
        .code(2);
}

#[test]
fn non_object_input_fails() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let input = tmp.path().join("list.json");
    std::fs::write(&input, "[1, 2, 3]").expect("write input");

    let exe = assert_cmd::cargo_bin!("sylva-cli");
    Command::new(exe)
        .args(["layout", input.to_string_lossy().as_ref()])
        .assert()
        .code(1);
}

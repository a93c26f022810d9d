use std::path::{Path, PathBuf};
use sylva_core::{Diagnostic, check_tree, disambiguate_ids, parse_topic_tree};

fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .and_then(|p| p.parent())
        .expect("expected crates/<name> layout")
        .to_path_buf()
}

fn read_fixture(name: &str) -> String {
    let path = workspace_root().join("fixtures").join("trees").join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()))
}

#[test]
fn clean_fixture_parses_without_diagnostics() {
    let parsed = parse_topic_tree(&read_fixture("solar_system.json")).expect("valid tree");
    assert!(parsed.diagnostics.is_empty());
    assert!(check_tree(&parsed.tree).is_empty());
    assert_eq!(parsed.tree.node_count(), 10);
    assert_eq!(parsed.tree.depth(), 4);
    assert_eq!(
        parsed.tree.find("moon_diameter").map(|n| n.topic.as_str()),
        Some("2,106 miles")
    );
}

#[test]
fn messy_fixture_is_repaired_and_reported() {
    let parsed = parse_topic_tree(&read_fixture("messy.json")).expect("root is an object");
    assert_eq!(
        parsed.diagnostics,
        [
            Diagnostic::SynthesizedId {
                id: "root_2".to_string()
            },
            Diagnostic::SkippedSubtopic {
                parent_id: "root".to_string(),
                index: 3,
                found: "a string",
            },
        ]
    );
    assert_eq!(parsed.tree.accuracy, 0.9);

    let messages: Vec<String> = check_tree(&parsed.tree).iter().map(ToString::to_string).collect();
    assert_eq!(
        messages,
        [
            "accuracy of `dup` is out of range: 1.4",
            "topic `root_2` has an empty label",
            "accuracy of `7` is out of range: NaN",
            "duplicate id `dup` (2 occurrences)",
        ]
    );

    let mut tree = parsed.tree;
    assert_eq!(disambiguate_ids(&mut tree), 1);
    let ids: Vec<&str> = tree.subtopics.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, ["dup", "dup~2", "root_2", "7"]);
}

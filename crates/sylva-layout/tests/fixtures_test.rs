use std::path::{Path, PathBuf};
use sylva_core::{TopicNode, parse_topic_tree};
use sylva_layout::{GraphDiff, LayoutConfig, TopicTreeEngine};

fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .and_then(|p| p.parent())
        .expect("expected crates/<name> layout")
        .to_path_buf()
}

fn load(name: &str) -> TopicNode {
    let path = workspace_root().join("fixtures").join("trees").join(name);
    let text = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()));
    parse_topic_tree(&text)
        .unwrap_or_else(|e| panic!("failed to parse {}: {e}", path.display()))
        .tree
}

fn xy(engine: &TopicTreeEngine, id: &str) -> (f64, f64) {
    let n = engine
        .graph()
        .node(id)
        .unwrap_or_else(|| panic!("{id} is not rendered"));
    (n.x, n.y)
}

#[test]
fn solar_system_disclosure_walkthrough() {
    let mut engine = TopicTreeEngine::default();
    engine.initialize_tree(load("solar_system.json"));
    assert_eq!(engine.graph().nodes.len(), 1);

    assert!(engine.on_node_click("root"));
    assert_eq!(xy(&engine, "planets"), (-180.0, 150.0));
    assert_eq!(xy(&engine, "sun"), (180.0, 150.0));
    assert_eq!(xy(&engine, "missions"), (360.0, 150.0));

    assert!(engine.on_node_click("planets"));
    assert_eq!(xy(&engine, "mars"), (-270.0, 300.0));
    assert_eq!(xy(&engine, "moon"), (0.0, 300.0));

    assert!(engine.on_node_click("mars"));
    assert_eq!(xy(&engine, "phobos"), (-360.0, 450.0));
    assert_eq!(xy(&engine, "deimos"), (-180.0, 450.0));
    assert!(!engine.graph().contains_node("moon_diameter"));
    assert!(!engine.graph().contains_node("apollo"));

    let bounds = engine
        .graph()
        .bounds(engine.config())
        .expect("non-empty graph");
    assert_eq!((bounds.min_x, bounds.max_x), (-430.0, 430.0));
    assert_eq!((bounds.min_y, bounds.max_y), (-30.0, 480.0));

    // Collapsing the top hides everything below, but remembers the inner expansion.
    assert!(engine.on_node_click("root"));
    assert_eq!(engine.graph().nodes.len(), 1);
    assert!(engine.on_node_click("root"));
    assert!(engine.graph().contains_node("phobos"));
}

#[test]
fn sun_is_a_leaf_and_ignores_clicks() {
    let mut engine = TopicTreeEngine::default();
    engine.initialize_tree(load("solar_system.json"));
    engine.on_node_click("root");
    let before = engine.graph().clone();

    assert!(!engine.on_node_click("sun"));
    assert!(GraphDiff::between(&before, engine.graph()).is_empty());
    let sun = engine.graph().node("sun").expect("sun rendered");
    assert!(!sun.has_children);
    assert_eq!(sun.accuracy_percent(), "99%");
}

#[test]
fn fenced_model_output_lays_out_like_plain_json() {
    let tree = load("fenced_model_output.txt");
    assert_eq!(tree.id, "root");
    assert_eq!(tree.node_count(), 4);

    let mut engine = TopicTreeEngine::new(LayoutConfig {
        level_spacing: 100.0,
        ..LayoutConfig::default()
    });
    engine.initialize_tree(tree);
    engine.expand_all();
    assert_eq!(xy(&engine, "breeds"), (-90.0, 100.0));
    assert_eq!(xy(&engine, "diet"), (90.0, 100.0));
    assert_eq!(xy(&engine, "siamese"), (-90.0, 200.0));
}

#[test]
fn duplicate_ids_are_tolerated_by_the_engine() {
    let mut engine = TopicTreeEngine::default();
    engine.initialize_tree(load("messy.json"));
    engine.on_node_click("root");

    let ids: Vec<&str> = engine.graph().nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, ["root", "dup", "dup", "root_2", "7"]);
    let numbered = engine.graph().node("7").expect("numeric id rendered");
    assert_eq!(numbered.label, "Numbered");
    assert_eq!(numbered.accuracy_percent(), "n/a");
    assert_eq!(engine.index().map(|ix| ix.duplicate_ids()), Some(vec!["dup"]));
}

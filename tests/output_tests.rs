use cg2dot::graph::{generate_dot, DefaultStyler, DotConfig};
use cg2dot::output::{read_report, to_report, validate_path, write_dot, write_report};
use cg2dot::parser::{parse_file, Symbols};
use cg2dot::tree::{build_tree, CallTree};
use cg2dot::utils::OutputError;
use pretty_assertions::assert_eq;
use tempfile::tempdir;

fn index_tree() -> (CallTree, Symbols) {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/index.cachegrind");
    let mut symbols = Symbols::new();
    let trace = parse_file(path, &mut symbols).unwrap();
    (build_tree(&trace.entries).unwrap(), symbols)
}

#[test]
fn test_dot_has_one_statement_per_node_and_edge() {
    let (tree, symbols) = index_tree();
    let dot = generate_dot(&tree, &symbols, &DefaultStyler, None);

    assert!(dot.starts_with("digraph calltree {\n"));
    assert!(dot.ends_with("}\n"));

    let is_statement = |line: &str| {
        line.trim_start()
            .strip_prefix('n')
            .is_some_and(|rest| rest.starts_with(|c: char| c.is_ascii_digit()))
    };
    let nodes = dot.lines().filter(|l| is_statement(*l) && !l.contains("->")).count();
    let edges = dot.lines().filter(|l| l.contains("->")).count();
    assert_eq!(nodes, 5);
    assert_eq!(edges, 4);

    // Preorder: root, {main}, bar, foo, php::strlen
    assert!(dot.contains("  n0 -> n1 [label=\"100 (100.0%)\"];"));
    assert!(dot.contains("  n1 -> n3 [label=\"53 (53.0%)\"];"));
    assert!(dot.contains("  n3 -> n4 [label=\"3 (3.0%)\"];"));
}

#[test]
fn test_dot_config_options() {
    let (tree, symbols) = index_tree();
    let config = DotConfig::new()
        .with_title("index \"run\"")
        .with_edge_labels(false)
        .with_command("/srv/app/index.php");
    let dot = generate_dot(&tree, &symbols, &DefaultStyler, Some(&config));

    assert!(dot.contains("// cmd: /srv/app/index.php"));
    assert!(dot.contains("label=\"index \\\"run\\\"\""));
    assert!(dot.contains("  n0 -> n1;"));
}

#[test]
fn test_write_dot_creates_parent_directories() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("graphs/nested/index.dot");

    write_dot("digraph calltree {\n}\n", &path).unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "digraph calltree {\n}\n");
}

#[test]
fn test_report_round_trip_through_disk() {
    let (tree, symbols) = index_tree();
    let report = to_report(&tree, &symbols, vec!["index.cachegrind".to_string()]);

    let dir = tempdir().unwrap();
    let path = dir.path().join("report.json");
    write_report(&report, &path).unwrap();
    let loaded = read_report(&path).unwrap();

    assert_eq!(loaded.version, "1.0.0");
    assert_eq!(loaded.inputs, vec!["index.cachegrind".to_string()]);
    assert_eq!(loaded.node_count, 5);
    assert_eq!(loaded.total_time, 100);
    assert_eq!(loaded.nodes, report.nodes);

    // Preorder: root, {main}, bar, foo, php::strlen
    let main = &loaded.nodes[1];
    assert_eq!(main.function, "{main}");
    assert_eq!(main.file, "/srv/app/index.php");
    assert_eq!(main.children, vec![2, 3]);

    let strlen = &loaded.nodes[4];
    assert_eq!(strlen.function, "php::strlen");
    assert_eq!(strlen.parent, Some(3));
    assert_eq!(strlen.depth, 3);
}

#[test]
fn test_read_report_rejects_garbage() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert!(matches!(read_report(&path), Err(OutputError::SerializationFailed(_))));
}

#[test]
fn test_validate_path() {
    let dir = tempdir().unwrap();

    assert!(validate_path(&dir.path().join("out.dot")).is_ok());
    assert!(matches!(validate_path(dir.path()), Err(OutputError::InvalidPath(_))));
    assert!(matches!(
        validate_path(std::path::Path::new("")),
        Err(OutputError::InvalidPath(_))
    ));
}

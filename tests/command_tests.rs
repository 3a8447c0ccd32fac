use cg2dot::aggregator::AggregationMode;
use cg2dot::commands::{build_call_tree, execute_convert, validate_trace_files, ConvertArgs};
use cg2dot::output::{read_report, to_report};
use pretty_assertions::assert_eq;
use std::path::PathBuf;
use tempfile::tempdir;

fn fixture(name: &str) -> PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn args(names: &[&str]) -> ConvertArgs {
    ConvertArgs {
        inputs: names.iter().map(|name| fixture(name)).collect(),
        threshold: 0.0,
        ..Default::default()
    }
}

#[test]
fn test_build_call_tree_merges_and_aggregates() {
    let conversion = build_call_tree(&args(&["index.cachegrind", "repeated.cachegrind"])).unwrap();

    assert_eq!(conversion.parsed.len(), 2);
    assert!(conversion.skipped.is_empty());
    assert_eq!(
        conversion.commands,
        vec!["/srv/app/index.php".to_string(), "/srv/app/repeat.php".to_string()]
    );

    // Each {main} lives in its own script file, so they stay separate
    assert_eq!(conversion.tree.root.children.len(), 2);
    assert_eq!(conversion.tree.total_time(), 125);
    assert_eq!(conversion.pruned, 0);
}

#[test]
fn test_same_file_twice_folds_into_one_main() {
    let conversion = build_call_tree(&args(&["index.cachegrind", "index.cachegrind"])).unwrap();

    assert_eq!(conversion.tree.root.children.len(), 1);
    assert_eq!(conversion.tree.root.children[0].call_count, 2);
    assert_eq!(conversion.tree.node_count(), 5);
}

#[test]
fn test_aggregation_none_keeps_each_trace() {
    let conversion = build_call_tree(&ConvertArgs {
        aggregation: AggregationMode::None,
        ..args(&["index.cachegrind", "index.cachegrind"])
    })
    .unwrap();

    assert_eq!(conversion.tree.root.children.len(), 2);
}

#[test]
fn test_parse_error_aborts_by_default() {
    let err = build_call_tree(&args(&["index.cachegrind", "missing_events.cachegrind"])).unwrap_err();
    assert!(format!("{:#}", err).contains("line 5"));
}

#[test]
fn test_ignore_errors_skips_and_rolls_back_names() {
    let conversion = build_call_tree(&ConvertArgs {
        ignore_errors: true,
        ..args(&["missing_events.cachegrind", "index.cachegrind"])
    })
    .unwrap();

    assert_eq!(conversion.skipped, vec![fixture("missing_events.cachegrind")]);
    assert_eq!(conversion.parsed, vec![fixture("index.cachegrind")]);
    // The skipped file never got far enough to intern anything, and the
    // next file starts numbering at 1
    assert_eq!(conversion.symbols.files.get("php:internal").map(|id| id.0), Some(1));
    assert_eq!(conversion.tree.total_time(), 100);
}

#[test]
fn test_reconstruction_error_aborts_even_when_ignoring() {
    let result = build_call_tree(&ConvertArgs {
        ignore_errors: true,
        ..args(&["index.cachegrind", "truncated.cachegrind"])
    });

    let err = result.unwrap_err();
    assert!(format!("{:#}", err).contains("never received all their callees"));
}

#[test]
fn test_threshold_applies_to_merged_tree() {
    let conversion = build_call_tree(&ConvertArgs {
        threshold: 25.0,
        ..args(&["index.cachegrind"])
    })
    .unwrap();

    // bar (20) and php::strlen (3) fall under 25% of 100
    assert_eq!(conversion.pruned, 2);
    assert_eq!(conversion.tree.node_count(), 3);
}

#[test]
fn test_execute_convert_writes_outputs() {
    let dir = tempdir().unwrap();
    let dot_path = dir.path().join("out/index.dot");
    let json_path = dir.path().join("out/index.json");

    execute_convert(ConvertArgs {
        output_dot: Some(dot_path.clone()),
        output_json: Some(json_path.clone()),
        ..args(&["index.cachegrind"])
    })
    .unwrap();

    let dot = std::fs::read_to_string(&dot_path).unwrap();
    assert!(dot.contains("// cmd: /srv/app/index.php"));
    assert!(dot.contains("php::strlen"));

    let report = read_report(&json_path).unwrap();
    assert_eq!(report.node_count, 5);
    assert_eq!(report.inputs.len(), 1);
}

#[test]
fn test_execute_convert_rejects_bad_threshold() {
    let result = execute_convert(ConvertArgs {
        threshold: -5.0,
        ..args(&["index.cachegrind"])
    });
    assert!(result.is_err());
}

#[test]
fn test_validate_reports_failures() {
    assert!(validate_trace_files(&[fixture("index.cachegrind")]).is_ok());
    assert!(validate_trace_files(&[fixture("index.cachegrind"), fixture("truncated.cachegrind")]).is_err());
}

/// A trace where `rec` calls itself `depth` times below `{main}`
fn deep_trace(depth: usize) -> String {
    let mut text = String::from("version: 0.9.6\ncmd: deep.php\npart: 1\n\nevents: Time\n\n");
    text.push_str("fl=/deep.php\nfn=rec\n1 1\n\n");
    for level in 1..depth {
        text.push_str(&format!(
            "fl=/deep.php\nfn=rec\n1 1\ncfn=rec\ncalls=1 0 0\n1 {}\n\n",
            level
        ));
    }
    text.push_str(&format!(
        "fl=/deep.php\nfn={{main}}\n\nsummary: {depth}\n\n0 0\ncfn=rec\ncalls=1 0 0\n1 {depth}\n"
    ));
    text
}

#[test]
fn test_deep_recursion_through_the_whole_pipeline() {
    let depth = 50_000;
    let dir = tempdir().unwrap();
    let trace = dir.path().join("deep.cachegrind");
    std::fs::write(&trace, deep_trace(depth)).unwrap();

    let conversion = build_call_tree(&ConvertArgs {
        inputs: vec![trace.clone()],
        threshold: 0.0,
        ..Default::default()
    })
    .unwrap();
    assert_eq!(conversion.tree.max_depth(), depth + 1);

    let report = to_report(&conversion.tree, &conversion.symbols, Vec::new());
    assert_eq!(report.node_count, depth + 2);
    assert_eq!(report.nodes[depth + 1].depth, depth + 1);

    let pruned = build_call_tree(&ConvertArgs {
        inputs: vec![trace],
        threshold: 50.0,
        ..Default::default()
    })
    .unwrap();
    // rec inclusive times run depth, depth - 1, ..., 1; those >= depth / 2 survive
    assert_eq!(pruned.tree.node_count(), 2 + depth / 2 + 1);
}

#[test]
fn test_execute_convert_on_deep_trace() {
    let dir = tempdir().unwrap();
    let trace = dir.path().join("deep.cachegrind");
    std::fs::write(&trace, deep_trace(50_000)).unwrap();
    let json_path = dir.path().join("deep.json");

    execute_convert(ConvertArgs {
        inputs: vec![trace],
        output_dot: Some(dir.path().join("deep.dot")),
        output_json: Some(json_path.clone()),
        threshold: 0.0,
        print_summary: true,
        ..Default::default()
    })
    .unwrap();

    assert_eq!(read_report(&json_path).unwrap().node_count, 50_002);
}

//! Convert command implementation.
//!
//! The convert command:
//! 1. Parses every trace file into flat entries
//! 2. Rebuilds one call tree per file
//! 3. Merges (and aggregates) the trees
//! 4. Prunes call paths below the threshold
//! 5. Renders and writes the DOT graph and optional report

use super::models::ConvertArgs;
use crate::aggregator::{filter_by_threshold, hottest_nodes};
use crate::graph::{generate_dot, generate_text_summary, DefaultStyler};
use crate::output::{print_dot, to_report, write_dot, write_report};
use crate::parser::{parse_file, Symbols};
use crate::tree::{build_tree, CallTree};
use crate::utils::error::ConfigError;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::path::PathBuf;
use std::time::Instant;

/// Result of merging, aggregating and filtering a set of traces
#[derive(Debug, Clone)]
pub struct Conversion {
    pub tree: CallTree,

    /// Interning tables shared by every parsed file
    pub symbols: Symbols,

    /// Files that made it into the tree
    pub parsed: Vec<PathBuf>,

    /// Files skipped because they failed to parse
    pub skipped: Vec<PathBuf>,

    /// `cmd:` lines of the parsed files
    pub commands: Vec<String>,

    /// Nodes removed by the threshold filter
    pub pruned: usize,
}

/// Execute the convert command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Invalid arguments
/// * Parse errors, unless `ignore_errors` is set
/// * Call tree reconstruction errors, always
/// * File write errors
pub fn execute_convert(args: ConvertArgs) -> Result<()> {
    let start_time = Instant::now();

    validate_args(&args)?;

    info!("Step 1/3: Building call tree from {} file(s)...", args.inputs.len());
    let conversion = build_call_tree(&args)?;

    info!("Step 2/3: Rendering DOT graph...");
    let mut dot_config = args.dot_config.clone();
    dot_config.commands.extend(conversion.commands.iter().cloned());
    let dot = generate_dot(
        &conversion.tree,
        &conversion.symbols,
        &DefaultStyler,
        Some(&dot_config),
    );

    info!("Step 3/3: Writing output...");
    match &args.output_dot {
        Some(path) => {
            write_dot(&dot, path).context("Failed to write DOT graph")?;
            info!("✓ DOT graph written to: {}", path.display());
        }
        None => print_dot(&dot).context("Failed to print DOT graph")?,
    }

    if let Some(path) = &args.output_json {
        let inputs = conversion
            .parsed
            .iter()
            .map(|p| p.display().to_string())
            .collect();
        let report = to_report(&conversion.tree, &conversion.symbols, inputs);
        write_report(&report, path).context("Failed to write JSON report")?;
        info!("✓ Report written to: {}", path.display());
    }

    if args.print_summary {
        let hot = hottest_nodes(&conversion.tree, &conversion.symbols, args.top_nodes);
        eprintln!("\n{}", "=".repeat(80));
        eprintln!("CALL TREE SUMMARY");
        eprintln!("{}", "=".repeat(80));
        eprintln!("Files:   {} parsed, {} skipped", conversion.parsed.len(), conversion.skipped.len());
        eprintln!("Nodes:   {} ({} pruned)", conversion.tree.node_count(), conversion.pruned);
        eprintln!("\n{}", generate_text_summary(&hot, conversion.tree.total_time()));
        eprintln!("{}", "=".repeat(80));
    }

    let elapsed = start_time.elapsed();
    info!("Conversion completed in {:.2}s", elapsed.as_secs_f64());

    Ok(())
}

/// Parse, merge, aggregate and filter the input traces
///
/// **Public** - the whole pipeline without rendering, for callers that want
/// the tree itself
///
/// Every file shares one set of interning tables so identical names compare
/// equal across files. A file skipped under `ignore_errors` has its names
/// rolled back out of the tables.
pub fn build_call_tree(args: &ConvertArgs) -> Result<Conversion> {
    let mut symbols = Symbols::new();
    let mut merged = CallTree::new();
    let mut parsed = Vec::new();
    let mut skipped = Vec::new();
    let mut commands = Vec::new();

    for path in &args.inputs {
        let checkpoint = symbols.checkpoint();

        let trace = match parse_file(path, &mut symbols) {
            Ok(trace) => trace,
            Err(e) if args.ignore_errors => {
                warn!("Skipping '{}': {}", path.display(), e);
                symbols.rollback(checkpoint);
                skipped.push(path.clone());
                continue;
            }
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to parse trace file '{}'", path.display())
                });
            }
        };

        debug!(
            "{}: {} entries, summary {:?}, total self {}, {{main}} inclusive {}",
            path.display(),
            trace.entries.len(),
            trace.totals.summary,
            trace.totals.total_self,
            trace.totals.main_inclusive
        );

        // Reconstruction errors mean the entry list can't be trusted at all
        let tree = build_tree(&trace.entries).with_context(|| {
            format!("Failed to rebuild call tree for '{}'", path.display())
        })?;

        merged.merge(tree);
        merged = args.aggregation.apply(merged);

        commands.push(trace.header.command);
        parsed.push(path.clone());
    }

    if parsed.is_empty() {
        warn!("No trace file could be parsed; the graph will be empty");
    }

    let pruned = filter_by_threshold(&mut merged, args.threshold);
    info!(
        "Call tree: {} nodes after pruning {} below {}%",
        merged.node_count(),
        pruned,
        args.threshold
    );

    Ok(Conversion {
        tree: merged,
        symbols,
        parsed,
        skipped,
        commands,
        pruned,
    })
}

/// Validate convert arguments
///
/// **Public** - can be called before execute_convert for early validation
pub fn validate_args(args: &ConvertArgs) -> Result<()> {
    if args.inputs.is_empty() {
        anyhow::bail!("At least one trace file is required");
    }

    if !args.threshold.is_finite() || args.threshold < 0.0 {
        return Err(ConfigError::InvalidThreshold(args.threshold).into());
    }

    if args.top_nodes == 0 {
        anyhow::bail!("top_nodes must be greater than 0");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args_with_input() -> ConvertArgs {
        ConvertArgs {
            inputs: vec![PathBuf::from("cachegrind.out.1")],
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_args_valid() {
        assert!(validate_args(&args_with_input()).is_ok());
    }

    #[test]
    fn test_validate_args_no_inputs() {
        assert!(validate_args(&ConvertArgs::default()).is_err());
    }

    #[test]
    fn test_validate_args_negative_threshold() {
        let args = ConvertArgs {
            threshold: -1.0,
            ..args_with_input()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_nan_threshold() {
        let args = ConvertArgs {
            threshold: f64::NAN,
            ..args_with_input()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_top_nodes_zero() {
        let args = ConvertArgs {
            top_nodes: 0,
            ..args_with_input()
        };
        assert!(validate_args(&args).is_err());
    }
}

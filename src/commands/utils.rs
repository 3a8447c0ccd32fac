use crate::parser::{parse_file, Symbols};
use crate::tree::build_tree;
use crate::utils::config::SCHEMA_VERSION;
use anyhow::{Context, Result};
use log::error;
use std::path::{Path, PathBuf};

/// Parse trace files and print the reader's totals for each
///
/// Every file is checked even after a failure; the command fails if any
/// file did.
pub fn validate_trace_files(files: &[PathBuf]) -> Result<()> {
    let mut failures = 0;

    for path in files {
        if let Err(e) = validate_trace_file(path) {
            error!("{:#}", e);
            failures += 1;
        }
    }

    if failures > 0 {
        anyhow::bail!("{} of {} trace file(s) failed validation", failures, files.len());
    }
    Ok(())
}

fn validate_trace_file(path: &Path) -> Result<()> {
    println!("Validating trace: {}", path.display());

    let mut symbols = Symbols::new();
    let trace = parse_file(path, &mut symbols)
        .with_context(|| format!("Failed to parse trace file '{}'", path.display()))?;
    let tree = build_tree(&trace.entries)
        .with_context(|| format!("Failed to rebuild call tree for '{}'", path.display()))?;

    println!("✓ Valid trace");
    println!("  Command:        {}", trace.header.command);
    println!("  Entries:        {}", trace.entries.len());
    println!("  Calls:          {}", trace.call_count());
    println!("  Functions:      {}", symbols.functions.len());
    println!("  Files:          {}", symbols.files.len());
    match trace.totals.summary {
        Some(summary) => println!("  Summary:        {}", summary),
        None => println!("  Summary:        (none)"),
    }
    println!("  Total self:     {}", trace.totals.total_self);
    println!("  Main inclusive: {}", trace.totals.main_inclusive);
    println!("  Tree nodes:     {}", tree.node_count());
    println!("  Tree depth:     {}", tree.max_depth());

    Ok(())
}

/// Display version information
pub fn display_version() {
    println!("cg2dot v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Converts Xdebug cachegrind traces into aggregated Graphviz call trees.");
}

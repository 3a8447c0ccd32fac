//! cg2dot CLI
//!
//! Converts Xdebug cachegrind traces into aggregated call trees and renders
//! them as Graphviz DOT graphs.

use anyhow::Result;
use cg2dot::aggregator::AggregationMode;
use cg2dot::commands::{display_version, execute_convert, validate_trace_files, ConvertArgs};
use cg2dot::graph::DotConfig;
use cg2dot::utils::config::DEFAULT_THRESHOLD;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;
use std::str::FromStr;

/// cg2dot - call graphs from Xdebug cachegrind traces
#[derive(Parser, Debug)]
#[command(name = "cg2dot")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Merge trace files into one call tree and render it as DOT
    Convert {
        /// Trace files to merge
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Ignore files that can't be parsed
        #[arg(short, long)]
        ignore: bool,

        /// Remove call paths that took less than PERCENT of total time
        #[arg(short, long, value_name = "PERCENT", default_value_t = DEFAULT_THRESHOLD)]
        threshold: f64,

        /// Aggregation mode: "func-file" keys every call by the function and
        /// file names along its call path, "none" keeps every call separate
        #[arg(
            short,
            long,
            value_name = "MODE",
            default_value = "func-file",
            value_parser = AggregationMode::from_str
        )]
        aggregate: AggregationMode,

        /// Output path for the DOT graph (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output path for a JSON report of the final tree
        #[arg(long)]
        json: Option<PathBuf>,

        /// Graph title
        #[arg(long)]
        title: Option<String>,

        /// Leave edges unlabelled
        #[arg(long)]
        no_edge_labels: bool,

        /// Print a summary of the hottest call paths to stderr
        #[arg(long)]
        summary: bool,

        /// Number of call paths listed in the summary
        #[arg(long, default_value = "20")]
        top_nodes: usize,
    },

    /// Parse trace files and print their totals
    Validate {
        /// Trace files to check
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Convert {
            files,
            ignore,
            threshold,
            aggregate,
            output,
            json,
            title,
            no_edge_labels,
            summary,
            top_nodes,
        } => {
            let mut dot_config = DotConfig::new().with_edge_labels(!no_edge_labels);
            if let Some(title) = title {
                dot_config = dot_config.with_title(title);
            }

            let args = ConvertArgs {
                inputs: files,
                ignore_errors: ignore,
                threshold,
                aggregation: aggregate,
                output_dot: output,
                output_json: json,
                dot_config,
                print_summary: summary,
                top_nodes,
            };

            execute_convert(args)?;
        }

        Commands::Validate { files } => {
            validate_trace_files(&files)?;
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}

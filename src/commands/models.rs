use crate::aggregator::AggregationMode;
use crate::graph::DotConfig;
use crate::utils::config::DEFAULT_THRESHOLD;
use std::path::PathBuf;

/// Arguments for the convert command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct ConvertArgs {
    /// Trace files, merged in this order
    pub inputs: Vec<PathBuf>,

    /// Skip files that fail to parse instead of aborting the run
    pub ignore_errors: bool,

    /// Prune call paths below this percentage of total time
    pub threshold: f64,

    /// How repeated call paths are combined
    pub aggregation: AggregationMode,

    /// Output path for the DOT graph (stdout if omitted)
    pub output_dot: Option<PathBuf>,

    /// Output path for the JSON report (optional)
    pub output_json: Option<PathBuf>,

    /// DOT rendering configuration
    pub dot_config: DotConfig,

    /// Print text summary to stderr
    pub print_summary: bool,

    /// Number of hottest nodes listed in the summary
    pub top_nodes: usize,
}

impl Default for ConvertArgs {
    fn default() -> Self {
        Self {
            inputs: Vec::new(),
            ignore_errors: false,
            threshold: DEFAULT_THRESHOLD,
            aggregation: AggregationMode::default(),
            output_dot: None,
            output_json: None,
            dot_config: DotConfig::default(),
            print_summary: false,
            top_nodes: 20,
        }
    }
}

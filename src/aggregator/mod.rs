//! Combining and pruning call trees.
//!
//! This module transforms per-file call trees into the final tree:
//! - Merging trees from several files under one root
//! - Aggregating repeated call paths
//! - Pruning call paths below a share of the total time
//! - Ranking the hottest nodes for text summaries

pub mod call_path;
pub mod merge;
pub mod metrics;
pub mod threshold;

// Re-export main types and functions
pub use call_path::{aggregate_call_paths, AggregationMode};
pub use merge::merge_trees;
pub use metrics::{hottest_nodes, HotNode};
pub use threshold::{filter_by_threshold, is_below_threshold};

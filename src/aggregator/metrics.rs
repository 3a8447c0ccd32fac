//! Rank the hottest nodes of a call tree.
//!
//! Hot nodes are the call paths with the largest inclusive time. These are
//! the primary targets for optimization.

use crate::parser::symbols::Symbols;
use crate::tree::{CallTree, Node};
use log::debug;

/// A call path ranked by inclusive time
#[derive(Debug, Clone, PartialEq)]
pub struct HotNode {
    pub function: String,
    pub file: String,

    /// Distance from the synthetic root
    pub depth: usize,

    pub self_time: u64,
    pub inclusive_time: u64,
    pub call_count: u64,

    /// Share of the tree's total time
    pub percentage: f64,
}

/// Return the `top_n` nodes with the largest inclusive time
///
/// **Public** - main entry point for metrics calculation
///
/// Ties keep tree order, so the caller appears before an equally hot callee.
pub fn hottest_nodes(tree: &CallTree, symbols: &Symbols, top_n: usize) -> Vec<HotNode> {
    let total = tree.total_time();
    let mut visits: Vec<_> = tree
        .preorder()
        .into_iter()
        .filter(|visit| !visit.node.is_root())
        .collect();

    debug!("Ranking {} nodes by inclusive time", visits.len());

    visits.sort_by(|a, b| b.node.inclusive_time.cmp(&a.node.inclusive_time));
    visits
        .into_iter()
        .take(top_n)
        .map(|visit| create_hot_node(visit.node, visit.depth, symbols, total))
        .collect()
}

/// Create a HotNode from a tree node
///
/// **Public** - conversion with names resolved
pub fn create_hot_node(node: &Node, depth: usize, symbols: &Symbols, total: u64) -> HotNode {
    HotNode {
        function: symbols.function_name(node.function).unwrap_or("?").to_string(),
        file: symbols.file_name(node.file).unwrap_or("?").to_string(),
        depth,
        self_time: node.self_time,
        inclusive_time: node.inclusive_time,
        call_count: node.call_count,
        percentage: percentage(node.inclusive_time, total),
    }
}

/// `part` as a percentage of `total`, 0 when the total is 0
pub fn percentage(part: u64, total: u64) -> f64 {
    if total > 0 {
        (part as f64 / total as f64) * 100.0
    } else {
        0.0
    }
}

//! Collapse sibling nodes that share a (function, file) identity.

use crate::tree::{CallTree, Node};
use crate::utils::error::ConfigError;
use log::debug;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// How call paths are combined after merging
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AggregationMode {
    /// Key every node by its function and file along the call path
    #[default]
    FuncFile,
    /// Leave the merged tree as it is
    None,
}

impl AggregationMode {
    pub fn as_str(self) -> &'static str {
        match self {
            AggregationMode::FuncFile => "func-file",
            AggregationMode::None => "none",
        }
    }

    /// Apply this mode to a tree
    pub fn apply(self, tree: CallTree) -> CallTree {
        match self {
            AggregationMode::FuncFile => aggregate_call_paths(tree),
            AggregationMode::None => tree,
        }
    }
}

impl FromStr for AggregationMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "func-file" => Ok(AggregationMode::FuncFile),
            "none" => Ok(AggregationMode::None),
            other => Err(ConfigError::UnknownAggregationMode(other.to_string())),
        }
    }
}

impl fmt::Display for AggregationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Collapse same-identity siblings at every level of the tree
///
/// **Public** - main entry point for aggregation
///
/// Siblings with equal `(function, file)` become one node holding the sums
/// of their self time, inclusive time and call count; their children are
/// concatenated in order and aggregated in turn. The group takes the place
/// of its first member. Nodes at different positions in the tree are never
/// combined.
pub fn aggregate_call_paths(mut tree: CallTree) -> CallTree {
    let before = tree.node_count();

    // Explicit worklist; recursive traces nest tens of thousands of levels deep
    let mut pending = vec![&mut tree.root];
    while let Some(node) = pending.pop() {
        node.children = aggregate_siblings(std::mem::take(&mut node.children));
        pending.extend(node.children.iter_mut());
    }

    debug!("Aggregated call paths: {} -> {} nodes", before, tree.node_count());
    tree
}

/// Collapse one sibling list; the groups' own children are left as is
fn aggregate_siblings(children: Vec<Node>) -> Vec<Node> {
    let mut groups: Vec<Node> = Vec::with_capacity(children.len());
    let mut positions = HashMap::new();

    for mut child in children {
        match positions.get(&child.key()) {
            Some(&position) => {
                let group: &mut Node = &mut groups[position];
                group.self_time = group.self_time.saturating_add(child.self_time);
                group.inclusive_time = group.inclusive_time.saturating_add(child.inclusive_time);
                group.call_count = group.call_count.saturating_add(child.call_count);
                group.children.append(&mut child.children);
            }
            None => {
                positions.insert(child.key(), groups.len());
                groups.push(child);
            }
        }
    }

    groups
}

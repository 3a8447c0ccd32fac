//! JSON report schema for the final call tree.
//!
//! Names are resolved so the report stands on its own, without the
//! interning tables of the run that produced it. Nodes are stored flat in
//! preorder and linked by index, so arbitrarily deep trees serialize
//! without nesting. Schema is versioned to allow future evolution.

use crate::parser::symbols::Symbols;
use crate::tree::{CallTree, Visit};
use crate::utils::config::{ROOT_LABEL, SCHEMA_VERSION};
use serde::{Deserialize, Serialize};

/// Top-level report structure written to JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallTreeReport {
    /// Schema version for compatibility checking
    pub version: String,

    /// Trace files that made it into the tree
    pub inputs: Vec<String>,

    /// Total inclusive time of the tree, before any pruning
    pub total_time: u64,

    /// Number of nodes in the report, root included
    pub node_count: usize,

    /// Every node in preorder; the root is `nodes[0]`
    pub nodes: Vec<ReportNode>,

    /// Timestamp when the report was generated
    pub generated_at: String,
}

impl CallTreeReport {
    pub fn root(&self) -> Option<&ReportNode> {
        self.nodes.first()
    }

    /// Children of `node`, in tree order
    pub fn children<'a>(&'a self, node: &'a ReportNode) -> impl Iterator<Item = &'a ReportNode> + 'a {
        node.children.iter().filter_map(|&id| self.nodes.get(id))
    }
}

/// One node of the report tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportNode {
    /// Index of this node in [`CallTreeReport::nodes`]
    pub id: usize,

    /// `None` for the root
    pub parent: Option<usize>,

    pub depth: usize,
    pub function: String,
    pub file: String,
    pub self_time: u64,
    pub inclusive_time: u64,
    pub call_count: u64,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<usize>,
}

/// Convert a call tree into its report form
///
/// **Public** - used by commands to create the JSON output
pub fn to_report(tree: &CallTree, symbols: &Symbols, inputs: Vec<String>) -> CallTreeReport {
    use chrono::Utc;

    let visits = tree.preorder();
    let mut nodes: Vec<ReportNode> = visits
        .iter()
        .map(|visit| report_node(visit, symbols))
        .collect();
    for visit in &visits {
        if let Some(parent) = visit.parent {
            nodes[parent].children.push(visit.index);
        }
    }

    CallTreeReport {
        version: SCHEMA_VERSION.to_string(),
        inputs,
        total_time: tree.total_time(),
        node_count: nodes.len(),
        nodes,
        generated_at: Utc::now().to_rfc3339(),
    }
}

fn report_node(visit: &Visit<'_>, symbols: &Symbols) -> ReportNode {
    let node = visit.node;
    let function = if node.is_root() {
        ROOT_LABEL
    } else {
        symbols.function_name(node.function).unwrap_or("?")
    };

    ReportNode {
        id: visit.index,
        parent: visit.parent,
        depth: visit.depth,
        function: function.to_string(),
        file: symbols.file_name(node.file).unwrap_or_default().to_string(),
        self_time: node.self_time,
        inclusive_time: node.inclusive_time,
        call_count: node.call_count,
        children: Vec::new(),
    }
}

//! Graphviz DOT rendering of a call tree.

use super::styler::{NodeStyler, NodeView};
use crate::aggregator::metrics::percentage;
use crate::parser::symbols::Symbols;
use crate::tree::CallTree;
use crate::utils::config::ROOT_LABEL;
use log::info;
use std::fmt::Write;

/// DOT rendering configuration
#[derive(Debug, Clone)]
pub struct DotConfig {
    /// Graph label shown above the tree
    pub title: Option<String>,

    /// Label edges with inclusive time and share of total
    pub edge_labels: bool,

    /// Command lines of the traces, written as comments
    pub commands: Vec<String>,
}

impl Default for DotConfig {
    fn default() -> Self {
        Self {
            title: None,
            edge_labels: true,
            commands: Vec::new(),
        }
    }
}

impl DotConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_edge_labels(mut self, edge_labels: bool) -> Self {
        self.edge_labels = edge_labels;
        self
    }

    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.commands.push(command.into());
        self
    }
}

/// Render the tree as a DOT digraph
///
/// **Public** - main entry point for graph rendering
///
/// Emits one node statement per tree node (the root included) and one edge
/// statement per parent/child pair, in preorder following each node's
/// child order. Node ids are `n<preorder index>`.
pub fn generate_dot(
    tree: &CallTree,
    symbols: &Symbols,
    styler: &dyn NodeStyler,
    config: Option<&DotConfig>,
) -> String {
    let config = config.cloned().unwrap_or_default();
    let total_time = tree.total_time();
    let visits = tree.preorder();

    info!("Rendering DOT graph with {} nodes", visits.len());

    let mut out = String::new();
    out.push_str("digraph calltree {\n");
    for command in &config.commands {
        let _ = writeln!(out, "  // cmd: {}", command.replace('\n', " "));
    }
    out.push_str("  graph [rankdir=TB, ordering=out");
    if let Some(title) = &config.title {
        let _ = write!(out, ", labelloc=t, label=\"{}\"", escape_dot(title));
    }
    out.push_str("];\n");
    out.push_str("  node [shape=box, style=filled];\n");
    out.push_str("  edge [labelfontsize=12];\n");
    out.push('\n');

    for visit in &visits {
        let node = visit.node;
        let view = NodeView {
            node,
            function: if node.is_root() {
                ROOT_LABEL
            } else {
                symbols.function_name(node.function).unwrap_or("?")
            },
            file: symbols.file_name(node.file).unwrap_or(""),
            total_time,
        };
        let style = styler.style(&view);

        let _ = write!(
            out,
            "  n{} [label=\"{}\", fillcolor=\"{}\", fontcolor=\"{}\"",
            visit.index,
            escape_dot(&style.label),
            escape_dot(&style.fill_color),
            escape_dot(&style.font_color)
        );
        if let Some(shape) = style.shape {
            let _ = write!(out, ", shape={}", shape);
        }
        out.push_str("];\n");

        if let Some(parent) = visit.parent {
            let _ = write!(out, "  n{} -> n{}", parent, visit.index);
            if config.edge_labels {
                let _ = write!(
                    out,
                    " [label=\"{} ({:.1}%)\"]",
                    node.inclusive_time,
                    percentage(node.inclusive_time, total_time)
                );
            }
            out.push_str(";\n");
        }
    }

    out.push_str("}\n");
    info!("DOT graph generated ({} bytes)", out.len());
    out
}

/// Escape a string for use inside a double-quoted DOT id
pub fn escape_dot(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => {}
            other => escaped.push(other),
        }
    }
    escaped
}

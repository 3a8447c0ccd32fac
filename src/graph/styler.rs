//! Pluggable node styling for the DOT renderer.
//!
//! The renderer asks a [`NodeStyler`] for the label and colors of every node,
//! so presentation can change without touching traversal.

use crate::aggregator::metrics::percentage;
use crate::tree::Node;
use crate::utils::config::{INTERNAL_FUNCTION_PREFIX, ROOT_LABEL};

/// A node together with everything a styler may want to look at
#[derive(Debug, Clone, Copy)]
pub struct NodeView<'a> {
    pub node: &'a Node,
    pub function: &'a str,
    pub file: &'a str,

    /// Total time of the whole tree
    pub total_time: u64,
}

impl NodeView<'_> {
    /// Share of the total time spent in this node and its callees
    pub fn share(&self) -> f64 {
        percentage(self.node.inclusive_time, self.total_time)
    }

    pub fn is_internal(&self) -> bool {
        self.function.starts_with(INTERNAL_FUNCTION_PREFIX)
    }
}

/// Display attributes for one node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeStyle {
    /// Label text; line breaks are plain `\n`
    pub label: String,
    pub fill_color: String,
    pub font_color: String,

    /// Overrides the graph's default box shape
    pub shape: Option<&'static str>,
}

/// Maps a node to its display attributes
pub trait NodeStyler {
    fn style(&self, view: &NodeView<'_>) -> NodeStyle;
}

impl<F> NodeStyler for F
where
    F: Fn(&NodeView<'_>) -> NodeStyle,
{
    fn style(&self, view: &NodeView<'_>) -> NodeStyle {
        self(view)
    }
}

/// Heat-colored boxes labelled with name, file and times
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultStyler;

impl NodeStyler for DefaultStyler {
    fn style(&self, view: &NodeView<'_>) -> NodeStyle {
        let node = view.node;

        if node.is_root() {
            return NodeStyle {
                label: format!("{}\ntotal: {}", ROOT_LABEL, view.total_time),
                fill_color: "#6495ed".to_string(), // Cornflower Blue
                font_color: "#ffffff".to_string(),
                shape: Some("ellipse"),
            };
        }

        let mut label = format!(
            "{}\n{}\nself: {} | incl: {} ({:.1}%)",
            view.function,
            view.file,
            node.self_time,
            node.inclusive_time,
            view.share()
        );
        if node.call_count > 1 {
            label.push_str(&format!("\ncalls: {}", node.call_count));
        }

        let (fill, font) = heat_color(view.share(), view.is_internal());
        NodeStyle {
            label,
            fill_color: fill.to_string(),
            font_color: font.to_string(),
            shape: None,
        }
    }
}

/// Fill and font color for a share of total time
fn heat_color(share: f64, internal: bool) -> (&'static str, &'static str) {
    if share >= 50.0 {
        ("#dc143c", "#ffffff") // Crimson
    } else if share >= 25.0 {
        ("#ff8c00", "#000000") // Dark Orange
    } else if share >= 10.0 {
        ("#ffa500", "#000000") // Orange
    } else if share >= 5.0 {
        ("#ffd700", "#000000") // Gold
    } else if internal {
        ("#b0c4de", "#000000") // Light Steel Blue
    } else {
        ("#d3d3d3", "#000000") // Light Gray
    }
}

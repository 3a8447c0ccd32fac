//! Graph rendering of the final call tree.
//!
//! This module turns a call tree into a Graphviz DOT description. Node
//! appearance is delegated to a [`NodeStyler`].

pub mod dot;
pub mod styler;
pub mod summary;

// Re-export main types
pub use dot::{escape_dot, generate_dot, DotConfig};
pub use styler::{DefaultStyler, NodeStyle, NodeStyler, NodeView};
pub use summary::generate_text_summary;

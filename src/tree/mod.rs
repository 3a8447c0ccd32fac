//! Call tree model and reconstruction from flat trace entries.

pub mod builder;
pub mod node;

pub use builder::build_tree;
pub use node::{CallTree, Node, Visit};

//! Call tree nodes.

use crate::parser::symbols::{FileId, FunctionId};

/// One call path in the tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub function: FunctionId,
    pub file: FileId,
    pub self_time: u64,
    pub inclusive_time: u64,

    /// Number of calls folded into this node
    pub call_count: u64,

    pub children: Vec<Node>,
}

impl Node {
    pub fn new(function: FunctionId, file: FileId, self_time: u64, inclusive_time: u64) -> Self {
        Self {
            function,
            file,
            self_time,
            inclusive_time,
            call_count: 1,
            children: Vec::new(),
        }
    }

    /// The synthetic root, identified by the sentinel ids
    pub fn root() -> Self {
        let mut root = Self::new(FunctionId::ROOT, FileId::ROOT, 0, 0);
        root.call_count = 0;
        root
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    pub fn is_root(&self) -> bool {
        self.function.is_root()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Identity used when collapsing siblings
    pub fn key(&self) -> (FunctionId, FileId) {
        (self.function, self.file)
    }
}

// Subtrees are released through a worklist, never one stack frame per level
impl Drop for Node {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

/// A node reached during a preorder walk
#[derive(Debug, Clone, Copy)]
pub struct Visit<'a> {
    /// Position in the walk; the root is 0
    pub index: usize,
    pub parent: Option<usize>,
    pub depth: usize,
    pub node: &'a Node,
}

/// A rooted call tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallTree {
    pub root: Node,
}

impl CallTree {
    /// A tree with nothing but the synthetic root
    pub fn new() -> Self {
        Self { root: Node::root() }
    }

    pub fn from_children(children: Vec<Node>) -> Self {
        let mut tree = Self {
            root: Node::root().with_children(children),
        };
        tree.refresh_root_totals();
        tree
    }

    /// Total inclusive time of the whole tree
    pub fn total_time(&self) -> u64 {
        self.root.inclusive_time
    }

    /// Recompute the root's figures from its direct children
    pub fn refresh_root_totals(&mut self) {
        let children = &self.root.children;
        self.root.inclusive_time = children
            .iter()
            .fold(0, |sum: u64, c| sum.saturating_add(c.inclusive_time));
        self.root.call_count = children
            .iter()
            .fold(0, |sum: u64, c| sum.saturating_add(c.call_count));
    }

    /// Number of nodes, the root included
    pub fn node_count(&self) -> usize {
        self.preorder().len()
    }

    pub fn max_depth(&self) -> usize {
        self.preorder().iter().map(|visit| visit.depth).max().unwrap_or(0)
    }

    /// Visit every node parent-first, children in stored order.
    ///
    /// Iterative, so arbitrarily deep trees are fine.
    pub fn preorder(&self) -> Vec<Visit<'_>> {
        let mut visits = Vec::new();
        let mut pending = vec![(&self.root, None, 0)];

        while let Some((node, parent, depth)) = pending.pop() {
            let index = visits.len();
            visits.push(Visit {
                index,
                parent,
                depth,
                node,
            });
            for child in node.children.iter().rev() {
                pending.push((child, Some(index), depth + 1));
            }
        }

        visits
    }
}

impl Default for CallTree {
    fn default() -> Self {
        Self::new()
    }
}

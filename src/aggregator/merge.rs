//! Merge call trees from several trace files under one root.

use crate::tree::CallTree;
use log::debug;

impl CallTree {
    /// Move `other`'s top-level nodes under this tree's root.
    ///
    /// No deduplication happens here; identical call paths from different
    /// files stay separate until the tree is aggregated.
    pub fn merge(&mut self, other: CallTree) {
        let mut root = other.root;
        self.root.self_time = self.root.self_time.saturating_add(root.self_time);
        self.root.inclusive_time = self.root.inclusive_time.saturating_add(root.inclusive_time);
        self.root.call_count = self.root.call_count.saturating_add(root.call_count);
        self.root.children.append(&mut root.children);
    }
}

/// Merge any number of trees into one
///
/// **Public** - convenience over [`CallTree::merge`]
pub fn merge_trees(trees: impl IntoIterator<Item = CallTree>) -> CallTree {
    let mut merged = CallTree::new();
    let mut count = 0;
    for tree in trees {
        merged.merge(tree);
        count += 1;
    }
    debug!(
        "Merged {} trees: {} top-level nodes, total time {}",
        count,
        merged.root.children.len(),
        merged.total_time()
    );
    merged
}

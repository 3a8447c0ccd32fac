//! Prune call paths that account for too little of the total time.

use crate::tree::{CallTree, Node};
use log::debug;

/// Remove subtrees below `threshold` percent of the tree's total time
///
/// **Public** - main entry point for filtering
///
/// The denominator is the root's inclusive time, taken once before pruning,
/// so every decision is relative to the whole trace. Surviving nodes keep
/// their recorded figures. A threshold of 100 or more leaves only the root.
///
/// # Returns
/// Number of nodes removed
pub fn filter_by_threshold(tree: &mut CallTree, threshold: f64) -> usize {
    let total = tree.total_time();
    let before = tree.node_count();

    if threshold >= 100.0 {
        tree.root.children.clear();
    } else {
        prune(&mut tree.root, total, threshold);
    }

    let removed = before - tree.node_count();
    debug!(
        "Threshold {}% of {}: removed {} of {} nodes",
        threshold, total, removed, before
    );
    removed
}

/// Whether a node with `inclusive_time` falls below `threshold`% of `total`
pub fn is_below_threshold(inclusive_time: u64, total: u64, threshold: f64) -> bool {
    (inclusive_time as f64) * 100.0 < threshold * total as f64
}

fn prune(root: &mut Node, total: u64, threshold: f64) {
    let mut pending = vec![root];
    while let Some(node) = pending.pop() {
        node.children
            .retain(|child| !is_below_threshold(child.inclusive_time, total, threshold));
        pending.extend(node.children.iter_mut());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::symbols::{FileId, FunctionId};

    fn node(function: u32, self_time: u64, inclusive: u64) -> Node {
        Node::new(FunctionId(function), FileId(1), self_time, inclusive)
    }

    fn sample() -> CallTree {
        let main = node(1, 0, 100).with_children(vec![
            node(2, 60, 80).with_children(vec![node(4, 20, 20)]),
            node(3, 20, 20),
        ]);
        CallTree::from_children(vec![main])
    }

    #[test]
    fn test_threshold_is_relative_to_whole_tree() {
        let mut tree = sample();
        // 20 of 100 is below 25%, even though 20 of foo's 80 is exactly 25%
        let removed = filter_by_threshold(&mut tree, 25.0);

        assert_eq!(removed, 2);
        let main = &tree.root.children[0];
        assert_eq!(main.children.len(), 1);
        assert_eq!(main.children[0].function, FunctionId(2));
        assert!(main.children[0].is_leaf());
        // Figures of survivors are untouched
        assert_eq!(main.inclusive_time, 100);
        assert_eq!(main.children[0].inclusive_time, 80);
    }

    #[test]
    fn test_exact_share_is_kept() {
        let mut tree = sample();
        filter_by_threshold(&mut tree, 20.0);
        assert_eq!(tree.node_count(), 5);
    }

    #[test]
    fn test_zero_threshold_keeps_everything() {
        let mut tree = sample();
        tree.root.children[0].children.push(node(5, 0, 0));
        assert_eq!(filter_by_threshold(&mut tree, 0.0), 0);
    }

    #[test]
    fn test_full_threshold_leaves_bare_root() {
        let mut tree = sample();
        filter_by_threshold(&mut tree, 100.0);
        assert!(tree.root.is_leaf());
        assert_eq!(tree.total_time(), 100);
    }

    #[test]
    fn test_empty_tree_is_untouched() {
        let mut tree = CallTree::new();
        assert_eq!(filter_by_threshold(&mut tree, 1.0), 0);
    }
}

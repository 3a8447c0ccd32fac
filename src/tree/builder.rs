//! Rebuild the call tree from the reader's flat entry list.
//!
//! Xdebug writes a function's block when the function returns, so callees
//! always precede their caller. Read backwards, the list is a preorder walk
//! where every entry announces how many children follow it (its number of
//! calls). A single backward pass with a stack of open frames is enough.

use super::node::{CallTree, Node};
use crate::parser::schema::{Call, Entry};
use crate::utils::error::TreeError;
use log::debug;

/// A node still waiting for children
struct Frame<'e> {
    slot: usize,

    /// Entry index, for error reporting
    entry: usize,

    /// Outgoing calls of the entry; `None` for the root, which takes any
    /// number of children
    calls: Option<&'e [Call]>,

    observed: usize,
}

impl Frame<'_> {
    fn is_complete(&self) -> bool {
        self.calls.is_some_and(|calls| self.observed == calls.len())
    }
}

/// Arena slot: the node without children, plus its children's slots
struct Slot {
    node: Node,
    children: Vec<usize>,
}

/// Build the call tree for one trace
///
/// **Public** - main entry point for tree reconstruction
///
/// A node's inclusive time comes from the call edge its caller recorded for
/// it. Top-level nodes have no such edge and use their self time plus the
/// inclusive time of their own calls.
///
/// # Errors
/// * `TreeError::CalleeMismatch` - an entry does not match the call edge it
///   is attached to
/// * `TreeError::Unresolved` - the list ends while some entries still expect
///   callees (truncated or corrupt input)
pub fn build_tree(entries: &[Entry]) -> Result<CallTree, TreeError> {
    let mut slots = vec![Slot {
        node: Node::root(),
        children: Vec::new(),
    }];
    let mut stack = vec![Frame {
        slot: 0,
        entry: entries.len(),
        calls: None,
        observed: 0,
    }];

    for (index, entry) in entries.iter().enumerate().rev() {
        let slot = slots.len();

        let Some(parent) = stack.last_mut() else {
            // The root frame is never popped
            break;
        };
        let (inclusive_time, call_count) = match parent.calls {
            Some(calls) => {
                // Complete frames are popped right away, so observed < len
                let edge = &calls[calls.len() - 1 - parent.observed];
                if edge.callee != entry.function {
                    return Err(TreeError::CalleeMismatch {
                        entry: index,
                        expected: edge.callee.0,
                        found: entry.function.0,
                    });
                }
                (edge.inclusive_time, edge.count.max(1))
            }
            None => {
                let inclusive_time = entry
                    .calls
                    .iter()
                    .fold(entry.self_time, |sum, c| sum.saturating_add(c.inclusive_time));
                (inclusive_time, 1)
            }
        };
        parent.observed += 1;
        slots[parent.slot].children.push(slot);

        let mut node = Node::new(entry.function, entry.file, entry.self_time, inclusive_time);
        node.call_count = call_count;
        slots.push(Slot {
            node,
            children: Vec::with_capacity(entry.calls.len()),
        });

        stack.push(Frame {
            slot,
            entry: index,
            calls: Some(&entry.calls),
            observed: 0,
        });
        while stack.last().is_some_and(Frame::is_complete) {
            stack.pop();
        }
    }

    if stack.len() > 1 {
        let entry = stack.last().map_or(0, |frame| frame.entry);
        return Err(TreeError::Unresolved {
            pending: stack.len() - 1,
            entry,
        });
    }

    let tree = assemble(slots);
    debug!(
        "Built call tree: {} nodes, total time {}",
        tree.node_count(),
        tree.total_time()
    );
    Ok(tree)
}

/// Turn the arena into an owned tree without recursing.
///
/// Children always live in later slots than their parent, so walking the
/// arena backwards finishes every child before its parent needs it.
fn assemble(slots: Vec<Slot>) -> CallTree {
    let (mut nodes, child_slots): (Vec<Option<Node>>, Vec<Vec<usize>>) = slots
        .into_iter()
        .map(|slot| (Some(slot.node), slot.children))
        .unzip();

    for index in (0..nodes.len()).rev() {
        let children: Vec<Node> = child_slots[index]
            .iter()
            .filter_map(|&child| nodes[child].take())
            .collect();
        if let Some(node) = nodes[index].as_mut() {
            node.children = children;
        }
    }

    let root = nodes.first_mut().and_then(Option::take).unwrap_or_else(Node::root);
    let mut tree = CallTree { root };
    tree.refresh_root_totals();
    tree
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::symbols::{FileId, FunctionId};

    fn entry(function: u32, self_time: u64, calls: &[(u32, u64)]) -> Entry {
        Entry {
            function: FunctionId(function),
            file: FileId(1),
            self_time,
            calls: calls
                .iter()
                .map(|&(callee, inclusive_time)| Call {
                    callee: FunctionId(callee),
                    position: 0,
                    inclusive_time,
                    count: 1,
                })
                .collect(),
            summary: None,
        }
    }

    #[test]
    fn test_empty_entry_list_gives_bare_root() {
        let tree = build_tree(&[]).unwrap();
        assert!(tree.root.is_leaf());
        assert_eq!(tree.total_time(), 0);
    }

    #[test]
    fn test_children_attach_in_reverse_and_take_edge_times() {
        // main calls a (30) then b (50); a's block comes first in the file
        let entries = vec![entry(2, 30, &[]), entry(3, 50, &[]), entry(1, 20, &[(2, 30), (3, 50)])];
        let tree = build_tree(&entries).unwrap();

        assert_eq!(tree.root.children.len(), 1);
        let main = &tree.root.children[0];
        assert_eq!(main.function, FunctionId(1));
        assert_eq!(main.inclusive_time, 100);

        let callees: Vec<(u32, u64)> = main
            .children
            .iter()
            .map(|c| (c.function.0, c.inclusive_time))
            .collect();
        assert_eq!(callees, vec![(3, 50), (2, 30)]);
        assert_eq!(tree.total_time(), 100);
    }

    #[test]
    fn test_top_level_inclusive_time_saturates() {
        let entries = vec![entry(2, 1, &[]), entry(1, u64::MAX, &[(2, 1)])];
        let tree = build_tree(&entries).unwrap();

        assert_eq!(tree.root.children[0].inclusive_time, u64::MAX);
        assert_eq!(tree.total_time(), u64::MAX);
    }

    #[test]
    fn test_truncated_list_is_unresolved() {
        // main expects two callees but only one block precedes it
        let entries = vec![entry(2, 30, &[]), entry(1, 0, &[(2, 30), (2, 30)])];
        let err = build_tree(&entries).unwrap_err();
        assert_eq!(err, TreeError::Unresolved { pending: 1, entry: 1 });
    }

    #[test]
    fn test_callee_mismatch_is_reported() {
        let entries = vec![entry(3, 30, &[]), entry(1, 0, &[(2, 30)])];
        let err = build_tree(&entries).unwrap_err();
        assert_eq!(
            err,
            TreeError::CalleeMismatch {
                entry: 0,
                expected: 2,
                found: 3
            }
        );
    }
}

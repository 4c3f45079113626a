use thiserror::Error;

/// A broken tree invariant found by [`Tree::validate`][crate::Tree::validate].
///
/// Keys are rendered with their `Debug` implementation so the error isn't generic over the key
/// type. Any of these coming out of a tree built only through `insert` is a bug in this crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantError {
    /// A key sits on the wrong side of one of its ancestors (or duplicates it).
    #[error("key {key} is out of order with its ancestor {ancestor}")]
    Unordered {
        /// The ancestor whose bound is violated.
        ancestor: String,
        /// The misplaced key.
        key: String,
    },

    /// A node's subtrees differ in height by more than one.
    #[error("node {key} has balance factor {balance}")]
    Unbalanced {
        /// The key of the unbalanced node.
        key: String,
        /// `height(left) - height(right)` at that node.
        balance: isize,
    },

    /// A node's cached height doesn't match its children.
    #[error("node {key} caches height {cached} but its children give {actual}")]
    StaleHeight {
        /// The key of the node with the wrong height.
        key: String,
        /// The height stored in the node.
        cached: isize,
        /// The height computed from its children.
        actual: isize,
    },

    /// Some stored nodes can't be reached from the root.
    #[error("only {reachable} of {stored} nodes are reachable from the root")]
    Detached {
        /// Nodes found by walking from the root.
        reachable: usize,
        /// Nodes held by the tree.
        stored: usize,
    },
}

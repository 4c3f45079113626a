//! This crate exposes an insert-only AVL tree: an ordered set of unique keys that stays balanced
//! as keys are added.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree stores keys in `Node`s, each of which may have a left and a right child.
//! The invariants that make it searchable are:
//!
//! 1. For every `Node`, all the keys in its left subtree are less than its own key.
//! 2. For every `Node`, all the keys in its right subtree are greater than its own key.
//!
//! Looking a key up then takes `O(height)` comparisons, where `height` is the length of the
//! longest path from the root down to a leaf. Inserting keys in sorted order into a plain BST
//! makes that height `O(N)`.
//!
//! ## AVL Tree
//!
//! An AVL tree additionally keeps, at every `Node`, the heights of its two subtrees within one
//! of each other. Each node caches its own height (a leaf has height `0` and a missing subtree
//! counts as `-1`). After an insertion, the nodes passed on the way down are revisited from the
//! bottom up. Any node that became two levels taller on one side is fixed by a "rotation": a
//! local re-linking of up to three nodes that keeps the keys in order while lifting the tall side.
//! This bounds the height by about `1.44 * lg(N)`.
//!
//! ```
//! use avl_tree::Tree;
//!
//! let mut tree = Tree::new();
//! for key in 1..=3 {
//!     tree.insert(key);
//! }
//!
//! // Sorted input still yields a balanced tree: 2 at the root with 1 and 3 below it.
//! assert_eq!(tree.height(), 1);
//! assert!(tree.find(&3));
//! assert!(!tree.find(&4));
//! ```

#![deny(missing_docs)]

mod error;
mod iter;
mod node;
pub mod tree;

pub use error::InvariantError;
pub use iter::Iter;
pub use tree::Tree;

#[cfg(test)]
mod test {
    pub(crate) mod quick;
}

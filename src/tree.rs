//! An insert-only AVL tree holding a set of unique keys.
//!
//! Nodes live in an arena owned by the [`Tree`] and refer to their children by index. Insertion
//! walks down from the root remembering every node it passes (the "route") and then replays that
//! route from the new leaf back up to the root, rotating wherever a node has become more than one
//! level taller on one side than the other.
//!
//! # Examples
//!
//! ```
//! use avl_tree::Tree;
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert!(!tree.find(&1));
//!
//! assert!(tree.insert(1));
//! assert!(tree.find(&1));
//!
//! // Inserting the same key again changes nothing.
//! assert!(!tree.insert(1));
//! assert_eq!(tree.len(), 1);
//! ```

use std::cmp::Ordering;
use std::fmt;

use tracing::trace;

use crate::error::InvariantError;
use crate::iter::Iter;
use crate::node::{Arena, Node, NodeId};

/// A self-balancing Binary Search Tree (specifically, an AVL tree) of unique keys. Keys can be
/// inserted and looked up but never removed.
#[derive(Clone)]
pub struct Tree<K> {
    nodes: Vec<Node<K>>,
    root: Option<NodeId>,
}

/// Which child slot of a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

/// Rotations performed while rebalancing after one insertion. A double rotation is counted once
/// under `double`, not as two singles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Rotations {
    pub(crate) single: usize,
    pub(crate) double: usize,
}

/// What [`Tree::insert`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Insertion {
    /// The key was already present. Nothing changed.
    Duplicate,
    /// A new leaf was attached and the tree rebalanced.
    Inserted(Rotations),
}

impl<K> Default for Tree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> fmt::Debug for Tree<K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K> Tree<K> {
    /// Generate a new, empty `Tree`.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
        }
    }

    /// The number of keys in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree holds no keys.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The height of the tree: `-1` when empty, `0` for a single key, and never more than about
    /// `1.44 * lg(len)`.
    pub fn height(&self) -> isize {
        self.nodes.height(self.root)
    }

    /// Iterates over the keys in increasing order.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::Tree;
    ///
    /// let tree: Tree<_> = [3, 1, 2].into_iter().collect();
    ///
    /// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
    /// ```
    pub fn iter(&self) -> Iter<'_, K> {
        Iter::new(&self.nodes, self.root)
    }

    /// The smallest key, if any.
    pub fn first(&self) -> Option<&K> {
        self.spine_end(Side::Left)
    }

    /// The largest key, if any.
    pub fn last(&self) -> Option<&K> {
        self.spine_end(Side::Right)
    }

    fn spine_end(&self, side: Side) -> Option<&K> {
        let mut current = self.root?;
        while let Some(next) = self.child(current, side) {
            current = next;
        }
        Some(&self.nodes.node(current).key)
    }

    fn child(&self, id: NodeId, side: Side) -> Option<NodeId> {
        let node = self.nodes.node(id);
        match side {
            Side::Left => node.left,
            Side::Right => node.right,
        }
    }

    fn child_mut(&mut self, id: NodeId, side: Side) -> &mut Option<NodeId> {
        let node = &mut self.nodes[id.0];
        match side {
            Side::Left => &mut node.left,
            Side::Right => &mut node.right,
        }
    }

    fn alloc(&mut self, key: K) -> NodeId {
        self.nodes.push(Node::leaf(key));
        NodeId(self.nodes.len() - 1)
    }

    fn fix_height(&mut self, id: NodeId) {
        self.nodes[id.0].height = self.nodes.expected_height(id);
    }

    /// Replays `route` (root first, nearest ancestor of the new leaf last) from its end, fixing
    /// heights and rotating any node whose balance factor reached +/-2.
    fn rebalance(&mut self, mut route: Vec<NodeId>) -> Rotations {
        let mut rotations = Rotations::default();

        while let Some(head) = route.pop() {
            let balance = self.nodes.balance_factor(head);
            let new_head = if balance > 1 {
                let left = self.child(head, Side::Left).expect("left-heavy => left child");
                let left_node = self.nodes.node(left);
                if self.nodes.height(left_node.right) > self.nodes.height(left_node.left) {
                    rotations.double += 1;
                    self.rotate_left_right(head)
                } else {
                    rotations.single += 1;
                    self.rotate_right(head)
                }
            } else if balance < -1 {
                let right = self.child(head, Side::Right).expect("right-heavy => right child");
                let right_node = self.nodes.node(right);
                if self.nodes.height(right_node.left) > self.nodes.height(right_node.right) {
                    rotations.double += 1;
                    self.rotate_right_left(head)
                } else {
                    rotations.single += 1;
                    self.rotate_left(head)
                }
            } else {
                self.fix_height(head);
                head
            };

            if new_head != head {
                // The next entry on the route is the parent whose slot still points at `head`.
                match route.last().copied() {
                    Some(parent) => {
                        let side = if self.child(parent, Side::Left) == Some(head) {
                            Side::Left
                        } else {
                            Side::Right
                        };
                        *self.child_mut(parent, side) = Some(new_head);
                    }
                    None => self.root = Some(new_head),
                }
            }

            debug_assert!(self.nodes.balance_factor(new_head).abs() <= 1);
            debug_assert_eq!(
                self.nodes.node(new_head).height,
                self.nodes.expected_height(new_head)
            );
        }

        rotations
    }

    /// Rotate `head` to the right. This moves its left child up vertically and `head` down
    /// vertically, and returns the new local root. Used when the left child is too tall, so
    /// `head` must have a left child.
    ///
    /// ## Panics
    ///
    /// When called on a node without a left child.
    ///
    /// # Diagram
    ///
    /// ```text
    ///        head            new_root
    ///        /  \             /  \
    ///   new_root  z   ->     x   head
    ///     /  \                   /  \
    ///    x    y                 y    z
    /// ```
    fn rotate_right(&mut self, head: NodeId) -> NodeId {
        let new_root = self.child(head, Side::Left).expect("Rotate right => left child");

        self.nodes[head.0].left = self.nodes[new_root.0].right;
        self.nodes[new_root.0].right = Some(head);
        self.fix_height(head);
        self.fix_height(new_root);

        trace!(head = head.0, new_root = new_root.0, "rotated right");
        new_root
    }

    /// Mirror image of [`Tree::rotate_right`]: the right child moves up.
    fn rotate_left(&mut self, head: NodeId) -> NodeId {
        let new_root = self.child(head, Side::Right).expect("Rotate left => right child");

        self.nodes[head.0].right = self.nodes[new_root.0].left;
        self.nodes[new_root.0].left = Some(head);
        self.fix_height(head);
        self.fix_height(new_root);

        trace!(head = head.0, new_root = new_root.0, "rotated left");
        new_root
    }

    fn rotate_left_right(&mut self, head: NodeId) -> NodeId {
        let left = self.child(head, Side::Left).expect("Rotate left-right => left child");
        let raised = self.rotate_left(left);
        self.nodes[head.0].left = Some(raised);
        self.rotate_right(head)
    }

    fn rotate_right_left(&mut self, head: NodeId) -> NodeId {
        let right = self.child(head, Side::Right).expect("Rotate right-left => right child");
        let raised = self.rotate_right(right);
        self.nodes[head.0].right = Some(raised);
        self.rotate_left(head)
    }
}

impl<K> Tree<K>
where
    K: Ord,
{
    /// Whether the tree contains `key`. This never modifies the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1);
    ///
    /// assert!(tree.find(&1));
    /// assert!(!tree.find(&42));
    /// ```
    pub fn find(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Same as [`Tree::find`], named like the standard library's sets.
    pub fn contains(&self, key: &K) -> bool {
        self.find(key)
    }

    /// Returns the stored key equal to `key`, if any.
    pub fn get(&self, key: &K) -> Option<&K> {
        let mut current = self.root;
        while let Some(id) = current {
            let node = self.nodes.node(id);
            current = match key.cmp(&node.key) {
                Ordering::Less => node.left,
                Ordering::Equal => return Some(&node.key),
                Ordering::Greater => node.right,
            };
        }
        None
    }

    /// Inserts `key` into the tree, rebalancing as needed. Returns whether the key was new;
    /// inserting a key that is already present leaves the tree untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::Tree;
    ///
    /// let mut tree = Tree::new();
    ///
    /// assert!(tree.insert(1));
    /// assert!(tree.insert(2));
    /// assert!(!tree.insert(1));
    ///
    /// assert_eq!(tree.len(), 2);
    /// ```
    pub fn insert(&mut self, key: K) -> bool {
        matches!(self.insert_tracked(key), Insertion::Inserted(_))
    }

    pub(crate) fn insert_tracked(&mut self, key: K) -> Insertion {
        let Some(mut current) = self.root else {
            self.root = Some(self.alloc(key));
            trace!(height = self.height(), "inserted root");
            return Insertion::Inserted(Rotations::default());
        };

        let mut route = Vec::new();
        let (parent, side) = loop {
            route.push(current);
            let node = self.nodes.node(current);
            let (next, side) = match key.cmp(&node.key) {
                Ordering::Less => (node.left, Side::Left),
                Ordering::Equal => return Insertion::Duplicate,
                Ordering::Greater => (node.right, Side::Right),
            };
            match next {
                Some(next) => current = next,
                None => break (current, side),
            }
        };

        let leaf = self.alloc(key);
        *self.child_mut(parent, side) = Some(leaf);

        let rotations = self.rebalance(route);
        trace!(
            single = rotations.single,
            double = rotations.double,
            height = self.height(),
            "inserted key"
        );
        Insertion::Inserted(rotations)
    }

    /// Checks every node for the ordering, balance, and height invariants and that every stored
    /// node hangs off the root. A tree built through [`Tree::insert`] always passes.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::Tree;
    ///
    /// let tree: Tree<_> = (0..100).collect();
    ///
    /// assert_eq!(tree.validate(), Ok(()));
    /// ```
    pub fn validate(&self) -> Result<(), InvariantError>
    where
        K: fmt::Debug,
    {
        // Each entry carries the exclusive bounds its ancestors put on its key.
        let mut stack: Vec<(NodeId, Option<&K>, Option<&K>)> =
            self.root.map(|root| (root, None, None)).into_iter().collect();
        let mut reachable = 0;

        while let Some((id, lower, upper)) = stack.pop() {
            reachable += 1;
            let node = self.nodes.node(id);

            let violated = lower
                .filter(|lower| node.key <= **lower)
                .or_else(|| upper.filter(|upper| node.key >= **upper));
            if let Some(ancestor) = violated {
                return Err(InvariantError::Unordered {
                    ancestor: format!("{ancestor:?}"),
                    key: format!("{:?}", node.key),
                });
            }

            let actual = self.nodes.expected_height(id);
            if node.height != actual {
                return Err(InvariantError::StaleHeight {
                    key: format!("{:?}", node.key),
                    cached: node.height,
                    actual,
                });
            }

            let balance = self.nodes.balance_factor(id);
            if balance.abs() > 1 {
                return Err(InvariantError::Unbalanced {
                    key: format!("{:?}", node.key),
                    balance,
                });
            }

            if let Some(left) = node.left {
                stack.push((left, lower, Some(&node.key)));
            }
            if let Some(right) = node.right {
                stack.push((right, Some(&node.key), upper));
            }
        }

        if reachable != self.nodes.len() {
            return Err(InvariantError::Detached {
                reachable,
                stored: self.nodes.len(),
            });
        }
        Ok(())
    }
}

impl<K> FromIterator<K> for Tree<K>
where
    K: Ord,
{
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K> Extend<K> for Tree<K>
where
    K: Ord,
{
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<'a, K> IntoIterator for &'a Tree<K> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

//! Arena-resident nodes. A [`Node`] never points at its parent and is referenced by exactly one
//! slot: either its parent's `left`/`right` or the tree's root.

/// Index of a [`Node`] inside its tree's arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct NodeId(pub(crate) usize);

/// Height of an absent subtree. A leaf sits one above this at `0`.
pub(crate) const EMPTY_HEIGHT: isize = -1;

#[derive(Clone, Debug)]
pub(crate) struct Node<K> {
    pub(crate) key: K,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,

    /// How many edges are on the longest path from this node down to a leaf.
    pub(crate) height: isize,
}

impl<K> Node<K> {
    /// Construct a childless `Node` holding `key`.
    pub(crate) fn leaf(key: K) -> Self {
        Self {
            key,
            left: None,
            right: None,
            height: 0,
        }
    }
}

/// Read-only helpers over the node arena.
pub(crate) trait Arena<K> {
    fn node(&self, id: NodeId) -> &Node<K>;

    /// The cached height of the subtree at `id`, or [`EMPTY_HEIGHT`] when there is none.
    fn height(&self, id: Option<NodeId>) -> isize {
        id.map_or(EMPTY_HEIGHT, |id| self.node(id).height)
    }

    /// `height(left) - height(right)`. Positive means left-heavy.
    fn balance_factor(&self, id: NodeId) -> isize {
        let node = self.node(id);
        self.height(node.left) - self.height(node.right)
    }

    /// The height `id` should have given its children's cached heights.
    fn expected_height(&self, id: NodeId) -> isize {
        let node = self.node(id);
        1 + self.height(node.left).max(self.height(node.right))
    }
}

impl<K> Arena<K> for [Node<K>] {
    fn node(&self, id: NodeId) -> &Node<K> {
        &self[id.0]
    }
}

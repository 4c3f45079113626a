use std::iter::FusedIterator;

use crate::node::{Arena, Node, NodeId};

/// An in-order iterator over the keys of a [`Tree`][crate::Tree], created by
/// [`Tree::iter`][crate::Tree::iter].
///
/// Walks with an explicit stack of the ancestors still to be yielded so it never recurses.
#[derive(Clone, Debug)]
pub struct Iter<'a, K> {
    nodes: &'a [Node<K>],
    stack: Vec<NodeId>,
    remaining: usize,
}

impl<'a, K> Iter<'a, K> {
    pub(crate) fn new(nodes: &'a [Node<K>], root: Option<NodeId>) -> Self {
        let mut iter = Self {
            nodes,
            stack: Vec::new(),
            remaining: nodes.len(),
        };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut current: Option<NodeId>) {
        while let Some(id) = current {
            self.stack.push(id);
            current = self.nodes.node(id).left;
        }
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let nodes = self.nodes;
        let node = nodes.node(id);
        self.push_left_spine(node.right);
        self.remaining -= 1;
        Some(&node.key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {}

impl<K> FusedIterator for Iter<'_, K> {}

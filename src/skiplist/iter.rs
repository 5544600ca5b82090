use std::iter::FusedIterator;

use super::node::Idx;
use super::node::NULL;
use super::node::Node;

/// Ascending walk along level 0.
///
/// Each call to `iter()` starts a fresh walk. The shared borrow keeps the
/// list from being mutated underneath it.
pub struct Iter<'a, S, M> {
    nodes: &'a [Node<S, M>],
    current: Idx,
    remaining: usize,
}

impl<'a, S, M> Iter<'a, S, M> {
    pub(crate) fn new(nodes: &'a [Node<S, M>], current: Idx, remaining: usize) -> Self {
        let remaining = if current == NULL { 0 } else { remaining };
        Iter {
            nodes,
            current,
            remaining,
        }
    }
}

impl<'a, S, M> Iterator for Iter<'a, S, M> {
    type Item = (&'a S, &'a M);

    fn next(&mut self) -> Option<Self::Item> {
        if self.current == NULL {
            return None;
        }

        let node = &self.nodes[self.current as usize];
        self.current = node.link(0).next;
        self.remaining = self.remaining.saturating_sub(1);
        node.entry
            .as_ref()
            .map(|entry| (&entry.score, &entry.member))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<S, M> ExactSizeIterator for Iter<'_, S, M> {}

impl<S, M> FusedIterator for Iter<'_, S, M> {}

impl<S, M> Clone for Iter<'_, S, M> {
    fn clone(&self) -> Self {
        Iter {
            nodes: self.nodes,
            current: self.current,
            remaining: self.remaining,
        }
    }
}

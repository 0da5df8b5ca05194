use std::iter::FusedIterator;
use std::ops::Index;

use super::arena::{NodeId, Nodes, SENTINEL};
use super::{Balance, OrderedTree};

/// A position in an [`OrderedTree`]: one element, or the end.
///
/// Cursors are plain handles; read and move them through the tree that issued them.
/// A cursor keeps working across any mutation except deleting the element it points at.
/// Using it after that (or on a different tree) panics.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Cursor {
    pub(super) node: NodeId,
    // NOTE: the node's stamp at the time the cursor was made. Slots get reused, stamps never do.
    pub(super) stamp: u64,
}

impl<T, C, B: Balance> OrderedTree<T, C, B> {
    pub(super) fn cursor(&self, node: NodeId) -> Cursor {
        Cursor { node, stamp: self.nodes.stamp(node) }
    }

    pub(super) fn resolve(&self, at: Cursor) -> NodeId {
        assert!(
            self.nodes.holds(at.node, at.stamp),
            "cursor is stale or belongs to another tree"
        );
        at.node
    }

    /// The element at `at`, or `None` at the end.
    pub fn get(&self, at: Cursor) -> Option<&T> {
        self.nodes.try_value(self.resolve(at))
    }

    /// The position after `at`. Panics at `end()`.
    ///
    /// Complexity: O(log(n)) worst case, O(1) amortized over a full walk
    pub fn next(&self, at: Cursor) -> Cursor {
        let x = self.resolve(at);
        assert!(x != SENTINEL, "cannot advance past the end");
        self.cursor(self.nodes.successor(x))
    }

    /// The position before `at`. `prev(end())` is the last element. Panics at `begin()`.
    pub fn prev(&self, at: Cursor) -> Cursor {
        let x = self.resolve(at);
        // NOTE: on an empty tree `start` is the sentinel, so this also rejects `prev(end())` there
        assert!(x != self.start, "cannot retreat before the beginning");
        self.cursor(self.nodes.predecessor(x))
    }

    /// Number of `next` steps from `first` to `last`. `last` must not come before `first`.
    ///
    /// Complexity: O(distance + log(n))
    pub fn distance(&self, first: Cursor, last: Cursor) -> usize {
        let last = self.resolve(last);
        let mut x = self.resolve(first);
        let mut steps = 0;
        while x != last {
            assert!(x != SENTINEL, "`last` is not reachable from `first`");
            x = self.nodes.successor(x);
            steps += 1;
        }
        steps
    }

    /// Move `at` by `n` steps, forwards for positive `n` and backwards for negative.
    pub fn advance(&self, mut at: Cursor, n: isize) -> Cursor {
        for _ in 0..n.unsigned_abs() {
            at = if n > 0 { self.next(at) } else { self.prev(at) };
        }
        at
    }

    /// Every element, in order.
    pub fn iter(&self) -> Iter<'_, T, B> {
        Iter { nodes: &self.nodes, front: self.start, back: SENTINEL }
    }

    /// The elements in `[first, last)`. `last` must not come before `first`.
    pub fn iter_between(&self, first: Cursor, last: Cursor) -> Iter<'_, T, B> {
        Iter {
            nodes: &self.nodes,
            front: self.resolve(first),
            back: self.resolve(last),
        }
    }
}

impl<T, C, B: Balance> Index<Cursor> for OrderedTree<T, C, B> {
    type Output = T;

    /// Panics at `end()`.
    fn index(&self, at: Cursor) -> &T {
        self.nodes.value(self.resolve(at))
    }
}

/// Borrowing iterator over a `[front, back)` span of an [`OrderedTree`].
pub struct Iter<'a, T, B: Balance> {
    nodes: &'a Nodes<T, B::Tag>,
    front: NodeId,
    back: NodeId,
}

impl<T, B: Balance> Clone for Iter<'_, T, B> {
    fn clone(&self) -> Self {
        Self { nodes: self.nodes, front: self.front, back: self.back }
    }
}

impl<'a, T, B: Balance> Iterator for Iter<'a, T, B> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.front == self.back {
            return None;
        }
        let nodes = self.nodes;
        let value = nodes.value(self.front);
        self.front = nodes.successor(self.front);
        Some(value)
    }
}

impl<'a, T, B: Balance> DoubleEndedIterator for Iter<'a, T, B> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.front == self.back {
            return None;
        }
        let nodes = self.nodes;
        self.back = nodes.predecessor(self.back);
        Some(nodes.value(self.back))
    }
}

impl<T, B: Balance> FusedIterator for Iter<'_, T, B> {}

use std::fmt;

use crate::compare::{Compare, Natural};
use crate::tree::{Avl, Balance, Cursor, Iter, OrderedTree};

/// Sorted collection that keeps duplicates, in the order they were inserted.
#[derive(Clone)]
pub struct MultiSet<T, C = Natural, B: Balance = Avl> {
    base: OrderedTree<T, C, B>,
}

impl<T, C: Default, B: Balance> MultiSet<T, C, B> {
    pub fn new() -> Self {
        Self { base: OrderedTree::new() }
    }
}

impl<T, C, B: Balance> MultiSet<T, C, B> {
    pub fn with_comparator(cmp: C) -> Self {
        Self { base: OrderedTree::with_comparator(cmp) }
    }

    pub fn len(&self) -> usize {
        self.base.len()
    }

    pub fn is_empty(&self) -> bool {
        self.base.is_empty()
    }

    pub fn begin(&self) -> Cursor {
        self.base.begin()
    }

    pub fn end(&self) -> Cursor {
        self.base.end()
    }

    pub fn reverse_begin(&self) -> Cursor {
        self.base.reverse_begin()
    }

    pub fn reverse_end(&self) -> Cursor {
        self.base.reverse_end()
    }

    pub fn get(&self, at: Cursor) -> Option<&T> {
        self.base.get(at)
    }

    pub fn next(&self, at: Cursor) -> Cursor {
        self.base.next(at)
    }

    pub fn prev(&self, at: Cursor) -> Cursor {
        self.base.prev(at)
    }

    pub fn iter(&self) -> Iter<'_, T, B> {
        self.base.iter()
    }

    pub fn iter_between(&self, first: Cursor, last: Cursor) -> Iter<'_, T, B> {
        self.base.iter_between(first, last)
    }

    pub fn clear(&mut self) {
        self.base.clear()
    }
}

impl<T, C: Compare<T>, B: Balance> MultiSet<T, C, B> {
    /// How many elements are equivalent to `value`.
    ///
    /// Complexity: O(log(n) + count)
    pub fn count(&self, value: &T) -> usize {
        self.base.count_multi(value)
    }

    /// The oldest element equivalent to `value`, or `end()`.
    pub fn find(&self, value: &T) -> Cursor {
        self.base.find(value)
    }

    pub fn contains(&self, value: &T) -> bool {
        self.base.contains(value)
    }

    pub fn equal_range(&self, value: &T) -> (Cursor, Cursor) {
        self.base.equal_range_multi(value)
    }

    pub fn lower_bound(&self, value: &T) -> Cursor {
        self.base.lower_bound(value)
    }

    pub fn upper_bound(&self, value: &T) -> Cursor {
        self.base.upper_bound(value)
    }

    pub fn insert(&mut self, value: T) -> Cursor {
        self.base.insert_multi(value)
    }

    pub fn erase(&mut self, at: Cursor) -> Cursor {
        self.base.delete(at)
    }

    /// Remove the oldest element equivalent to `value`, if any.
    pub fn remove(&mut self, value: &T) -> bool {
        let at = self.base.find(value);
        if at == self.base.end() {
            return false;
        }
        self.base.delete(at);
        true
    }

    /// Remove every element equivalent to `value`, returning how many went.
    pub fn remove_all(&mut self, value: &T) -> usize {
        // the upper bound isn't part of the range, so it survives the deletes
        let (mut at, last) = self.base.equal_range_multi(value);
        let mut removed = 0;
        while at != last {
            at = self.base.delete(at);
            removed += 1;
        }
        removed
    }
}

impl<T, C: Default, B: Balance> Default for MultiSet<T, C, B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug, C, B: Balance> fmt::Debug for MultiSet<T, C, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T, C: Compare<T>, B: Balance> Extend<T> for MultiSet<T, C, B> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T, C: Compare<T> + Default, B: Balance> FromIterator<T> for MultiSet<T, C, B> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<T, C, B: Balance> IntoIterator for MultiSet<T, C, B> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.base.into_iter()
    }
}

impl<'a, T, C, B: Balance> IntoIterator for &'a MultiSet<T, C, B> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, B>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

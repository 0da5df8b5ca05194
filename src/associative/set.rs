use std::fmt;

use crate::compare::{Compare, Natural};
use crate::tree::{Avl, Balance, Cursor, Iter, OrderedTree};

/// Sorted set of unique elements.
#[derive(Clone)]
pub struct Set<T, C = Natural, B: Balance = Avl> {
    base: OrderedTree<T, C, B>,
}

impl<T, C: Default, B: Balance> Set<T, C, B> {
    pub fn new() -> Self {
        Self { base: OrderedTree::new() }
    }
}

impl<T, C, B: Balance> Set<T, C, B> {
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

    pub fn first(&self) -> Option<&T> {
        self.base.first()
    }

    pub fn last(&self) -> Option<&T> {
        self.base.last()
    }

    pub fn iter(&self) -> Iter<'_, T, B> {
        self.base.iter()
    }

    pub fn clear(&mut self) {
        self.base.clear()
    }
}

impl<T, C: Compare<T>, B: Balance> Set<T, C, B> {
    /// 1 if `value` is in the set, else 0.
    pub fn count(&self, value: &T) -> usize {
        self.base.count_unique(value)
    }

    pub fn find(&self, value: &T) -> Cursor {
        self.base.find(value)
    }

    pub fn contains(&self, value: &T) -> bool {
        self.base.contains(value)
    }

    pub fn equal_range(&self, value: &T) -> (Cursor, Cursor) {
        self.base.equal_range_unique(value)
    }

    pub fn lower_bound(&self, value: &T) -> Cursor {
        self.base.lower_bound(value)
    }

    pub fn upper_bound(&self, value: &T) -> Cursor {
        self.base.upper_bound(value)
    }

    /// `(position, true)` if `value` went in, `(end(), false)` if it was already there.
    pub fn insert(&mut self, value: T) -> (Cursor, bool) {
        self.base.insert_unique(value)
    }

    /// Remove the element at `at`, returning the position after it.
    pub fn erase(&mut self, at: Cursor) -> Cursor {
        self.base.delete(at)
    }

    /// Remove `value` if present.
    pub fn remove(&mut self, value: &T) -> bool {
        let at = self.base.find(value);
        if at == self.base.end() {
            return false;
        }
        self.base.delete(at);
        true
    }
}

impl<T, C: Default, B: Balance> Default for Set<T, C, B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug, C, B: Balance> fmt::Debug for Set<T, C, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.base, f)
    }
}

impl<T, C: Compare<T>, B: Balance> Extend<T> for Set<T, C, B> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T, C: Compare<T> + Default, B: Balance> FromIterator<T> for Set<T, C, B> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<T, C, B: Balance> IntoIterator for Set<T, C, B> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.base.into_iter()
    }
}

impl<'a, T, C, B: Balance> IntoIterator for &'a Set<T, C, B> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, B>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

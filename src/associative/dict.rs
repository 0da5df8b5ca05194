use std::fmt;
use std::ops::Index;

use crate::compare::{ByKey, Compare, Natural};
use crate::tree::{Avl, Balance, Cursor, OrderedTree};

/// Sorted map from unique keys to values.
///
/// Entries are `(K, V)` pairs ordered by key. Values can be rewritten in place through a cursor;
/// keys can't, since that could break the order. Remove and insert again to re-key.
#[derive(Clone)]
pub struct Dict<K, V, C = Natural, B: Balance = Avl> {
    base: OrderedTree<(K, V), ByKey<C>, B>,
}

impl<K, V, C: Default, B: Balance> Dict<K, V, C, B> {
    pub fn new() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<K, V, C, B: Balance> Dict<K, V, C, B> {
    /// `cmp` orders keys.
    pub fn with_comparator(cmp: C) -> Self {
        Self { base: OrderedTree::with_comparator(ByKey(cmp)) }
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

    pub fn next(&self, at: Cursor) -> Cursor {
        self.base.next(at)
    }

    pub fn prev(&self, at: Cursor) -> Cursor {
        self.base.prev(at)
    }

    /// The entry at `at`, or `None` at the end.
    pub fn entry(&self, at: Cursor) -> Option<(&K, &V)> {
        self.base.get(at).map(|(k, v)| (k, v))
    }

    /// The value at `at`, writable. The key stays out of reach.
    pub fn mapped_mut(&mut self, at: Cursor) -> Option<&mut V> {
        self.base.get_mut_unordered(at).map(|entry| &mut entry.1)
    }

    /// Replace the value at `at`, returning the old one. Panics at `end()`.
    pub fn write(&mut self, at: Cursor, value: V) -> V {
        let entry = self.base.get_mut_unordered(at).expect("cannot write through the end position");
        std::mem::replace(&mut entry.1, value)
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&K, &V)> + '_ {
        self.base.iter().map(|(k, v)| (k, v))
    }

    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &K> + '_ {
        self.base.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl DoubleEndedIterator<Item = &V> + '_ {
        self.base.iter().map(|(_, v)| v)
    }

    pub fn clear(&mut self) {
        self.base.clear()
    }

    fn key_cmp(&self) -> &C {
        &self.base.comparator().0
    }
}

impl<K, V, C: Compare<K>, B: Balance> Dict<K, V, C, B> {
    /// First entry whose key is not less than `key`.
    pub fn lower_bound(&self, key: &K) -> Cursor {
        let cmp = self.key_cmp();
        self.base.lower_bound_by(|(k, _)| cmp.less(k, key))
    }

    /// First entry whose key is greater than `key`.
    pub fn upper_bound(&self, key: &K) -> Cursor {
        let cmp = self.key_cmp();
        self.base.upper_bound_by(|(k, _)| cmp.less(key, k))
    }

    fn holds_key(&self, at: Cursor, key: &K) -> bool {
        self.base.get(at).is_some_and(|(k, _)| !self.key_cmp().less(key, k))
    }

    pub fn find(&self, key: &K) -> Cursor {
        let lb = self.lower_bound(key);
        if self.holds_key(lb, key) { lb } else { self.end() }
    }

    pub fn contains(&self, key: &K) -> bool {
        self.holds_key(self.lower_bound(key), key)
    }

    pub fn count(&self, key: &K) -> usize {
        usize::from(self.contains(key))
    }

    pub fn equal_range(&self, key: &K) -> (Cursor, Cursor) {
        let lb = self.lower_bound(key);
        if self.holds_key(lb, key) {
            (lb, self.next(lb))
        } else {
            (lb, lb)
        }
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.base.get(self.find(key)).map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let at = self.find(key);
        self.mapped_mut(at)
    }

    /// `(position, true)` if the key was new. An existing key keeps its old value and gives `(end(), false)`.
    pub fn insert(&mut self, key: K, value: V) -> (Cursor, bool) {
        self.base.insert_unique((key, value))
    }

    /// Remove the entry at `at`, returning the position after it.
    pub fn erase(&mut self, at: Cursor) -> Cursor {
        self.base.delete(at)
    }

    /// Remove `key`, handing back its value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let at = self.find(key);
        if at == self.end() {
            return None;
        }
        let ((_, value), _) = self.base.remove(at);
        Some(value)
    }
}

impl<K, V, C: Default, B: Balance> Default for Dict<K, V, C, B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C, B: Balance> fmt::Debug for Dict<K, V, C, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, C: Compare<K>, B: Balance> Index<&K> for Dict<K, V, C, B> {
    type Output = V;

    /// Panics if `key` is missing.
    fn index(&self, key: &K) -> &V {
        self.get(key).expect("no entry for key")
    }
}

impl<K, V, C: Compare<K>, B: Balance> Extend<(K, V)> for Dict<K, V, C, B> {
    /// Keys already present keep their value.
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V, C: Compare<K> + Default, B: Balance> FromIterator<(K, V)> for Dict<K, V, C, B> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut dict = Self::new();
        dict.extend(iter);
        dict
    }
}

impl<K, V, C, B: Balance> IntoIterator for Dict<K, V, C, B> {
    type Item = (K, V);
    type IntoIter = std::vec::IntoIter<(K, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.base.into_iter()
    }
}

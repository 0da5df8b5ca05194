//! The balanced tree engine.
//!
//! One ordered container, [`OrderedTree`], parameterized over how it stays balanced:
//! [`Avl`] keeps every subtree's heights within one of each other, [`RedBlack`] keeps the usual coloring rules.
//! Both give the exact same interface and complexity bounds, they just trade rotations against height differently.
//!
//! Positions are [`Cursor`]s: small `Copy` handles that stay valid until the element they point at is deleted.

use std::fmt;
use std::marker::PhantomData;

use log::{debug, trace};

use crate::compare::{Compare, Natural};
use crate::error::Violation;

mod arena;
mod avl;
mod cursor;
mod rbtree;

use arena::{NodeId, Nodes, NIL, SENTINEL};

pub use avl::Avl;
pub use cursor::{Cursor, Iter};
pub use rbtree::RedBlack;

mod private {
    pub trait Sealed {}
}

/// A balancing strategy: the per-node metadata plus the fix-ups that keep it true.
///
/// Implemented by [`Avl`] and [`RedBlack`] only.
pub trait Balance: private::Sealed {
    type Tag: Copy + PartialEq + fmt::Debug;

    /// Tag of the sentinel node.
    const SENTINEL_TAG: Self::Tag;

    /// Tag of a node that was just hung off a leaf position.
    const LEAF_TAG: Self::Tag;

    /// Restore balance after `node` was attached below `parent` (as its left child if `child_is_left`).
    fn rebalance_after_insert<T>(nodes: &mut Nodes<T, Self::Tag>, parent: NodeId, node: NodeId, child_is_left: bool);

    /// Cut `node` out of the tree and restore balance. The node's slot is left for the caller to release.
    fn unlink<T>(nodes: &mut Nodes<T, Self::Tag>, node: NodeId);

    /// Check the strategy's own invariant over the whole tree.
    fn check<T>(nodes: &Nodes<T, Self::Tag>) -> Result<(), Violation>;
}

/// An ordered container over `T`, sorted by `C` and balanced by `B`.
///
/// Equal elements (by `C`) are either rejected (`insert_unique`) or kept in insertion order (`insert_multi`),
/// so the same tree serves as a set or a multiset.
pub struct OrderedTree<T, C = Natural, B: Balance = Avl> {
    nodes: Nodes<T, B::Tag>,
    // leftmost node, or the sentinel when empty
    start: NodeId,
    len: usize,
    cmp: C,
    _balance: PhantomData<B>,
}

/// An [`OrderedTree`] kept height balanced.
pub type AvlTree<T, C = Natural> = OrderedTree<T, C, Avl>;

/// An [`OrderedTree`] kept red-black balanced.
pub type RbTree<T, C = Natural> = OrderedTree<T, C, RedBlack>;

impl<T, C: Default, B: Balance> OrderedTree<T, C, B> {
    pub fn new() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<T, C, B: Balance> OrderedTree<T, C, B> {
    pub fn with_comparator(cmp: C) -> Self {
        Self {
            nodes: Nodes::new(B::SENTINEL_TAG),
            start: SENTINEL,
            len: 0,
            cmp,
            _balance: PhantomData,
        }
    }

    /// Complexity: O(1)
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn comparator(&self) -> &C {
        &self.cmp
    }

    /// Position of the smallest element, or `end()` when empty.
    ///
    /// Complexity: O(1)
    pub fn begin(&self) -> Cursor {
        self.cursor(self.start)
    }

    /// The past-the-end position.
    pub fn end(&self) -> Cursor {
        self.cursor(SENTINEL)
    }

    /// Starting point of a backwards walk: the same position as `end()`.
    /// Step it with `prev` before reading.
    pub fn reverse_begin(&self) -> Cursor {
        self.end()
    }

    /// Where a backwards walk stops: the same position as `begin()`.
    pub fn reverse_end(&self) -> Cursor {
        self.begin()
    }

    pub fn first(&self) -> Option<&T> {
        self.nodes.try_value(self.start)
    }

    pub fn last(&self) -> Option<&T> {
        let root = self.nodes.root();
        if root == NIL {
            return None;
        }
        Some(self.nodes.value(self.nodes.maximum(root)))
    }

    /// Number of nodes on the longest root-to-leaf path.
    ///
    /// Complexity: O(n)
    pub fn height(&self) -> usize {
        self.nodes.height(self.nodes.root())
    }

    /// Drop every element. Every cursor except `end()` goes stale.
    pub fn clear(&mut self) {
        debug!("clearing {} elements", self.len);
        self.nodes.clear();
        self.start = SENTINEL;
        self.len = 0;
    }

    /// Mutable access that does not re-sort. Only for callers that never touch the ordering key.
    pub(crate) fn get_mut_unordered(&mut self, at: Cursor) -> Option<&mut T> {
        let x = self.resolve(at);
        if x == SENTINEL {
            return None;
        }
        Some(self.nodes.value_mut(x))
    }
}

impl<T, C: Compare<T>, B: Balance> OrderedTree<T, C, B> {
    /// First position whose element does not satisfy `before`.
    ///
    /// `before` must hold for a prefix of the sorted elements and fail for the rest,
    /// e.g. `|e| cmp.less(e, probe)`. This is the descent behind `lower_bound`, open to probes of other types.
    ///
    /// Complexity: O(log(n))
    pub fn lower_bound_by(&self, mut before: impl FnMut(&T) -> bool) -> Cursor {
        let mut x = SENTINEL;
        let mut y = self.nodes.root();
        while y != NIL {
            if !before(self.nodes.value(y)) {
                x = y;
                y = self.nodes[y].left;
            } else {
                y = self.nodes[y].right;
            }
        }
        self.cursor(x)
    }

    /// First position whose element satisfies `after`.
    ///
    /// `after` must fail for a prefix of the sorted elements and hold for the rest, e.g. `|e| cmp.less(probe, e)`.
    ///
    /// Complexity: O(log(n))
    pub fn upper_bound_by(&self, mut after: impl FnMut(&T) -> bool) -> Cursor {
        let mut x = SENTINEL;
        let mut y = self.nodes.root();
        while y != NIL {
            if after(self.nodes.value(y)) {
                x = y;
                y = self.nodes[y].left;
            } else {
                y = self.nodes[y].right;
            }
        }
        self.cursor(x)
    }

    /// First element not less than `value`.
    pub fn lower_bound(&self, value: &T) -> Cursor {
        self.lower_bound_by(|e| self.cmp.less(e, value))
    }

    /// First element greater than `value`.
    pub fn upper_bound(&self, value: &T) -> Cursor {
        self.upper_bound_by(|e| self.cmp.less(value, e))
    }

    /// Whether `at` points at an element equivalent to `value`, given that `at` is `lower_bound(value)`.
    fn matches_lower_bound(&self, at: Cursor, value: &T) -> bool {
        at.node != SENTINEL && !self.cmp.less(value, self.nodes.value(at.node))
    }

    /// The first element equivalent to `value`, or `end()`.
    pub fn find(&self, value: &T) -> Cursor {
        let lb = self.lower_bound(value);
        if self.matches_lower_bound(lb, value) { lb } else { self.end() }
    }

    pub fn contains(&self, value: &T) -> bool {
        let lb = self.lower_bound(value);
        self.matches_lower_bound(lb, value)
    }

    /// 1 if an equivalent element exists, else 0. For trees filled by `insert_unique`.
    pub fn count_unique(&self, value: &T) -> usize {
        usize::from(self.contains(value))
    }

    /// Number of equivalent elements.
    ///
    /// Complexity: O(log(n) + matches)
    pub fn count_multi(&self, value: &T) -> usize {
        let (first, last) = self.equal_range_multi(value);
        self.distance(first, last)
    }

    /// `[lower, upper)` of the (at most one) element equivalent to `value`.
    pub fn equal_range_unique(&self, value: &T) -> (Cursor, Cursor) {
        let lb = self.lower_bound(value);
        if self.matches_lower_bound(lb, value) {
            (lb, self.next(lb))
        } else {
            (lb, lb)
        }
    }

    /// `[lower, upper)` of every element equivalent to `value`.
    pub fn equal_range_multi(&self, value: &T) -> (Cursor, Cursor) {
        (self.lower_bound(value), self.upper_bound(value))
    }

    /// Insert `value` unless an equivalent element is already present.
    ///
    /// On a duplicate nothing changes, `value` is dropped and `(end(), false)` comes back.
    ///
    /// Complexity: O(log(n))
    pub fn insert_unique(&mut self, value: T) -> (Cursor, bool) {
        let lb = self.lower_bound(&value);
        if self.matches_lower_bound(lb, &value) {
            trace!("rejected duplicate insert");
            return (self.end(), false);
        }
        let z = self.attach(value);
        (self.cursor(z), true)
    }

    /// Insert `value`, after any elements equivalent to it.
    ///
    /// Complexity: O(log(n))
    pub fn insert_multi(&mut self, value: T) -> Cursor {
        let z = self.attach(value);
        self.cursor(z)
    }

    fn attach(&mut self, value: T) -> NodeId {
        let mut parent = SENTINEL;
        let mut child_is_left = true;
        let mut y = self.nodes.root();
        while y != NIL {
            parent = y;
            // NOTE: ties go right, which is what keeps duplicates in insertion order
            child_is_left = self.cmp.less(&value, self.nodes.value(y));
            y = if child_is_left { self.nodes[y].left } else { self.nodes[y].right };
        }

        let z = self.nodes.alloc(value, B::LEAF_TAG);
        self.nodes[z].parent = parent;
        if child_is_left {
            self.nodes[parent].left = z;
        } else {
            self.nodes[parent].right = z;
        }

        // a new leftmost node can only be the left child of the old one
        // (or the root, when `start` was the sentinel)
        let below_start = self.nodes[self.start].left;
        if below_start != NIL {
            self.start = below_start;
        }

        B::rebalance_after_insert(&mut self.nodes, parent, z, child_is_left);
        self.len += 1;
        z
    }

    /// Remove the element at `at`, returning the position of the element after it.
    ///
    /// Cursors to every other element stay valid.
    ///
    /// Complexity: O(log(n))
    pub fn delete(&mut self, at: Cursor) -> Cursor {
        self.remove(at).1
    }

    /// Like `delete`, but hands the removed element back.
    pub fn remove(&mut self, at: Cursor) -> (T, Cursor) {
        let z = self.resolve(at);
        assert!(z != SENTINEL, "cannot delete the end position");

        // the successor node survives the unlink (it may move, but it isn't reallocated)
        let next = self.nodes.successor(z);
        if self.start == z {
            self.start = next;
        }

        B::unlink(&mut self.nodes, z);
        self.len -= 1;
        let value = self.nodes.release(z);
        (value, self.cursor(next))
    }

    /// Overwrite the element at `at` in place, returning the old one.
    ///
    /// Nothing is re-sorted, so `value` has to be equivalent to the element it replaces.
    /// Panics otherwise, and at `end()`.
    pub fn write(&mut self, at: Cursor, value: T) -> T {
        let x = self.resolve(at);
        assert!(x != SENTINEL, "cannot write through the end position");
        assert!(
            self.cmp.equivalent(self.nodes.value(x), &value),
            "written value would change the element's position"
        );
        std::mem::replace(self.nodes.value_mut(x), value)
    }

    /// Check every structural invariant: links, order, size, the leftmost cache and the balancing rules.
    ///
    /// Complexity: O(n)
    pub fn validate(&self) -> Result<(), Violation> {
        let result = self.check_structure().and_then(|()| B::check(&self.nodes));
        if let Err(violation) = &result {
            debug!("tree failed validation: {violation}");
        }
        result
    }

    fn check_structure(&self) -> Result<(), Violation> {
        let sentinel = &self.nodes[SENTINEL];
        if sentinel.parent != NIL || sentinel.right != NIL {
            return Err(Violation::Sentinel);
        }

        let root = sentinel.left;
        if root != NIL && self.nodes[root].parent != SENTINEL {
            return Err(Violation::BrokenLink { node: root.index() });
        }

        let reachable = self.count_linked(root)?;
        if reachable != self.len {
            return Err(Violation::SizeMismatch { recorded: self.len, reachable });
        }

        let leftmost = if root == NIL { SENTINEL } else { self.nodes.minimum(root) };
        if leftmost != self.start {
            return Err(Violation::StaleStart);
        }

        let mut prev: Option<&T> = None;
        for (index, value) in self.iter().enumerate() {
            if prev.is_some_and(|prev| self.cmp.less(value, prev)) {
                return Err(Violation::OutOfOrder { index });
            }
            prev = Some(value);
        }
        Ok(())
    }

    fn count_linked(&self, x: NodeId) -> Result<usize, Violation> {
        if x == NIL {
            return Ok(0);
        }
        let mut count = 1;
        for child in [self.nodes[x].left, self.nodes[x].right] {
            if child != NIL && self.nodes[child].parent != x {
                return Err(Violation::BrokenLink { node: child.index() });
            }
            count += self.count_linked(child)?;
        }
        Ok(count)
    }
}

impl<T, C: Default, B: Balance> Default for OrderedTree<T, C, B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, C: Clone, B: Balance> Clone for OrderedTree<T, C, B> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes.clone(),
            start: self.start,
            len: self.len,
            cmp: self.cmp.clone(),
            _balance: PhantomData,
        }
    }
}

impl<T: fmt::Debug, C, B: Balance> fmt::Debug for OrderedTree<T, C, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, C, B: Balance> IntoIterator for OrderedTree<T, C, B> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    /// Sorted order.
    fn into_iter(mut self) -> Self::IntoIter {
        self.nodes.drain_in_order(self.start, self.len).into_iter()
    }
}

impl<'a, T, C, B: Balance> IntoIterator for &'a OrderedTree<T, C, B> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, B>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The shared contract, run once per balancing strategy.
    macro_rules! contract_tests {
        ($name:ident, $balance:ty) => {
            mod $name {
                use super::*;

                type Tree<T> = OrderedTree<T, Natural, $balance>;

                fn collect<T: Clone, C, B: Balance>(tree: &OrderedTree<T, C, B>) -> Vec<T> {
                    let mut out = Vec::new();
                    let mut at = tree.begin();
                    while at != tree.end() {
                        out.push(tree[at].clone());
                        at = tree.next(at);
                    }
                    out
                }

                #[test]
                fn new_tree_is_empty() {
                    let tree: Tree<i32> = Tree::new();
                    assert!(tree.is_empty());
                    assert_eq!(tree.len(), 0);
                    assert_eq!(tree.begin(), tree.end());
                    assert_eq!(tree.reverse_begin(), tree.reverse_end());
                    assert_eq!(tree.first(), None);
                    assert_eq!(tree.last(), None);
                    assert_eq!(tree.height(), 0);
                    tree.validate().unwrap();
                }

                #[test]
                fn bounds_on_empty_tree_are_end() {
                    let tree: Tree<i32> = Tree::new();
                    assert_eq!(tree.lower_bound(&3), tree.end());
                    assert_eq!(tree.upper_bound(&3), tree.end());
                    assert_eq!(tree.find(&3), tree.end());
                    assert!(!tree.contains(&3));
                }

                #[test]
                fn duplicate_unique_insert_is_rejected() {
                    let mut tree = Tree::new();
                    let (at, inserted) = tree.insert_unique(5);
                    assert!(inserted);
                    assert_eq!(tree[at], 5);

                    let (again, inserted) = tree.insert_unique(5);
                    assert!(!inserted);
                    assert_eq!(again, tree.end());
                    assert_eq!(tree.len(), 1);
                    tree.validate().unwrap();
                }

                #[test]
                fn find_returns_the_inserted_position() {
                    let mut tree = Tree::new();
                    for value in [40, 10, 70, 20, 60] {
                        let (at, inserted) = tree.insert_unique(value);
                        assert!(inserted);
                        assert_eq!(tree.find(&value), at);
                    }
                }

                #[test]
                fn multi_insert_counts_and_ranges() {
                    let mut tree = Tree::new();
                    for value in [3, 1, 2, 2, 2] {
                        tree.insert_multi(value);
                    }
                    tree.validate().unwrap();
                    assert_eq!(tree.count_multi(&2), 3);
                    assert_eq!(tree.count_multi(&4), 0);

                    let (first, last) = tree.equal_range_multi(&2);
                    let span: Vec<_> = tree.iter_between(first, last).copied().collect();
                    assert_eq!(span, vec![2, 2, 2]);
                    assert_eq!(tree.distance(first, last), 3);
                    assert_eq!(collect(&tree), vec![1, 2, 2, 2, 3]);
                }

                #[test]
                fn duplicates_keep_insertion_order() {
                    let mut tree = OrderedTree::<(i32, usize), _, $balance>::with_comparator(
                        |a: &(i32, usize), b: &(i32, usize)| a.0 < b.0,
                    );
                    for (seq, key) in [5, 1, 5, 3, 5, 1, 5].into_iter().enumerate() {
                        tree.insert_multi((key, seq));
                        tree.validate().unwrap();
                    }
                    let fives: Vec<usize> = tree
                        .iter()
                        .filter(|(key, _)| *key == 5)
                        .map(|&(_, seq)| seq)
                        .collect();
                    assert_eq!(fives, vec![0, 2, 4, 6]);
                    assert_eq!(tree.find(&(5, 99)), tree.lower_bound(&(5, 0)));
                    assert_eq!(tree[tree.find(&(5, 99))], (5, 0));
                }

                #[test]
                fn unique_ranges_and_counts() {
                    let mut tree = Tree::new();
                    for value in [10, 20, 30] {
                        tree.insert_unique(value);
                    }
                    assert_eq!(tree.count_unique(&20), 1);
                    assert_eq!(tree.count_unique(&25), 0);

                    let (first, last) = tree.equal_range_unique(&20);
                    assert_eq!(tree[first], 20);
                    assert_eq!(tree[last], 30);

                    let (first, last) = tree.equal_range_unique(&25);
                    assert_eq!(first, last);
                    assert_eq!(tree[first], 30);
                }

                #[test]
                fn bounds_pick_the_right_neighbours() {
                    let mut tree = Tree::new();
                    for value in [10, 20, 20, 30] {
                        tree.insert_multi(value);
                    }
                    assert_eq!(tree[tree.lower_bound(&20)], 20);
                    assert_eq!(tree[tree.upper_bound(&20)], 30);
                    assert_eq!(tree[tree.lower_bound(&15)], 20);
                    assert_eq!(tree[tree.upper_bound(&5)], 10);
                    assert_eq!(tree.lower_bound(&31), tree.end());
                    assert_eq!(tree.upper_bound(&30), tree.end());
                }

                #[test]
                fn insert_then_delete_leaves_nothing() {
                    let mut tree = Tree::new();
                    let (at, _) = tree.insert_unique(42);
                    tree.delete(at);
                    assert!(!tree.contains(&42));
                    assert_eq!(tree.len(), 0);
                    assert_eq!(tree.begin(), tree.end());
                    tree.validate().unwrap();
                }

                #[test]
                fn deleting_the_only_element_returns_end() {
                    let mut tree = Tree::new();
                    tree.insert_unique(1);
                    let next = tree.delete(tree.begin());
                    assert_eq!(next, tree.end());
                }

                #[test]
                fn delete_returns_successor_for_erase_while_walking() {
                    let mut tree = Tree::new();
                    for value in 0..50 {
                        tree.insert_unique(value);
                    }
                    let mut at = tree.begin();
                    while at != tree.end() {
                        if tree[at] % 3 == 0 {
                            at = tree.delete(at);
                            tree.validate().unwrap();
                        } else {
                            at = tree.next(at);
                        }
                    }
                    assert!(tree.iter().all(|v| v % 3 != 0));
                    assert_eq!(tree.len(), 33);
                }

                #[test]
                fn remove_hands_the_element_back() {
                    let mut tree = Tree::new();
                    tree.insert_unique(String::from("b"));
                    tree.insert_unique(String::from("a"));
                    let (value, next) = tree.remove(tree.begin());
                    assert_eq!(value, "a");
                    assert_eq!(tree[next], "b");
                }

                #[test]
                fn leftmost_cache_follows_mutations() {
                    let mut tree = Tree::new();
                    for value in [50, 40, 60, 30, 45] {
                        tree.insert_unique(value);
                        assert_eq!(tree.first(), tree.iter().min());
                    }
                    tree.delete(tree.find(&30));
                    assert_eq!(tree.first(), Some(&40));
                    tree.delete(tree.find(&40));
                    assert_eq!(tree.first(), Some(&45));
                    assert_eq!(tree.last(), Some(&60));
                    tree.validate().unwrap();
                }

                #[test]
                fn all_in_all_out_in_any_order() {
                    let keys: Vec<i32> = (0..200).map(|i| (i * 73) % 200).collect();
                    let mut tree = Tree::new();
                    for &key in &keys {
                        assert!(tree.insert_unique(key).1);
                    }
                    tree.validate().unwrap();
                    for &key in keys.iter().rev() {
                        let at = tree.find(&key);
                        tree.delete(at);
                        tree.validate().unwrap();
                    }
                    assert!(tree.is_empty());
                    assert_eq!(tree.len(), 0);
                }

                #[test]
                fn cursors_survive_other_deletes() {
                    let mut tree = Tree::new();
                    let mut kept = Vec::new();
                    for value in 0..64 {
                        let (at, _) = tree.insert_unique(value);
                        if value % 8 == 0 {
                            kept.push((value, at));
                        }
                    }
                    for value in 0..64 {
                        if value % 8 != 0 {
                            tree.delete(tree.find(&value));
                        }
                    }
                    for (value, at) in kept {
                        assert_eq!(tree[at], value);
                    }
                }

                #[test]
                fn clear_drops_everything() {
                    let mut tree = Tree::new();
                    for value in 0..10 {
                        tree.insert_unique(value);
                    }
                    let end = tree.end();
                    tree.clear();
                    assert!(tree.is_empty());
                    assert_eq!(tree.begin(), tree.end());
                    assert_eq!(tree.end(), end);
                    tree.validate().unwrap();

                    tree.insert_unique(3);
                    assert_eq!(collect(&tree), vec![3]);
                }

                #[test]
                fn custom_comparator_orders_descending() {
                    let mut tree = OrderedTree::<i32, _, $balance>::with_comparator(|a: &i32, b: &i32| a > b);
                    for value in [3, 9, 1, 7] {
                        tree.insert_unique(value);
                    }
                    assert_eq!(collect(&tree), vec![9, 7, 3, 1]);
                    assert_eq!(tree[tree.lower_bound(&8)], 7);
                    tree.validate().unwrap();
                }

                #[test]
                fn write_replaces_an_equivalent_element() {
                    let mut tree = OrderedTree::<(i32, &str), _, $balance>::with_comparator(
                        |a: &(i32, &str), b: &(i32, &str)| a.0 < b.0,
                    );
                    let (at, _) = tree.insert_unique((1, "one"));
                    tree.insert_unique((2, "two"));
                    let old = tree.write(at, (1, "uno"));
                    assert_eq!(old, (1, "one"));
                    assert_eq!(tree[at], (1, "uno"));
                }

                #[test]
                #[should_panic(expected = "change the element's position")]
                fn write_rejects_a_reordering_value() {
                    let mut tree = Tree::new();
                    let (at, _) = tree.insert_unique(1);
                    tree.insert_unique(2);
                    tree.write(at, 5);
                }

                #[test]
                #[should_panic(expected = "end position")]
                fn deleting_end_traps() {
                    let mut tree: Tree<i32> = Tree::new();
                    tree.insert_unique(1);
                    tree.delete(tree.end());
                }

                #[test]
                fn clone_is_independent() {
                    let mut tree = Tree::new();
                    for value in [5, 3, 8] {
                        tree.insert_unique(value);
                    }
                    let copy = tree.clone();
                    tree.delete(tree.find(&3));
                    assert_eq!(collect(&copy), vec![3, 5, 8]);
                    assert_eq!(collect(&tree), vec![5, 8]);
                    copy.validate().unwrap();
                }

                #[test]
                fn consuming_iteration_is_sorted() {
                    let mut tree = Tree::new();
                    for value in [String::from("pear"), String::from("apple"), String::from("fig")] {
                        tree.insert_unique(value);
                    }
                    let values: Vec<String> = tree.into_iter().collect();
                    assert_eq!(values, vec!["apple", "fig", "pear"]);
                }

                #[test]
                fn consuming_a_deep_tree_after_deletes() {
                    let mut tree = Tree::new();
                    for value in (0..128).map(|i| (i * 37) % 128) {
                        tree.insert_unique(value);
                    }
                    for value in (0..128).filter(|v| v % 5 == 0) {
                        tree.delete(tree.find(&value));
                    }
                    let expected: Vec<i32> = (0..128).filter(|v| v % 5 != 0).collect();
                    assert_eq!(tree.into_iter().collect::<Vec<_>>(), expected);
                }

                #[test]
                fn debug_lists_elements_in_order() {
                    let mut tree = Tree::new();
                    for value in [2, 1, 3] {
                        tree.insert_unique(value);
                    }
                    assert_eq!(format!("{tree:?}"), "{1, 2, 3}");
                }
            }
        };
    }

    contract_tests!(avl_contract, Avl);
    contract_tests!(red_black_contract, RedBlack);
}

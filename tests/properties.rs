use std::collections::{BTreeMap, HashSet};

use proptest::prelude::*;

use ordtree::{Avl, Balance, Dict, MultiSet, OrderedTree, RedBlack};

const N_VALUES: usize = 200;

#[derive(Debug, Clone)]
enum Op {
    InsertUnique(u8),
    InsertMulti(u8),
    Remove(u8),
    EraseLowerBound(u8),
    Clear,
}

fn arbitrary_op() -> impl Strategy<Value = Op> {
    // a small key domain keeps hitting the same keys
    prop_oneof![
        4 => any::<u8>().prop_map(Op::InsertUnique),
        4 => any::<u8>().prop_map(Op::InsertMulti),
        3 => any::<u8>().prop_map(Op::Remove),
        2 => any::<u8>().prop_map(Op::EraseLowerBound),
        1 => Just(Op::Clear),
    ]
}

/// Walk `begin()..end()` with `next`, checking the order and that the walk covers `len()` elements.
fn assert_sorted_walk<B: Balance>(tree: &OrderedTree<u8, ordtree::Natural, B>) {
    let mut at = tree.begin();
    let mut seen = 0;
    let mut prev = None;
    while at != tree.end() {
        let value = tree[at];
        assert!(prev.is_none_or(|prev| prev <= value));
        prev = Some(value);
        seen += 1;
        at = tree.next(at);
    }
    assert_eq!(seen, tree.len());
    tree.validate().unwrap();
}

fn run_ops<B: Balance>(ops: Vec<Op>) {
    let mut tree = OrderedTree::<u8, ordtree::Natural, B>::new();
    let mut model: Vec<u8> = Vec::new();

    for op in ops {
        match op {
            Op::InsertUnique(v) => {
                let present = model.binary_search(&v).is_ok();
                let (at, inserted) = tree.insert_unique(v);
                assert_eq!(inserted, !present);
                if inserted {
                    // the cursor from insert is the one find gives back
                    assert_eq!(tree.find(&v), at);
                    let pos = model.partition_point(|&e| e <= v);
                    model.insert(pos, v);
                } else {
                    assert_eq!(at, tree.end());
                }
            }
            Op::InsertMulti(v) => {
                let at = tree.insert_multi(v);
                assert_eq!(tree[at], v);
                let pos = model.partition_point(|&e| e <= v);
                model.insert(pos, v);
            }
            Op::Remove(v) => {
                let at = tree.find(&v);
                match model.binary_search(&v) {
                    Ok(pos) => {
                        model.remove(pos);
                        tree.delete(at);
                    }
                    Err(_) => assert_eq!(at, tree.end()),
                }
            }
            Op::EraseLowerBound(v) => {
                let at = tree.lower_bound(&v);
                let pos = model.partition_point(|&e| e < v);
                if at == tree.end() {
                    assert_eq!(pos, model.len());
                } else {
                    let next = tree.delete(at);
                    model.remove(pos);
                    assert_eq!(tree.get(next), model.get(pos));
                }
            }
            Op::Clear => {
                tree.clear();
                model.clear();
            }
        }

        assert_sorted_walk(&tree);
        assert!(tree.iter().eq(model.iter()));
    }
}

fn round_trip<B: Balance>(values: HashSet<u16>) {
    let mut tree = OrderedTree::<u16, ordtree::Natural, B>::new();
    for &v in &values {
        assert!(tree.insert_unique(v).1);
    }
    assert_eq!(tree.len(), values.len());
    tree.validate().unwrap();

    // HashSet iteration order is as good as a shuffle
    for v in &values {
        let at = tree.find(v);
        assert_ne!(at, tree.end());
        tree.delete(at);
        assert!(!tree.contains(v));
        tree.validate().unwrap();
    }
    assert!(tree.is_empty());
    assert_eq!(tree.len(), 0);
    assert_eq!(tree.begin(), tree.end());
}

fn dict_matches_btreemap<B: Balance>(entries: Vec<(u8, u32)>, removals: Vec<u8>) {
    let mut dict = Dict::<u8, u32, ordtree::Natural, B>::new();
    let mut model = BTreeMap::new();

    for (k, v) in entries {
        let inserted = dict.insert(k, v).1;
        assert_eq!(inserted, !model.contains_key(&k));
        model.entry(k).or_insert(v);
    }
    for k in removals {
        assert_eq!(dict.remove(&k), model.remove(&k));
    }
    assert!(dict.iter().eq(model.iter()));
}

fn multiset_counts<B: Balance>(values: Vec<u8>) {
    let set: MultiSet<u8, ordtree::Natural, B> = values.iter().copied().collect();
    for v in &values {
        let expected = values.iter().filter(|&e| e == v).count();
        assert_eq!(set.count(v), expected);
        let (first, last) = set.equal_range(v);
        assert_eq!(set.iter_between(first, last).count(), expected);
    }
    assert_eq!(set.len(), values.len());
}

proptest! {
    #[test]
    fn prop_avl_interleavings(ops in prop::collection::vec(arbitrary_op(), 1..200)) {
        run_ops::<Avl>(ops);
    }

    #[test]
    fn prop_red_black_interleavings(ops in prop::collection::vec(arbitrary_op(), 1..200)) {
        run_ops::<RedBlack>(ops);
    }

    /// Insert a set of unique keys, then delete them all in whatever order the set yields.
    #[test]
    fn prop_round_trip(values in prop::collection::hash_set(any::<u16>(), 0..N_VALUES)) {
        round_trip::<Avl>(values.clone());
        round_trip::<RedBlack>(values);
    }

    #[test]
    fn prop_dict_vs_btreemap(
        entries in prop::collection::vec((any::<u8>(), any::<u32>()), 0..N_VALUES),
        removals in prop::collection::vec(any::<u8>(), 0..N_VALUES),
    ) {
        dict_matches_btreemap::<Avl>(entries.clone(), removals.clone());
        dict_matches_btreemap::<RedBlack>(entries, removals);
    }

    #[test]
    fn prop_multiset_counts(values in prop::collection::vec(0u8..16, 0..N_VALUES)) {
        multiset_counts::<Avl>(values.clone());
        multiset_counts::<RedBlack>(values);
    }
}

#![forbid(unsafe_code)]

//! Ordered containers on a balanced binary search tree.
//!
//! [`OrderedTree`] is the engine, balanced either as an AVL tree or a red-black tree.
//! [`Set`], [`MultiSet`] and [`Dict`] are thin views over it.

// ordering
pub mod compare;

// the tree itself
pub mod tree;

// set / multiset / map views
pub mod associative;

mod error;

pub use associative::{Dict, MultiSet, Set};
pub use compare::{ByKey, Compare, Natural};
pub use error::Violation;
pub use tree::{Avl, AvlTree, Balance, Cursor, Iter, OrderedTree, RbTree, RedBlack};

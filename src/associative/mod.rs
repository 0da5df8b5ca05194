//! Set, multiset and dictionary views over [`OrderedTree`](crate::tree::OrderedTree).
//!
//! Each one wraps a single tree and forwards to it, only deciding which flavor of insert,
//! count and range to use (and, for [`Dict`], that lookups go by key alone).
//! All of them default to the AVL strategy; pass `RedBlack` as the last type parameter for the other one.

mod dict;
mod multiset;
mod set;

pub use dict::Dict;
pub use multiset::MultiSet;
pub use set::Set;

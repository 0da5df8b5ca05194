use thiserror::Error;

/// A broken structural invariant, as reported by `OrderedTree::validate`.
///
/// Node numbers are arena slot indices. They only mean something for the tree that produced the report.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Violation {
    #[error("sentinel links are corrupted")]
    Sentinel,

    #[error("node {node} does not point back at its parent")]
    BrokenLink { node: usize },

    #[error("in-order traversal goes backwards at position {index}")]
    OutOfOrder { index: usize },

    #[error("tree records {recorded} elements but {reachable} are reachable")]
    SizeMismatch { recorded: usize, reachable: usize },

    #[error("cached leftmost node is not the leftmost node")]
    StaleStart,

    #[error("node {node} is unbalanced: left height {left}, right height {right}")]
    HeightImbalance { node: usize, left: usize, right: usize },

    #[error("node {node} records bias {recorded} but its subtrees differ by {actual}")]
    BiasTag { node: usize, recorded: i8, actual: isize },

    #[error("root is red")]
    RedRoot,

    #[error("red node {node} has a red child")]
    RedRed { node: usize },

    #[error("black height under node {node} differs: {left} on the left, {right} on the right")]
    BlackHeight { node: usize, left: usize, right: usize },
}

use super::arena::{NodeId, Nodes, NIL, SENTINEL};
use super::{private, Balance};
use crate::error::Violation;

// PROVE: an AVL tree of height `h` has at least `F(h+2) - 1` nodes (Fibonacci, by induction on `h`)
// LEMMA: an AVL tree with `n` nodes has height below `1.44*log₂(n+2)`

/// Height-balanced strategy: the two subtrees of every node differ in height by at most one.
///
/// Shallower than red-black for the same contents, at the price of more rotations on delete.
#[derive(Clone, Copy, Debug, Default)]
pub struct Avl;

/// Which subtree of a node is taller.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Bias {
    Left,
    Even,
    Right,
}

impl Bias {
    /// height(right) - height(left)
    fn as_i8(self) -> i8 {
        match self {
            Bias::Left => -1,
            Bias::Even => 0,
            Bias::Right => 1,
        }
    }
}

impl private::Sealed for Avl {}

impl Balance for Avl {
    type Tag = Bias;

    const SENTINEL_TAG: Bias = Bias::Even;
    const LEAF_TAG: Bias = Bias::Even;

    fn rebalance_after_insert<T>(nodes: &mut Nodes<T, Bias>, parent: NodeId, _node: NodeId, mut child_is_left: bool) {
        // `x`'s subtree on the `child_is_left` side just grew by one
        let mut x = parent;
        while x != SENTINEL {
            if child_is_left {
                match nodes[x].tag {
                    Bias::Right => {
                        nodes[x].tag = Bias::Even;
                        return;
                    }
                    Bias::Left => {
                        if nodes[nodes[x].left].tag == Bias::Right {
                            rotate_left_right(nodes, x);
                        } else {
                            rotate_right(nodes, x);
                        }
                        return;
                    }
                    Bias::Even => nodes[x].tag = Bias::Left,
                }
            } else {
                match nodes[x].tag {
                    Bias::Left => {
                        nodes[x].tag = Bias::Even;
                        return;
                    }
                    Bias::Right => {
                        if nodes[nodes[x].right].tag == Bias::Left {
                            rotate_right_left(nodes, x);
                        } else {
                            rotate_left(nodes, x);
                        }
                        return;
                    }
                    Bias::Even => nodes[x].tag = Bias::Right,
                }
            }
            child_is_left = nodes.is_left_child(x);
            x = nodes[x].parent;
        }
    }

    fn unlink<T>(nodes: &mut Nodes<T, Bias>, z: NodeId) {
        // `x` is the lowest node whose subtree lost height, on its `child_is_left` side
        let mut x = nodes[z].parent;
        let mut child_is_left = nodes.is_left_child(z);
        let (left, right) = (nodes[z].left, nodes[z].right);

        if left == NIL {
            nodes.transplant(z, right);
        } else if right == NIL {
            nodes.transplant(z, left);
        } else if nodes[z].tag == Bias::Right {
            // take the replacement from the taller side
            let y = nodes.minimum(right);
            x = y;
            child_is_left = nodes.is_left_child(y);
            if nodes[y].parent != z {
                x = nodes[y].parent;
                let y_right = nodes[y].right;
                nodes.transplant(y, y_right);
                nodes[y].right = right;
                nodes[right].parent = y;
            }
            nodes.transplant(z, y);
            nodes[y].left = left;
            nodes[left].parent = y;
            nodes[y].tag = nodes[z].tag;
        } else {
            let y = nodes.maximum(left);
            x = y;
            child_is_left = nodes.is_left_child(y);
            if nodes[y].parent != z {
                x = nodes[y].parent;
                let y_left = nodes[y].left;
                nodes.transplant(y, y_left);
                nodes[y].left = left;
                nodes[left].parent = y;
            }
            nodes.transplant(z, y);
            nodes[y].right = right;
            nodes[right].parent = y;
            nodes[y].tag = nodes[z].tag;
        }

        rebalance_after_delete(nodes, x, child_is_left);
    }

    fn check<T>(nodes: &Nodes<T, Bias>) -> Result<(), Violation> {
        checked_height(nodes, nodes.root()).map(|_| ())
    }
}

fn rebalance_after_delete<T>(nodes: &mut Nodes<T, Bias>, mut x: NodeId, mut child_is_left: bool) {
    // NOTE: unlike insertion, a rotation here can shrink the subtree again, so the walk may go all the way up
    while x != SENTINEL {
        if child_is_left {
            match nodes[x].tag {
                Bias::Even => {
                    nodes[x].tag = Bias::Right;
                    return;
                }
                Bias::Right => {
                    let sibling = nodes[nodes[x].right].tag;
                    if sibling == Bias::Left {
                        rotate_right_left(nodes, x);
                    } else {
                        rotate_left(nodes, x);
                    }
                    if sibling == Bias::Even {
                        return;
                    }
                    x = nodes[x].parent;
                }
                Bias::Left => nodes[x].tag = Bias::Even,
            }
        } else {
            match nodes[x].tag {
                Bias::Even => {
                    nodes[x].tag = Bias::Left;
                    return;
                }
                Bias::Left => {
                    let sibling = nodes[nodes[x].left].tag;
                    if sibling == Bias::Right {
                        rotate_left_right(nodes, x);
                    } else {
                        rotate_right(nodes, x);
                    }
                    if sibling == Bias::Even {
                        return;
                    }
                    x = nodes[x].parent;
                }
                Bias::Right => nodes[x].tag = Bias::Even,
            }
        }
        child_is_left = nodes.is_left_child(x);
        x = nodes[x].parent;
    }
}

fn rotate_left<T>(nodes: &mut Nodes<T, Bias>, x: NodeId) {
    let z = nodes[x].right;
    let z_was_even = nodes[z].tag == Bias::Even;
    nodes.rotate_left(x);
    if z_was_even {
        // only happens on delete: the subtree keeps its height
        nodes[x].tag = Bias::Right;
        nodes[z].tag = Bias::Left;
    } else {
        nodes[x].tag = Bias::Even;
        nodes[z].tag = Bias::Even;
    }
}

fn rotate_right<T>(nodes: &mut Nodes<T, Bias>, x: NodeId) {
    let z = nodes[x].left;
    let z_was_even = nodes[z].tag == Bias::Even;
    nodes.rotate_right(x);
    if z_was_even {
        nodes[x].tag = Bias::Left;
        nodes[z].tag = Bias::Right;
    } else {
        nodes[x].tag = Bias::Even;
        nodes[z].tag = Bias::Even;
    }
}

/// `x` is right heavy and its right child `z` is left heavy: lift `z.left` above both.
fn rotate_right_left<T>(nodes: &mut Nodes<T, Bias>, x: NodeId) {
    let z = nodes[x].right;
    let y = nodes[z].left;
    let y_bias = nodes[y].tag;
    nodes.rotate_right(z);
    nodes.rotate_left(x);
    let (x_bias, z_bias) = match y_bias {
        Bias::Right => (Bias::Left, Bias::Even),
        Bias::Left => (Bias::Even, Bias::Right),
        Bias::Even => (Bias::Even, Bias::Even),
    };
    nodes[x].tag = x_bias;
    nodes[y].tag = Bias::Even;
    nodes[z].tag = z_bias;
}

/// `x` is left heavy and its left child `z` is right heavy: lift `z.right` above both.
fn rotate_left_right<T>(nodes: &mut Nodes<T, Bias>, x: NodeId) {
    let z = nodes[x].left;
    let y = nodes[z].right;
    let y_bias = nodes[y].tag;
    nodes.rotate_left(z);
    nodes.rotate_right(x);
    let (x_bias, z_bias) = match y_bias {
        Bias::Left => (Bias::Right, Bias::Even),
        Bias::Right => (Bias::Even, Bias::Left),
        Bias::Even => (Bias::Even, Bias::Even),
    };
    nodes[x].tag = x_bias;
    nodes[y].tag = Bias::Even;
    nodes[z].tag = z_bias;
}

fn checked_height<T>(nodes: &Nodes<T, Bias>, x: NodeId) -> Result<usize, Violation> {
    if x == NIL {
        return Ok(0);
    }
    let left = checked_height(nodes, nodes[x].left)?;
    let right = checked_height(nodes, nodes[x].right)?;
    if left.abs_diff(right) > 1 {
        return Err(Violation::HeightImbalance { node: x.index(), left, right });
    }
    let actual = right as isize - left as isize;
    let recorded = nodes[x].tag.as_i8();
    if recorded as isize != actual {
        return Err(Violation::BiasTag { node: x.index(), recorded, actual });
    }
    Ok(1 + left.max(right))
}

use super::arena::{NodeId, Nodes, NIL, SENTINEL};
use super::{private, Balance};
use crate::error::Violation;

// PROVE: any node with height `h` has black height at least `h/2`
// PROVE: the subtree located at any node `x` contains at least `2^bh(x) - 1` nodes (use induction)
// LEMMA: An RBTree with `n` internal nodes has height at most `2*log₂(n+1)`

/// Red-black strategy.
///
/// At most two rotations per insert and three per delete; the tree can get up to twice as deep as an AVL tree.
#[derive(Clone, Copy, Debug, Default)]
pub struct RedBlack;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Color {
    Red,
    Black,
}

// NOTE: `NIL` links count as black leaves
fn is_red<T>(nodes: &Nodes<T, Color>, x: NodeId) -> bool {
    x != NIL && nodes[x].tag == Color::Red
}

fn is_black<T>(nodes: &Nodes<T, Color>, x: NodeId) -> bool {
    !is_red(nodes, x)
}

impl private::Sealed for RedBlack {}

impl Balance for RedBlack {
    type Tag = Color;

    const SENTINEL_TAG: Color = Color::Black;
    const LEAF_TAG: Color = Color::Red;

    fn rebalance_after_insert<T>(nodes: &mut Nodes<T, Color>, parent: NodeId, node: NodeId, _child_is_left: bool) {
        // `z` is red, and so might be its parent `x`
        let (mut x, mut z) = (parent, node);
        while x != SENTINEL && nodes[x].tag == Color::Red {
            // a red node is never the root, so the grandparent is a real node
            let grandparent = nodes[x].parent;
            if x == nodes[grandparent].left {
                let uncle = nodes[grandparent].right;
                if is_red(nodes, uncle) {
                    nodes[x].tag = Color::Black;
                    nodes[uncle].tag = Color::Black;
                    nodes[grandparent].tag = Color::Red;
                    z = grandparent;
                } else {
                    if z == nodes[x].right {
                        z = x;
                        nodes.rotate_left(z);
                    }
                    let p = nodes[z].parent;
                    let g = nodes[p].parent;
                    nodes[p].tag = Color::Black;
                    nodes[g].tag = Color::Red;
                    nodes.rotate_right(g);
                }
            } else {
                let uncle = nodes[grandparent].left;
                if is_red(nodes, uncle) {
                    nodes[x].tag = Color::Black;
                    nodes[uncle].tag = Color::Black;
                    nodes[grandparent].tag = Color::Red;
                    z = grandparent;
                } else {
                    if z == nodes[x].left {
                        z = x;
                        nodes.rotate_right(z);
                    }
                    let p = nodes[z].parent;
                    let g = nodes[p].parent;
                    nodes[p].tag = Color::Black;
                    nodes[g].tag = Color::Red;
                    nodes.rotate_left(g);
                }
            }
            x = nodes[z].parent;
        }

        let root = nodes.root();
        nodes[root].tag = Color::Black;
    }

    fn unlink<T>(nodes: &mut Nodes<T, Color>, z: NodeId) {
        // `n` (maybe `NIL`) takes the place of whatever was physically removed, under `x`
        let mut x = nodes[z].parent;
        let mut removed = nodes[z].tag;
        let n;
        let (left, right) = (nodes[z].left, nodes[z].right);

        if left == NIL {
            n = right;
            nodes.transplant(z, n);
        } else if right == NIL {
            n = left;
            nodes.transplant(z, n);
        } else {
            let y = nodes.minimum(right);
            x = y;
            removed = nodes[y].tag;
            n = nodes[y].right;
            if nodes[y].parent != z {
                x = nodes[y].parent;
                nodes.transplant(y, n);
                nodes[y].right = right;
                nodes[right].parent = y;
            }
            nodes.transplant(z, y);
            nodes[y].left = left;
            nodes[left].parent = y;
            nodes[y].tag = nodes[z].tag;
        }

        if removed == Color::Black {
            rebalance_after_delete(nodes, x, n);
        }
    }

    fn check<T>(nodes: &Nodes<T, Color>) -> Result<(), Violation> {
        if nodes[SENTINEL].tag != Color::Black {
            return Err(Violation::Sentinel);
        }
        if is_red(nodes, nodes.root()) {
            return Err(Violation::RedRoot);
        }
        black_height(nodes, nodes.root()).map(|_| ())
    }
}

/// `n` under `x` is one black short compared to its sibling.
fn rebalance_after_delete<T>(nodes: &mut Nodes<T, Color>, mut x: NodeId, mut n: NodeId) {
    while x != SENTINEL && is_black(nodes, n) {
        // NOTE: `n` may be `NIL`, but then the sibling can't be, so comparing against `x.left` still tells the sides apart
        if n == nodes[x].left {
            let mut w = nodes[x].right;
            if is_red(nodes, w) {
                nodes[w].tag = Color::Black;
                nodes[x].tag = Color::Red;
                nodes.rotate_left(x);
                w = nodes[x].right;
            }
            if is_black(nodes, nodes[w].left) && is_black(nodes, nodes[w].right) {
                nodes[w].tag = Color::Red;
                n = x;
            } else {
                if is_black(nodes, nodes[w].right) {
                    let inner = nodes[w].left;
                    nodes[inner].tag = Color::Black;
                    nodes[w].tag = Color::Red;
                    nodes.rotate_right(w);
                    w = nodes[x].right;
                }
                nodes[w].tag = nodes[x].tag;
                nodes[x].tag = Color::Black;
                let outer = nodes[w].right;
                nodes[outer].tag = Color::Black;
                nodes.rotate_left(x);
                n = nodes.root();
            }
        } else {
            let mut w = nodes[x].left;
            if is_red(nodes, w) {
                nodes[w].tag = Color::Black;
                nodes[x].tag = Color::Red;
                nodes.rotate_right(x);
                w = nodes[x].left;
            }
            if is_black(nodes, nodes[w].right) && is_black(nodes, nodes[w].left) {
                nodes[w].tag = Color::Red;
                n = x;
            } else {
                if is_black(nodes, nodes[w].left) {
                    let inner = nodes[w].right;
                    nodes[inner].tag = Color::Black;
                    nodes[w].tag = Color::Red;
                    nodes.rotate_left(w);
                    w = nodes[x].left;
                }
                nodes[w].tag = nodes[x].tag;
                nodes[x].tag = Color::Black;
                let outer = nodes[w].left;
                nodes[outer].tag = Color::Black;
                nodes.rotate_right(x);
                n = nodes.root();
            }
        }
        x = nodes[n].parent;
    }

    if is_red(nodes, n) {
        nodes[n].tag = Color::Black;
    }
}

/// Black nodes on every path from `x` down to a `NIL` leaf, counting the leaf.
fn black_height<T>(nodes: &Nodes<T, Color>, x: NodeId) -> Result<usize, Violation> {
    if x == NIL {
        return Ok(1);
    }
    let (l, r) = (nodes[x].left, nodes[x].right);
    if nodes[x].tag == Color::Red && (is_red(nodes, l) || is_red(nodes, r)) {
        return Err(Violation::RedRed { node: x.index() });
    }
    let left = black_height(nodes, l)?;
    let right = black_height(nodes, r)?;
    if left != right {
        return Err(Violation::BlackHeight { node: x.index(), left, right });
    }
    Ok(left + usize::from(nodes[x].tag == Color::Black))
}

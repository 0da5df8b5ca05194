use std::ops::{Index, IndexMut};
use std::sync::atomic::{AtomicU64, Ordering};

use log::trace;

/// Index of a slot in a [`Nodes`] arena.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// The "no node here" link.
pub const NIL: NodeId = NodeId(usize::MAX);

/// Every arena keeps its sentinel in the first slot.
///
/// The sentinel is the end position and the root's parent: `sentinel.left` is the root,
/// `sentinel.right` and `sentinel.parent` stay `NIL` forever.
pub const SENTINEL: NodeId = NodeId(0);

// NOTE: stamp 0 is never handed out, so a free slot can't match any cursor.
static NEXT_STAMP: AtomicU64 = AtomicU64::new(1);

fn fresh_stamp() -> u64 {
    NEXT_STAMP.fetch_add(1, Ordering::Relaxed)
}

pub struct Node<T, Tag> {
    pub parent: NodeId,
    pub left: NodeId,
    pub right: NodeId,
    pub tag: Tag,
    stamp: u64,
    value: Option<T>,
}

impl<T, Tag> Node<T, Tag> {
    fn new(value: Option<T>, tag: Tag) -> Self {
        Self {
            parent: NIL,
            left: NIL,
            right: NIL,
            tag,
            stamp: fresh_stamp(),
            value,
        }
    }
}

/// Slot table owning every node of one tree, sentinel included.
///
/// Nodes never move once allocated. Rotations and transplants only rewrite links,
/// which is what keeps cursors to untouched nodes valid across any mutation.
pub struct Nodes<T, Tag> {
    slots: Vec<Node<T, Tag>>,
    free: Vec<NodeId>,
}

impl<T, Tag> Index<NodeId> for Nodes<T, Tag> {
    type Output = Node<T, Tag>;

    #[inline]
    fn index(&self, id: NodeId) -> &Self::Output {
        &self.slots[id.0]
    }
}

impl<T, Tag> IndexMut<NodeId> for Nodes<T, Tag> {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut Self::Output {
        &mut self.slots[id.0]
    }
}

impl<T, Tag> Nodes<T, Tag> {
    pub fn new(sentinel_tag: Tag) -> Self {
        Self {
            slots: vec![Node::new(None, sentinel_tag)],
            free: Vec::new(),
        }
    }

    /// Store `value` in a fresh, unlinked node.
    pub fn alloc(&mut self, value: T, tag: Tag) -> NodeId {
        let node = Node::new(Some(value), tag);
        match self.free.pop() {
            Some(id) => {
                self.slots[id.0] = node;
                id
            }
            None => {
                self.slots.push(node);
                NodeId(self.slots.len() - 1)
            }
        }
    }

    /// Give an already unlinked node's slot back, returning its element.
    pub fn release(&mut self, id: NodeId) -> T {
        debug_assert_ne!(id, SENTINEL, "the sentinel is never released");
        let slot = &mut self.slots[id.0];
        slot.stamp = 0;
        slot.parent = NIL;
        slot.left = NIL;
        slot.right = NIL;
        let value = slot.value.take().expect("node released twice");
        self.free.push(id);
        value
    }

    /// Drop every node but the sentinel.
    pub fn clear(&mut self) {
        self.slots.truncate(1);
        self.free.clear();
        self.slots[0].left = NIL;
    }

    /// Move all `len` elements out in order starting from `start`, leaving only the sentinel.
    pub fn drain_in_order(&mut self, start: NodeId, len: usize) -> Vec<T> {
        let mut values = Vec::with_capacity(len);
        let mut x = start;
        while x != SENTINEL {
            // NOTE: only the payload goes, the links still lead on to the successor
            values.push(self.slots[x.0].value.take().expect("node drained twice"));
            x = self.successor(x);
        }
        self.clear();
        values
    }

    pub fn root(&self) -> NodeId {
        self[SENTINEL].left
    }

    pub fn stamp(&self, id: NodeId) -> u64 {
        self[id].stamp
    }

    /// Whether `id` is a live node of this arena that was issued `stamp`.
    pub fn holds(&self, id: NodeId, stamp: u64) -> bool {
        stamp != 0 && self.slots.get(id.0).is_some_and(|slot| slot.stamp == stamp)
    }

    pub fn value(&self, id: NodeId) -> &T {
        self[id].value.as_ref().expect("the sentinel carries no element")
    }

    pub fn value_mut(&mut self, id: NodeId) -> &mut T {
        self[id].value.as_mut().expect("the sentinel carries no element")
    }

    pub fn try_value(&self, id: NodeId) -> Option<&T> {
        self[id].value.as_ref()
    }

    pub fn is_left_child(&self, x: NodeId) -> bool {
        x == self[self[x].parent].left
    }

    pub fn minimum(&self, mut x: NodeId) -> NodeId {
        while self[x].left != NIL {
            x = self[x].left;
        }
        x
    }

    pub fn maximum(&self, mut x: NodeId) -> NodeId {
        while self[x].right != NIL {
            x = self[x].right;
        }
        x
    }

    /// In-order successor. The last node's successor is the sentinel.
    ///
    /// Complexity: O(log(n))
    pub fn successor(&self, mut x: NodeId) -> NodeId {
        if self[x].right != NIL {
            return self.minimum(self[x].right);
        }
        while x == self[self[x].parent].right {
            x = self[x].parent;
        }
        self[x].parent
    }

    /// In-order predecessor. The sentinel's predecessor is the last node.
    ///
    /// Must not be called on the leftmost node: that walk runs off the top of the tree.
    pub fn predecessor(&self, mut x: NodeId) -> NodeId {
        if self[x].left != NIL {
            return self.maximum(self[x].left);
        }
        while x == self[self[x].parent].left {
            x = self[x].parent;
        }
        self[x].parent
    }

    /// Put `v` (possibly `NIL`) where `u` hangs off its parent. `u`'s own links are left alone.
    pub fn transplant(&mut self, u: NodeId, v: NodeId) {
        let parent = self[u].parent;
        if u == self[parent].left {
            self[parent].left = v;
        } else {
            self[parent].right = v;
        }
        if v != NIL {
            self[v].parent = parent;
        }
    }

    /// Lift `x.right` into `x`'s place. Links only, balance tags are the caller's business.
    pub fn rotate_left(&mut self, x: NodeId) {
        let y = self[x].right;
        trace!("rotate left at {} (pivot {})", x.0, y.0);

        let inner = self[y].left;
        self[x].right = inner;
        if inner != NIL {
            self[inner].parent = x;
        }

        let parent = self[x].parent;
        self[y].parent = parent;
        if x == self[parent].left {
            self[parent].left = y;
        } else {
            self[parent].right = y;
        }

        self[y].left = x;
        self[x].parent = y;
    }

    /// Lift `x.left` into `x`'s place. Links only, balance tags are the caller's business.
    pub fn rotate_right(&mut self, x: NodeId) {
        let y = self[x].left;
        trace!("rotate right at {} (pivot {})", x.0, y.0);

        let inner = self[y].right;
        self[x].left = inner;
        if inner != NIL {
            self[inner].parent = x;
        }

        let parent = self[x].parent;
        self[y].parent = parent;
        if x == self[parent].right {
            self[parent].right = y;
        } else {
            self[parent].left = y;
        }

        self[y].right = x;
        self[x].parent = y;
    }

    /// Number of nodes on the longest path down from `x`.
    pub fn height(&self, x: NodeId) -> usize {
        if x == NIL {
            return 0;
        }
        1 + self.height(self[x].left).max(self.height(self[x].right))
    }
}

impl<T: Clone, Tag: Clone> Clone for Nodes<T, Tag> {
    /// Same shape, same slot numbers, but every live node gets a new stamp:
    /// cursors into the original must not resolve in the copy.
    fn clone(&self) -> Self {
        let slots = self
            .slots
            .iter()
            .map(|slot| Node {
                parent: slot.parent,
                left: slot.left,
                right: slot.right,
                tag: slot.tag.clone(),
                stamp: if slot.stamp == 0 { 0 } else { fresh_stamp() },
                value: slot.value.clone(),
            })
            .collect();
        Self {
            slots,
            free: self.free.clone(),
        }
    }
}

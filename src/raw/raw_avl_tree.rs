use smallvec::SmallVec;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{ABSENT_HEIGHT, Node, Side};
use super::size::Size;

/// The size-augmented AVL engine backing both `AvlMap` and `RankList`.
///
/// Everything here is structural: attach a leaf into a vacant slot, unlink a
/// node, walk upward restoring the balance invariant, select by rank, scan
/// to a subtree's edge. Nothing in this file compares keys - the wrappers
/// decide *where* a node goes, the engine decides *how* the tree stays an
/// AVL tree afterwards.
#[derive(Clone)]
pub(crate) struct RawAvlTree<V> {
    /// Arena owning every node; links between nodes are handles into it.
    nodes: Arena<Node<V>>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<Handle>,
}

impl<V> RawAvlTree<V> {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
        }
    }

    /// Creates a new tree with room for `capacity` nodes.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
        }
    }

    /// Returns the node capacity of the backing arena.
    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Returns the number of nodes in the tree: the root's subtree size.
    pub(crate) fn len(&self) -> usize {
        let len = self.subtree_size(self.root);
        debug_assert_eq!(len, self.nodes.len(), "`len()` - root size and arena count disagree!");
        len
    }

    /// Returns true if the tree contains no nodes.
    pub(crate) fn is_empty(&self) -> bool {
        debug_assert_eq!(self.root.is_none(), self.nodes.is_empty());
        self.root.is_none()
    }

    /// Removes every node.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    /// Returns the root handle, if the tree is non-empty.
    pub(crate) fn root(&self) -> Option<Handle> {
        self.root
    }

    /// Returns a reference to a node by handle.
    pub(crate) fn node(&self, handle: Handle) -> &Node<V> {
        self.nodes.get(handle)
    }

    /// Size of the subtree rooted at `node`; an absent subtree counts 0.
    pub(crate) fn subtree_size(&self, node: Option<Handle>) -> usize {
        node.map_or(0, |h| self.nodes.get(h).size().to_usize())
    }

    /// Height of the subtree rooted at `node`; an absent subtree counts -1.
    fn subtree_height(&self, node: Option<Handle>) -> i8 {
        node.map_or(ABSENT_HEIGHT, |h| self.nodes.get(h).height())
    }

    /// height(left) - height(right); in {-1, 0, 1} for a balanced node.
    fn balance_factor(&self, node: Handle) -> i8 {
        let n = self.nodes.get(node);
        self.subtree_height(n.left()) - self.subtree_height(n.right())
    }

    /// Recomputes `node`'s size, then height, from its children.
    fn refresh(&mut self, node: Handle) {
        let n = self.nodes.get(node);
        let (left, right) = (n.left(), n.right());
        let size = 1 + self.subtree_size(left) + self.subtree_size(right);
        let height = 1 + self.subtree_height(left).max(self.subtree_height(right));
        let n = self.nodes.get_mut(node);
        n.set_size(Size::from_usize(size));
        n.set_height(height);
    }

    // ─── Splice primitives ───────────────────────────────────────────────

    /// Plants a fresh leaf as the root of an empty tree.
    pub(crate) fn attach_root(&mut self, key: i64, value: V) -> Handle {
        debug_assert!(self.root.is_none(), "`attach_root()` - tree is not empty!");
        let handle = self.nodes.alloc(Node::new_leaf(key, value));
        self.root = Some(handle);
        handle
    }

    /// Attaches a fresh leaf into the vacant `side` slot of `parent`.
    ///
    /// Ancestor heights and sizes are left stale; the caller follows up with
    /// [`fix_up_path`](Self::fix_up_path) from `parent`.
    pub(crate) fn attach(&mut self, parent: Handle, side: Side, key: i64, value: V) -> Handle {
        debug_assert!(
            self.nodes.get(parent).child(side).is_none(),
            "`attach()` - target slot is occupied!"
        );
        let handle = self.nodes.alloc(Node::new_leaf(key, value));
        self.nodes.get_mut(handle).set_parent(Some(parent));
        self.nodes.get_mut(parent).set_child(side, Some(handle));
        handle
    }

    /// Structurally removes `node` from the tree and returns the handle the
    /// rebalancing walk must start from (`None` when the tree emptied or the
    /// root was replaced by its lone leaf child).
    ///
    /// With two children, the in-order successor is spliced into `node`'s
    /// slot and survives; with fewer, the lone child (or nothing) replaces
    /// it. Either way `node` is fully detached afterwards - free its slot
    /// with [`take_node`](Self::take_node), then run
    /// [`fix_up_path`](Self::fix_up_path) on the returned start point.
    pub(crate) fn unlink(&mut self, node: Handle) -> Option<Handle> {
        let n = self.nodes.get(node);
        match (n.left(), n.right()) {
            (Some(_), Some(right)) => Some(self.splice_successor(node, right)),
            (Some(child), None) | (None, Some(child)) => {
                let parent = self.nodes.get(node).parent();
                self.replace_in_parent(node, parent, Some(child));
                self.nodes.get_mut(child).set_parent(parent);
                parent
            }
            (None, None) => {
                let parent = self.nodes.get(node).parent();
                self.replace_in_parent(node, parent, None);
                parent
            }
        }
    }

    /// Frees a fully detached node's arena slot and returns the node.
    pub(crate) fn take_node(&mut self, node: Handle) -> Node<V> {
        self.nodes.take(node)
    }

    /// Points `parent`'s slot for `node` (or the root) at `replacement`.
    fn replace_in_parent(&mut self, node: Handle, parent: Option<Handle>, replacement: Option<Handle>) {
        match parent {
            None => self.root = replacement,
            Some(p) => {
                let side = self.nodes.get(p).side_of(node);
                self.nodes.get_mut(p).set_child(side, replacement);
            }
        }
    }

    /// Two-child unlink: moves the in-order successor into `node`'s
    /// structural position and returns the fix-up start point.
    fn splice_successor(&mut self, node: Handle, right: Handle) -> Handle {
        let successor = self
            .min_in_subtree(Some(right))
            .expect("`unlink()` - two-child node has an empty right subtree!");

        // The walk starts one level below the splice point: at the successor
        // itself when it is the direct right child, otherwise at the parent
        // it is about to be cut away from. Captured before any rewiring.
        let start = if successor == right {
            successor
        } else {
            self.nodes
                .get(successor)
                .parent()
                .expect("`unlink()` - deep successor has no parent!")
        };

        let node_parent = self.nodes.get(node).parent();
        self.replace_in_parent(node, node_parent, Some(successor));

        if successor != right {
            // The successor is the leftmost node of the right subtree, so it
            // has no left child: its own right child takes its old slot, and
            // it adopts the full right subtree.
            let succ_right = self.nodes.get(successor).right();
            self.nodes.get_mut(start).set_child(Side::Left, succ_right);
            if let Some(r) = succ_right {
                self.nodes.get_mut(r).set_parent(Some(start));
            }
            self.nodes.get_mut(successor).set_child(Side::Right, Some(right));
            self.nodes.get_mut(right).set_parent(Some(successor));
        }

        self.nodes.get_mut(successor).set_parent(node_parent);

        let node_left = self.nodes.get(node).left();
        self.nodes.get_mut(successor).set_child(Side::Left, node_left);
        if let Some(l) = node_left {
            self.nodes.get_mut(l).set_parent(Some(successor));
        }

        start
    }

    // ─── Rebalancing ─────────────────────────────────────────────────────

    /// Rotates the subtree rooted at `x` toward `dir`; the child on the
    /// opposite side becomes the new subtree root.
    ///
    /// Rewrites exactly: the pivot's inner child onto `x`, `x` under the
    /// pivot, and the grandparent's slot (or the tree root). `x` is
    /// refreshed before the pivot because the pivot's new height and size
    /// depend on `x`'s.
    fn rotate(&mut self, dir: Side, x: Handle) {
        let rising = dir.opposite();
        let y = self
            .nodes
            .get(x)
            .child(rising)
            .expect("`rotate()` - no child on the rising side!");

        // y's inner subtree crosses over to x.
        let inner = self.nodes.get(y).child(dir);
        self.nodes.get_mut(x).set_child(rising, inner);
        if let Some(inner) = inner {
            self.nodes.get_mut(inner).set_parent(Some(x));
        }

        // y takes x's place under the grandparent, or as the root.
        let grandparent = self.nodes.get(x).parent();
        self.nodes.get_mut(y).set_parent(grandparent);
        match grandparent {
            None => self.root = Some(y),
            Some(g) => {
                let side = self.nodes.get(g).side_of(x);
                self.nodes.get_mut(g).set_child(side, Some(y));
            }
        }

        // x descends below y.
        self.nodes.get_mut(y).set_child(dir, Some(x));
        self.nodes.get_mut(x).set_parent(Some(y));

        self.refresh(x);
        self.refresh(y);
    }

    /// Checks `node`'s balance factor and restores it if it hit ±2.
    ///
    /// Returns the number of rotations performed (0, 1, or 2). The heavy
    /// child's own balance factor picks the shape: leaning the same way *or
    /// level* takes a single rotation - the level case only arises on
    /// deletion and must not be double-rotated - while leaning the opposite
    /// way takes the double.
    fn rebalance_at(&mut self, node: Handle) -> usize {
        let bf = self.balance_factor(node);
        if bf.abs() <= 1 {
            return 0;
        }

        let heavy = if bf > 0 { Side::Left } else { Side::Right };
        let child = self
            .nodes
            .get(node)
            .child(heavy)
            .expect("`rebalance_at()` - no child on the heavy side!");
        let child_bf = self.balance_factor(child);

        let leans_opposite = match heavy {
            Side::Left => child_bf < 0,
            Side::Right => child_bf > 0,
        };

        if leans_opposite {
            self.rotate(heavy, child);
            self.rotate(heavy.opposite(), node);
            2
        } else {
            self.rotate(heavy.opposite(), node);
            1
        }
    }

    /// Walks from `start` to the root, refreshing size and height and
    /// rebalancing at every step; returns the total rotation count.
    ///
    /// The next ancestor is captured before rebalancing: a rotation demotes
    /// the current node under a new subtree root that the rotation itself
    /// already refreshed, so the walk resumes above it.
    pub(crate) fn fix_up_path(&mut self, start: Option<Handle>) -> usize {
        let mut rotations = 0;
        let mut current = start;
        while let Some(node) = current {
            let parent = self.nodes.get(node).parent();
            self.refresh(node);
            rotations += self.rebalance_at(node);
            current = parent;
        }
        rotations
    }

    // ─── Structural queries ──────────────────────────────────────────────

    /// Leftmost node of the subtree rooted at `origin`.
    pub(crate) fn min_in_subtree(&self, origin: Option<Handle>) -> Option<Handle> {
        self.edge_of_subtree(origin, Side::Left)
    }

    /// Rightmost node of the subtree rooted at `origin`.
    pub(crate) fn max_in_subtree(&self, origin: Option<Handle>) -> Option<Handle> {
        self.edge_of_subtree(origin, Side::Right)
    }

    fn edge_of_subtree(&self, origin: Option<Handle>, side: Side) -> Option<Handle> {
        let mut current = origin?;
        while let Some(next) = self.nodes.get(current).child(side) {
            current = next;
        }
        Some(current)
    }

    /// Order-statistic selection: the node at 1-based in-order position
    /// `rank`, or `None` when `rank` is outside `1..=len`.
    ///
    /// At each node the left subtree holds ranks `1..=left_size`, the node
    /// itself is `left_size + 1`, and the right subtree holds the rest with
    /// `left_size + 1` positions subtracted.
    pub(crate) fn select(&self, rank: usize) -> Option<Handle> {
        if rank == 0 || rank > self.len() {
            return None;
        }

        let mut remaining = rank;
        let mut current = self.root?;
        loop {
            let n = self.nodes.get(current);
            let left_size = self.subtree_size(n.left());
            if remaining == left_size + 1 {
                return Some(current);
            }
            if remaining > left_size + 1 {
                remaining -= left_size + 1;
                current = n.right()?;
            } else {
                current = n.left()?;
            }
        }
    }

    /// Visits every node in in-order position, left to right.
    ///
    /// Iterative with an explicit stack bounded by the tree height (well
    /// under the inline capacity until the tree holds tens of thousands of
    /// nodes).
    pub(crate) fn for_each_in_order<'a, F>(&'a self, mut visit: F)
    where
        F: FnMut(&'a Node<V>),
    {
        let mut stack: SmallVec<[Handle; 16]> = SmallVec::new();
        let mut current = self.root;
        loop {
            while let Some(node) = current {
                stack.push(node);
                current = self.nodes.get(node).left();
            }
            let Some(node) = stack.pop() else { break };
            let n = self.nodes.get(node);
            visit(n);
            current = n.right();
        }
    }
}

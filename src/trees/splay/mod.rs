//! An implementation of splay trees.
//!
//! Every insertion, deletion and most queries finish by splaying the node they touched
//! to the root. No balancing data is stored in the nodes: the restructuring alone
//! makes every operation take `O(log n)` amortized time.
//!
//! Nodes keep a link to their parent, so the nodes are stored in an [`Arena`] and link to
//! each other with [`NodeId`] handles. A node whose parent is [`None`] hangs directly off
//! the tree itself, which plays the part of a super-root above the real root.

mod arena;

pub use arena::*;

use super::basic_tree::Side;
use super::*;
use std::cmp::Ordering;

pub struct SplayTree<K> {
    arena: Arena<K>,
    root: Option<NodeId>,
}

impl<K> SplayTree<K> {
    fn size_of(&self, id: Option<NodeId>) -> u32 {
        id.map_or(0, |id| self.arena[id].size)
    }

    fn son(&self, id: NodeId, side: Side) -> Option<NodeId> {
        match side {
            Side::Left => self.arena[id].left,
            Side::Right => self.arena[id].right,
        }
    }

    /// Remakes the size that is stored in this node, based on its sons.
    fn update(&mut self, id: NodeId) {
        let node = &self.arena[id];
        let size = node.count + self.size_of(node.left) + self.size_of(node.right);
        self.arena[id].size = size;
    }

    /// Makes `child` the son of `parent` on side `side`, and `parent` the parent of `child`,
    /// so that the two links never disagree.
    /// If `parent` is [`None`], `child` becomes the root, regardless of `side`.
    fn set_child(&mut self, parent: Option<NodeId>, child: Option<NodeId>, side: Side) {
        match parent {
            None => self.root = child,
            Some(parent) => match side {
                Side::Left => self.arena[parent].left = child,
                Side::Right => self.arena[parent].right = child,
            },
        }
        if let Some(child) = child {
            self.arena[child].parent = parent;
        }
    }

    /// Which son of its parent the node is. [`None`] for the root.
    fn side_of(&self, id: NodeId) -> Option<Side> {
        let parent = self.arena[id].parent?;
        if self.arena[parent].left == Some(id) {
            Some(Side::Left)
        } else {
            Some(Side::Right)
        }
    }

    /// Rotates `id` above its parent. The parent's size is rebuilt first, since it is now
    /// the son, and then `id`'s. Returns `id`, the new root of the rotated subtree.
    /// Does nothing if `id` is the root.
    fn rotate(&mut self, id: NodeId) -> NodeId {
        let (parent, side) = match (self.arena[id].parent, self.side_of(id)) {
            (Some(parent), Some(side)) => (parent, side),
            _ => return id,
        };
        let grandparent = self.arena[parent].parent;
        let parent_side = self.side_of(parent).unwrap_or(Side::Right);

        let inner = self.son(id, side.flip());
        self.set_child(Some(parent), inner, side);
        self.set_child(Some(id), Some(parent), side.flip());
        self.set_child(grandparent, Some(id), parent_side);

        self.update(parent);
        self.update(id);
        id
    }

    /// Splays `id` upwards until its parent is `stop`.
    /// `stop` must be an ancestor of `id`, or [`None`] to splay all the way to the root.
    ///
    /// About the amortized computational complexity of using splay steps:
    /// the amortized cost of any splay step, except the zig step near the top, is at most
    /// `3*(log(new_node.size) - log(old_node.size)) - 1`.
    /// The `-1` covers the cost of going down the tree in the first place.
    /// Choosing the wrong case breaks this bound, so the three cases must be exactly these.
    fn splay(&mut self, id: NodeId, stop: Option<NodeId>) -> NodeId {
        while let Some(parent) = self.arena[id].parent {
            if Some(parent) == stop {
                break;
            }
            let grandparent = self.arena[parent].parent;
            if grandparent == stop {
                // zig
                self.rotate(id);
            } else if self.side_of(id) == self.side_of(parent) {
                // zig-zig
                self.rotate(parent);
                self.rotate(id);
            } else {
                // zig-zag
                self.rotate(id);
                self.rotate(id);
            }
        }
        id
    }

    /// Descends from `from` through `side` sons as far as possible.
    fn extreme(&self, from: NodeId, side: Side) -> NodeId {
        let mut id = from;
        while let Some(son) = self.son(id, side) {
            id = son;
        }
        id
    }

    /// Finds the node that holds the `k`-th occurrence, 1-based, without splaying.
    fn kth_node(&self, mut k: u32) -> Option<NodeId> {
        let mut cur = self.root;
        while let Some(id) = cur {
            let node = &self.arena[id];
            let left_size = self.size_of(node.left);
            if k <= left_size {
                cur = node.left;
            } else if k <= left_size + node.count {
                return Some(id);
            } else {
                k -= left_size + node.count;
                cur = node.right;
            }
        }
        None
    }
}

impl<K: Key> SplayTree<K> {
    /// Finds the node holding `key`. Doesn't splay.
    pub fn find(&self, key: K) -> Option<NodeId> {
        let mut cur = self.root;
        while let Some(id) = cur {
            let node = &self.arena[id];
            match key.cmp(&node.key) {
                Ordering::Less => cur = node.left,
                Ordering::Equal => return Some(id),
                Ordering::Greater => cur = node.right,
            }
        }
        None
    }

    /// The node with the biggest key strictly smaller than `key`. Doesn't splay.
    fn prev_node(&self, key: K) -> Option<NodeId> {
        let mut res = None;
        let mut cur = self.root;
        while let Some(id) = cur {
            let node = &self.arena[id];
            if node.key < key {
                res = Some(id);
                cur = node.right;
            } else {
                cur = node.left;
            }
        }
        res
    }

    /// The node with the smallest key strictly bigger than `key`. Doesn't splay.
    fn next_node(&self, key: K) -> Option<NodeId> {
        let mut res = None;
        let mut cur = self.root;
        while let Some(id) = cur {
            let node = &self.arena[id];
            if node.key > key {
                res = Some(id);
                cur = node.left;
            } else {
                cur = node.right;
            }
        }
        res
    }

    /// Returns the key stored at the root.
    pub fn root_key(&self) -> Option<K> {
        Some(self.arena[self.root?].key)
    }
}

impl<K: Key> OrderStatisticTree<K> for SplayTree<K> {
    fn new() -> Self {
        SplayTree {
            arena: Arena::new(),
            root: None,
        }
    }

    fn insert(&mut self, key: K) {
        let mut parent = None;
        let mut side = Side::Right;
        let mut cur = self.root;
        // every node on the way down gains one occurrence below it
        while let Some(id) = cur {
            let node = &mut self.arena[id];
            node.size += 1;
            match key.cmp(&node.key) {
                Ordering::Equal => {
                    node.count += 1;
                    self.splay(id, None);
                    return;
                }
                Ordering::Less => {
                    side = Side::Left;
                    cur = node.left;
                }
                Ordering::Greater => {
                    side = Side::Right;
                    cur = node.right;
                }
            }
            parent = Some(id);
        }
        let id = self.arena.insert(SplayNode::new(key));
        self.set_child(parent, Some(id), side);
        self.splay(id, None);
    }

    fn delete(&mut self, key: K) {
        let id = match self.find(key) {
            None => return,
            Some(id) => id,
        };
        self.splay(id, None);
        let node = &mut self.arena[id];
        if node.count > 1 {
            node.count -= 1;
            node.size -= 1;
            return;
        }
        match (node.left, node.right) {
            (None, child) | (child, None) => self.set_child(None, child, Side::Right),
            (Some(left), Some(right)) => {
                // the maximum of the left subtree has no right son once it is
                // splayed up to the left son of `id`
                let max = self.extreme(left, Side::Right);
                self.splay(max, Some(id));
                self.set_child(Some(max), Some(right), Side::Right);
                self.update(max);
                self.set_child(None, Some(max), Side::Right);
            }
        }
        self.arena.remove(id);
    }

    fn contains(&self, key: K) -> bool {
        self.find(key).is_some()
    }

    fn rank(&mut self, key: K) -> u32 {
        if let Some(id) = self.find(key) {
            self.splay(id, None);
            return 1 + self.size_of(self.arena[id].left);
        }
        match self.prev_node(key) {
            Some(id) => {
                self.splay(id, None);
                let node = &self.arena[id];
                1 + self.size_of(node.left) + node.count
            }
            None => 1,
        }
    }

    fn kth(&mut self, k: u32) -> Result<K, TreeError> {
        let id = self.kth_node(k).ok_or(TreeError::OutOfRange)?;
        self.splay(id, None);
        Ok(self.arena[id].key)
    }

    fn prev(&mut self, key: K) -> Result<K, TreeError> {
        let id = self.prev_node(key).ok_or(TreeError::NoPrevValue)?;
        self.splay(id, None);
        Ok(self.arena[id].key)
    }

    fn next(&mut self, key: K) -> Result<K, TreeError> {
        let id = self.next_node(key).ok_or(TreeError::NoNextValue)?;
        self.splay(id, None);
        Ok(self.arena[id].key)
    }

    fn size(&self) -> u32 {
        self.size_of(self.root)
    }

    fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
    }

    fn to_vec(&self) -> Vec<(K, u32)> {
        let mut res = Vec::with_capacity(self.arena.len());
        let mut stack = vec![];
        let mut cur = self.root;
        loop {
            while let Some(id) = cur {
                stack.push(id);
                cur = self.arena[id].left;
            }
            let id = match stack.pop() {
                None => break,
                Some(id) => id,
            };
            let node = &self.arena[id];
            res.push((node.key, node.count));
            cur = node.right;
        }
        res
    }

    /// Besides the search tree invariants, checks that every son links back to its parent,
    /// that the root has no parent, and that every live node of the arena is in the tree.
    ///
    /// Iterative, since splay trees can be arbitrarily deep.
    fn assert_correctness(&self) {
        let root = match self.root {
            None => {
                assert!(self.arena.is_empty(), "empty tree with live nodes");
                return;
            }
            Some(root) => root,
        };
        assert_eq!(self.arena[root].parent, None, "the root has a parent");

        let mut reachable = 0;
        let mut stack: Vec<(NodeId, Option<K>, Option<K>)> = vec![(root, None, None)];
        while let Some((id, low, high)) = stack.pop() {
            reachable += 1;
            let node = &self.arena[id];
            assert!(node.count > 0, "node {:?} has a zero count", node.key);
            assert_eq!(
                node.size,
                node.count + self.size_of(node.left) + self.size_of(node.right),
                "wrong size at node {:?}",
                node.key
            );
            if let Some(low) = low {
                assert!(low < node.key, "{:?} is out of order", node.key);
            }
            if let Some(high) = high {
                assert!(node.key < high, "{:?} is out of order", node.key);
            }
            for (son, low, high) in [
                (node.left, low, Some(node.key)),
                (node.right, Some(node.key), high),
            ]
            .iter()
            {
                if let Some(son) = *son {
                    assert_eq!(
                        self.arena[son].parent,
                        Some(id),
                        "broken parent link below {:?}",
                        node.key
                    );
                    stack.push((son, *low, *high));
                }
            }
        }
        assert_eq!(reachable, self.arena.len(), "leaked nodes");
    }
}

impl<K: Key> Default for SplayTree<K> {
    fn default() -> Self {
        SplayTree::new()
    }
}

impl<K: Key> std::iter::Extend<K> for SplayTree<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K: Key> std::iter::FromIterator<K> for SplayTree<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = SplayTree::new();
        tree.extend(iter);
        tree
    }
}

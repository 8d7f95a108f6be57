//! The basic tree module
//! This module implements boxed, unbalanced binary search trees with counted keys.
//! The treaps are built by wrapping around the [`BasicTree`] type, and balance it
//! using the priority stored in every node.

mod iterative_deallocator;
mod iterators;

pub use iterative_deallocator::*;
pub use iterators::*;

use crate::data::Key;
use std::cmp::Ordering;

/// The type that is used for treap bookkeeping.
/// Convention: a bigger number should go higher up the tree.
pub type Priority = u64;

/// Which son of a node.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn flip(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// A basic tree. Might be empty.
pub enum BasicTree<K> {
    Empty,
    Root(Box<BasicNode<K>>),
}
use BasicTree::*;

/// A basic node. Can be viewed as a non-empty basic tree: it always holds at least one
/// occurrence of its key.
pub struct BasicNode<K> {
    pub(crate) key: K,
    /// How many occurrences of `key` this node stands for. Always at least `1`.
    pub(crate) count: u32,
    /// `count` plus the sizes of both subtrees.
    pub(crate) size: u32,
    pub(crate) priority: Priority,
    pub left: BasicTree<K>,
    pub right: BasicTree<K>,
}

impl<K> BasicNode<K> {
    /// Creates a node holding one occurrence of `key`.
    pub fn new(key: K, priority: Priority) -> BasicNode<K> {
        BasicNode {
            key,
            count: 1,
            size: 1,
            priority,
            left: Empty,
            right: Empty,
        }
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// Remakes the size that is stored in this node, based on its sons.
    /// This is necessary whenever a son pointer or the count changed.
    pub fn rebuild(&mut self) {
        self.size = self.count + self.left.size() + self.right.size();
    }

    pub fn son(&self, side: Side) -> &BasicTree<K> {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn son_mut(&mut self, side: Side) -> &mut BasicTree<K> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}

impl<K> Default for BasicTree<K> {
    fn default() -> Self {
        Empty
    }
}

impl<K> BasicTree<K> {
    pub fn new() -> Self {
        Empty
    }

    pub fn from_node(node: BasicNode<K>) -> Self {
        Root(Box::new(node))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Empty)
    }

    pub fn node(&self) -> Option<&BasicNode<K>> {
        match self {
            Empty => None,
            Root(node) => Some(&**node),
        }
    }

    pub fn node_mut(&mut self) -> Option<&mut BasicNode<K>> {
        match self {
            Empty => None,
            Root(node) => Some(&mut **node),
        }
    }

    pub fn into_node_boxed(self) -> Option<Box<BasicNode<K>>> {
        match self {
            Empty => None,
            Root(node) => Some(node),
        }
    }

    /// Takes the tree out, and writes `Empty` instead.
    pub fn take(&mut self) -> BasicTree<K> {
        std::mem::replace(self, Empty)
    }

    /// The number of occurrences stored in the whole tree.
    pub fn size(&self) -> u32 {
        match self {
            Empty => 0,
            Root(node) => node.size,
        }
    }

    pub fn priority(&self) -> Option<Priority> {
        Some(self.node()?.priority)
    }

    /// Remakes the size stored in the root, based on its sons.
    pub fn rebuild(&mut self) {
        if let Root(node) = self {
            node.rebuild();
        }
    }

    /// Performs a left rotation: the right son becomes the root of this subtree.
    /// Returns [`None`] if this is an empty tree or if it has no right son,
    /// in which case the tree is left untouched.
    pub fn rot_left(&mut self) -> Option<()> {
        if self.node()?.right.is_empty() {
            return None;
        }
        let mut bn1 = self.take().into_node_boxed()?;
        let mut bn2 = bn1.right.take().into_node_boxed()?;

        bn1.right = bn2.left.take();
        bn1.rebuild();
        bn2.left = Root(bn1);
        bn2.rebuild();

        *self = Root(bn2);
        Some(())
    }

    /// Performs a right rotation: the left son becomes the root of this subtree.
    /// Returns [`None`] if this is an empty tree or if it has no left son,
    /// in which case the tree is left untouched.
    pub fn rot_right(&mut self) -> Option<()> {
        if self.node()?.left.is_empty() {
            return None;
        }
        let mut bn1 = self.take().into_node_boxed()?;
        let mut bn2 = bn1.left.take().into_node_boxed()?;

        bn1.left = bn2.right.take();
        bn1.rebuild();
        bn2.right = Root(bn1);
        bn2.rebuild();

        *self = Root(bn2);
        Some(())
    }

    /// Rotates the son on side `side` up into the root of this subtree.
    pub fn rot_up_from(&mut self, side: Side) -> Option<()> {
        match side {
            Side::Left => self.rot_right(),
            Side::Right => self.rot_left(),
        }
    }

    /// Iterates over the distinct keys in order, each with its count.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter::new(self)
    }

    /// Returns the leftmost node.
    pub fn min(&self) -> Option<&BasicNode<K>> {
        let mut node = self.node()?;
        while let Root(left) = &node.left {
            node = &**left;
        }
        Some(node)
    }

    /// Returns the rightmost node.
    pub fn max(&self) -> Option<&BasicNode<K>> {
        let mut node = self.node()?;
        while let Root(right) = &node.right {
            node = &**right;
        }
        Some(node)
    }

    /// Finds the node that holds the `k`-th occurrence, 1-based.
    /// Returns [`None`] if `k == 0` or `k > self.size()`.
    pub fn kth(&self, mut k: u32) -> Option<&BasicNode<K>> {
        let mut tree = self;
        while let Root(node) = tree {
            let left_size = node.left.size();
            if k <= left_size {
                tree = &node.left;
            } else if k <= left_size + node.count {
                return Some(&**node);
            } else {
                k -= left_size + node.count;
                tree = &node.right;
            }
        }
        None
    }
}

impl<K: Key> BasicTree<K> {
    pub fn find(&self, key: K) -> Option<&BasicNode<K>> {
        let mut tree = self;
        while let Root(node) = tree {
            match key.cmp(&node.key) {
                Ordering::Less => tree = &node.left,
                Ordering::Equal => return Some(&**node),
                Ordering::Greater => tree = &node.right,
            }
        }
        None
    }

    /// One plus the number of occurrences strictly smaller than `key`.
    pub fn rank(&self, key: K) -> u32 {
        let mut rank = 1;
        let mut tree = self;
        while let Root(node) = tree {
            match key.cmp(&node.key) {
                Ordering::Less => tree = &node.left,
                Ordering::Equal => return rank + node.left.size(),
                Ordering::Greater => {
                    rank += node.left.size() + node.count;
                    tree = &node.right;
                }
            }
        }
        rank
    }

    /// The node with the biggest key strictly smaller than `key`.
    pub fn prev(&self, key: K) -> Option<&BasicNode<K>> {
        let mut res = None;
        let mut tree = self;
        while let Root(node) = tree {
            if node.key < key {
                res = Some(&**node);
                tree = &node.right;
            } else {
                tree = &node.left;
            }
        }
        res
    }

    /// The node with the smallest key strictly bigger than `key`.
    pub fn next(&self, key: K) -> Option<&BasicNode<K>> {
        let mut res = None;
        let mut tree = self;
        while let Root(node) = tree {
            if node.key > key {
                res = Some(&**node);
                tree = &node.left;
            } else {
                tree = &node.right;
            }
        }
        res
    }

    /// Checks that every node's size is its count plus the sizes of its sons,
    /// that all counts are positive, and that keys are strictly increasing in order.
    /// Also calls `local` on every node, for engine specific invariants.
    /// If anything is violated, panics.
    pub fn assert_correctness_with<F>(&self, mut local: F)
    where
        F: FnMut(&BasicNode<K>),
    {
        fn rec<K: Key, F: FnMut(&BasicNode<K>)>(
            tree: &BasicTree<K>,
            low: Option<K>,
            high: Option<K>,
            local: &mut F,
        ) {
            if let Root(node) = tree {
                assert!(node.count > 0, "node {:?} has a zero count", node.key);
                assert_eq!(
                    node.size,
                    node.count + node.left.size() + node.right.size(),
                    "wrong size at node {:?}",
                    node.key
                );
                if let Some(low) = low {
                    assert!(low < node.key, "{:?} is out of order", node.key);
                }
                if let Some(high) = high {
                    assert!(node.key < high, "{:?} is out of order", node.key);
                }
                local(node);
                rec(&node.left, low, Some(node.key), local);
                rec(&node.right, Some(node.key), high, local);
            }
        }
        rec(self, None, None, &mut local);
    }

    /// Asserts that every node has a priority at least as big as its sons' priorities.
    pub fn assert_priorities(&self) {
        self.assert_correctness_with(|node| {
            for son in [&node.left, &node.right].iter() {
                if let Some(priority) = son.priority() {
                    assert!(
                        node.priority >= priority,
                        "heap order violated below {:?}",
                        node.key
                    );
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2 - 4 - 6, as a right-leaning chain, with 4 counted twice
    fn chain() -> BasicTree<i32> {
        let mut six = BasicNode::new(6, 0);
        six.rebuild();
        let mut four = BasicNode::new(4, 0);
        four.count = 2;
        four.right = BasicTree::from_node(six);
        four.rebuild();
        let mut two = BasicNode::new(2, 0);
        two.right = BasicTree::from_node(four);
        two.rebuild();
        BasicTree::from_node(two)
    }

    #[test]
    fn rotations_keep_sizes() {
        let mut tree = chain();
        tree.assert_correctness_with(|_| {});
        assert_eq!(tree.size(), 4);

        tree.rot_left().unwrap();
        assert_eq!(*tree.node().unwrap().key(), 4);
        tree.assert_correctness_with(|_| {});
        assert_eq!(tree.size(), 4);

        tree.rot_right().unwrap();
        assert_eq!(*tree.node().unwrap().key(), 2);
        tree.assert_correctness_with(|_| {});

        // no left son: nothing happens
        assert_eq!(tree.rot_right(), None);
        assert_eq!(tree.size(), 4);
        assert_eq!(BasicTree::<i32>::Empty.rot_left(), None);
    }

    #[test]
    fn descents() {
        let tree = chain();
        assert_eq!(tree.kth(0).map(|n| n.key), None);
        assert_eq!(tree.kth(1).map(|n| n.key), Some(2));
        assert_eq!(tree.kth(2).map(|n| n.key), Some(4));
        assert_eq!(tree.kth(3).map(|n| n.key), Some(4));
        assert_eq!(tree.kth(4).map(|n| n.key), Some(6));
        assert_eq!(tree.kth(5).map(|n| n.key), None);

        assert_eq!(tree.rank(1), 1);
        assert_eq!(tree.rank(4), 2);
        assert_eq!(tree.rank(5), 4);
        assert_eq!(tree.rank(7), 5);

        assert_eq!(tree.prev(4).map(|n| n.key), Some(2));
        assert_eq!(tree.prev(2).map(|n| n.key), None);
        assert_eq!(tree.next(4).map(|n| n.key), Some(6));
        assert_eq!(tree.next(6).map(|n| n.key), None);
        assert_eq!(tree.min().map(|n| n.key), Some(2));
        assert_eq!(tree.max().map(|n| n.key), Some(6));
        assert!(tree.find(5).is_none());
        assert_eq!(tree.find(4).map(|n| n.count), Some(2));
    }
}

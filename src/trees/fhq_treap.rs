//! Implementation of merge/split treaps
//!
//! Same shape invariants as [`super::treap::Treap`], but the tree is never rotated.
//! Instead, every operation is composed of two primitives:
//! [`split`], that cuts a tree by a key into two ordered parts,
//! and [`merge`], that glues two ordered parts back together.
//!
//! Queries also split the tree and merge it back, so that they always leave the
//! tree exactly as valid as they found it, even when they fail.
//!
//! Cutting out exactly the occurrences of one key needs the greatest key smaller
//! than it, so this engine only accepts keys implementing [`DiscreteKey`].

use super::basic_tree::*;
use super::*;
use crate::data::DiscreteKey;

/// A merge/split treap.
pub struct FhqTreap<K> {
    tree: BasicTree<K>,
}

/// Cuts `tree` into the keys `<= key` and the keys `> key`.
/// Takes `O(log n)` expected time.
pub fn split<K: Key>(tree: BasicTree<K>, key: K) -> (BasicTree<K>, BasicTree<K>) {
    let mut node = match tree.into_node_boxed() {
        None => return (BasicTree::Empty, BasicTree::Empty),
        Some(node) => node,
    };
    if node.key <= key {
        let (left, right) = split(node.right.take(), key);
        node.right = left;
        node.rebuild();
        (BasicTree::Root(node), right)
    } else {
        let (left, right) = split(node.left.take(), key);
        node.left = right;
        node.rebuild();
        (left, BasicTree::Root(node))
    }
}

/// Concatenates two trees. Every key in `left` must be smaller than every key in `right`.
/// The root with the bigger priority stays on top.
/// Takes `O(log n)` expected time.
pub fn merge<K>(left: BasicTree<K>, right: BasicTree<K>) -> BasicTree<K> {
    let (mut left, mut right) = match (left, right) {
        (BasicTree::Empty, right) => return right,
        (left, BasicTree::Empty) => return left,
        (BasicTree::Root(left), BasicTree::Root(right)) => (left, right),
    };
    if left.priority >= right.priority {
        left.right = merge(left.right.take(), BasicTree::Root(right));
        left.rebuild();
        BasicTree::Root(left)
    } else {
        right.left = merge(BasicTree::Root(left), right.left.take());
        right.rebuild();
        BasicTree::Root(right)
    }
}

/// Cuts `tree` into the keys `< key`, the node holding `key` if there is one,
/// and the keys `> key`.
fn split_around<K: DiscreteKey>(
    tree: BasicTree<K>,
    key: K,
) -> (BasicTree<K>, BasicTree<K>, BasicTree<K>) {
    let (le, gt) = split(tree, key);
    let (lt, eq) = match key.predecessor() {
        Some(pred) => split(le, pred),
        // nothing is smaller than the minimum of the domain
        None => (BasicTree::Empty, le),
    };
    (lt, eq, gt)
}

/// A tree temporarily cut into two parts.
/// Dropping the guard merges the parts back into the tree they were cut from,
/// so every exit path of a query restores the tree.
struct SplitGuard<'a, K> {
    root: &'a mut BasicTree<K>,
    left: BasicTree<K>,
    right: BasicTree<K>,
}

impl<'a, K: Key> SplitGuard<'a, K> {
    /// Cuts into the keys `<= key` and the keys `> key`.
    fn at(root: &'a mut BasicTree<K>, key: K) -> Self {
        let (left, right) = split(root.take(), key);
        SplitGuard { root, left, right }
    }
}

impl<'a, K: DiscreteKey> SplitGuard<'a, K> {
    /// Cuts into the keys `< key` and the keys `>= key`.
    fn below(root: &'a mut BasicTree<K>, key: K) -> Self {
        match key.predecessor() {
            Some(pred) => SplitGuard::at(root, pred),
            None => {
                let right = root.take();
                SplitGuard {
                    root,
                    left: BasicTree::Empty,
                    right,
                }
            }
        }
    }
}

impl<'a, K> Drop for SplitGuard<'a, K> {
    fn drop(&mut self) {
        *self.root = merge(self.left.take(), self.right.take());
    }
}

impl<K> FhqTreap<K> {
    /// Iterates over the distinct keys in order, each with its count.
    pub fn iter(&self) -> Iter<'_, K> {
        self.tree.iter()
    }
}

impl<K: DiscreteKey> OrderStatisticTree<K> for FhqTreap<K> {
    fn new() -> Self {
        FhqTreap {
            tree: BasicTree::Empty,
        }
    }

    fn insert(&mut self, key: K) {
        let (lt, eq, gt) = split_around(self.tree.take(), key);
        let eq = match eq.into_node_boxed() {
            Some(mut node) => {
                node.count += 1;
                node.rebuild();
                BasicTree::Root(node)
            }
            None => BasicTree::from_node(BasicNode::new(key, rand::random())),
        };
        self.tree = merge(merge(lt, eq), gt);
    }

    fn delete(&mut self, key: K) {
        let (lt, eq, gt) = split_around(self.tree.take(), key);
        let eq = match eq.into_node_boxed() {
            Some(mut node) if node.count > 1 => {
                node.count -= 1;
                node.rebuild();
                BasicTree::Root(node)
            }
            _ => BasicTree::Empty,
        };
        self.tree = merge(merge(lt, eq), gt);
    }

    fn contains(&self, key: K) -> bool {
        self.tree.find(key).is_some()
    }

    fn rank(&mut self, key: K) -> u32 {
        let parts = SplitGuard::below(&mut self.tree, key);
        parts.left.size() + 1
    }

    fn kth(&mut self, k: u32) -> Result<K, TreeError> {
        self.tree
            .kth(k)
            .map(|node| node.key)
            .ok_or(TreeError::OutOfRange)
    }

    fn prev(&mut self, key: K) -> Result<K, TreeError> {
        let parts = SplitGuard::below(&mut self.tree, key);
        let res = parts.left.max().map(|node| node.key);
        res.ok_or(TreeError::NoPrevValue)
    }

    fn next(&mut self, key: K) -> Result<K, TreeError> {
        let parts = SplitGuard::at(&mut self.tree, key);
        let res = parts.right.min().map(|node| node.key);
        res.ok_or(TreeError::NoNextValue)
    }

    fn size(&self) -> u32 {
        self.tree.size()
    }

    fn clear(&mut self) {
        deallocate_iteratively(&mut self.tree);
    }

    fn to_vec(&self) -> Vec<(K, u32)> {
        self.tree.iter().map(|(key, count)| (*key, count)).collect()
    }

    fn assert_correctness(&self) {
        self.tree.assert_priorities();
    }
}

impl<K> Drop for FhqTreap<K> {
    fn drop(&mut self) {
        deallocate_iteratively(&mut self.tree);
    }
}

impl<K: DiscreteKey> Default for FhqTreap<K> {
    fn default() -> Self {
        FhqTreap::new()
    }
}

impl<K: DiscreteKey> std::iter::Extend<K> for FhqTreap<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K: DiscreteKey> std::iter::FromIterator<K> for FhqTreap<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = FhqTreap::new();
        tree.extend(iter);
        tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_then_merge() {
        let mut tree: FhqTreap<i32> = (0..100).chain(40..60).collect();
        tree.assert_correctness();
        let whole = tree.to_vec();

        let (left, right) = split(tree.tree.take(), 49);
        assert_eq!(left.size(), 60);
        assert_eq!(right.size(), 60);
        assert_eq!(left.max().map(|node| node.key), Some(49));
        assert_eq!(right.min().map(|node| node.key), Some(50));
        left.assert_priorities();
        right.assert_priorities();

        tree.tree = merge(left, right);
        tree.assert_correctness();
        assert_eq!(tree.to_vec(), whole);
    }

    #[test]
    fn queries_restore_the_tree() {
        let mut tree: FhqTreap<i64> = vec![5, 3, 8, 3].into_iter().collect();
        let before = tree.to_vec();

        assert_eq!(tree.rank(3), 1);
        assert_eq!(tree.rank(4), 3);
        assert_eq!(tree.prev(3), Err(TreeError::NoPrevValue));
        assert_eq!(tree.next(8), Err(TreeError::NoNextValue));
        assert_eq!(tree.prev(5), Ok(3));
        assert_eq!(tree.next(5), Ok(8));

        tree.assert_correctness();
        assert_eq!(tree.to_vec(), before);
        assert_eq!(tree.size(), 4);
    }

    #[test]
    fn domain_minimum() {
        let mut tree: FhqTreap<i64> = vec![i64::MIN, i64::MIN, 0].into_iter().collect();
        assert_eq!(tree.to_vec(), vec![(i64::MIN, 2), (0, 1)]);
        assert_eq!(tree.rank(i64::MIN), 1);
        assert_eq!(tree.prev(i64::MIN), Err(TreeError::NoPrevValue));
        assert_eq!(tree.next(i64::MIN), Ok(0));
        tree.delete(i64::MIN);
        tree.delete(i64::MIN);
        tree.delete(i64::MIN);
        tree.assert_correctness();
        assert_eq!(tree.to_vec(), vec![(0, 1)]);

        let mut unsigned: FhqTreap<u8> = vec![0, 255].into_iter().collect();
        assert_eq!(unsigned.rank(0), 1);
        assert_eq!(unsigned.rank(255), 2);
        assert_eq!(unsigned.prev(0), Err(TreeError::NoPrevValue));
        assert_eq!(unsigned.next(255), Err(TreeError::NoNextValue));
    }
}

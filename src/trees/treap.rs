//! Implementation of treaps
//!
//! A treap is a binary search tree on the keys, that is at the same time a heap
//! on random priorities given to the nodes on creation. Insertion and deletion
//! are the ones of a regular search tree, followed by rotations that restore the heap order.
//!
//! Its operations take `O(log n)` expected time, probabilistically.
//! Each operation may take up to linear time, but the probability of any operation
//! taking more than `O(log n)` time is extremely low.

use super::basic_tree::*;
use super::*;
use std::cmp::Ordering;

/// A rotation based treap.
pub struct Treap<K> {
    tree: BasicTree<K>,
}

impl<K> Treap<K> {
    /// Returns the priority of the root.
    pub fn priority(&self) -> Option<Priority> {
        self.tree.priority()
    }

    /// Iterates over the distinct keys in order, each with its count.
    pub fn iter(&self) -> Iter<'_, K> {
        self.tree.iter()
    }
}

impl<K: Key> OrderStatisticTree<K> for Treap<K> {
    fn new() -> Self {
        Treap {
            tree: BasicTree::Empty,
        }
    }

    fn insert(&mut self, key: K) {
        insert_rec(&mut self.tree, key);
    }

    fn delete(&mut self, key: K) {
        delete_rec(&mut self.tree, key);
    }

    fn contains(&self, key: K) -> bool {
        self.tree.find(key).is_some()
    }

    fn rank(&mut self, key: K) -> u32 {
        self.tree.rank(key)
    }

    fn kth(&mut self, k: u32) -> Result<K, TreeError> {
        self.tree
            .kth(k)
            .map(|node| node.key)
            .ok_or(TreeError::OutOfRange)
    }

    fn prev(&mut self, key: K) -> Result<K, TreeError> {
        self.tree
            .prev(key)
            .map(|node| node.key)
            .ok_or(TreeError::NoPrevValue)
    }

    fn next(&mut self, key: K) -> Result<K, TreeError> {
        self.tree
            .next(key)
            .map(|node| node.key)
            .ok_or(TreeError::NoNextValue)
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

    /// Besides the search tree invariants, checks that every node's priority
    /// is at least as big as its sons' priorities.
    fn assert_correctness(&self) {
        self.tree.assert_priorities();
    }
}

/// Inserts one occurrence of `key` under `tree`, and rotates the touched son
/// up whenever its priority beats its parent's.
fn insert_rec<K: Key>(tree: &mut BasicTree<K>, key: K) {
    let node = match tree {
        BasicTree::Empty => {
            *tree = BasicTree::from_node(BasicNode::new(key, rand::random()));
            return;
        }
        BasicTree::Root(node) => node,
    };
    let side = match key.cmp(&node.key) {
        Ordering::Equal => {
            node.count += 1;
            node.rebuild();
            return;
        }
        Ordering::Less => Side::Left,
        Ordering::Greater => Side::Right,
    };
    insert_rec(node.son_mut(side), key);
    node.rebuild();
    if node.son(side).priority() > Some(node.priority) {
        tree.rot_up_from(side);
    }
}

/// Deletes one occurrence of `key` under `tree`.
/// A node whose count drops to zero is rotated down, always lifting its son with
/// the bigger priority, until it has at most one son and can be spliced out.
fn delete_rec<K: Key>(tree: &mut BasicTree<K>, key: K) {
    let node = match tree {
        BasicTree::Empty => return,
        BasicTree::Root(node) => node,
    };
    match key.cmp(&node.key) {
        Ordering::Less => delete_rec(&mut node.left, key),
        Ordering::Greater => delete_rec(&mut node.right, key),
        Ordering::Equal if node.count > 1 => node.count -= 1,
        Ordering::Equal => {
            let side = match (node.left.priority(), node.right.priority()) {
                (None, _) => {
                    let right = node.right.take();
                    *tree = right;
                    return;
                }
                (_, None) => {
                    let left = node.left.take();
                    *tree = left;
                    return;
                }
                (Some(left), Some(right)) if left > right => Side::Left,
                _ => Side::Right,
            };
            tree.rot_up_from(side);
            if let Some(new_root) = tree.node_mut() {
                delete_rec(new_root.son_mut(side.flip()), key);
                new_root.rebuild();
            }
            return;
        }
    }
    node.rebuild();
}

impl<K> Drop for Treap<K> {
    fn drop(&mut self) {
        deallocate_iteratively(&mut self.tree);
    }
}

impl<K: Key> Default for Treap<K> {
    fn default() -> Self {
        Treap::new()
    }
}

impl<K: Key> std::iter::Extend<K> for Treap<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K: Key> std::iter::FromIterator<K> for Treap<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = Treap::new();
        tree.extend(iter);
        tree
    }
}

#[test]
fn treap_insert() {
    let arr: Vec<_> = (0..500).collect();
    for i in (0..=arr.len() as i32).step_by(7) {
        let new_val = 13;
        let mut tree: Treap<i32> = arr.iter().cloned().collect();
        tree.insert(new_val);
        tree.assert_correctness();
        assert_eq!(tree.size(), arr.len() as u32 + 1);
        assert_eq!(tree.rank(new_val), 14);
        assert_eq!(tree.kth(14), Ok(13));
        assert_eq!(tree.kth(15), Ok(13));
        tree.insert(i);
        tree.assert_correctness();
        assert_eq!(tree.size(), arr.len() as u32 + 2);
    }
}

#[test]
fn treap_delete() {
    let arr: Vec<_> = (0..500).collect();
    for i in (0..arr.len()).step_by(7) {
        let mut tree: Treap<i32> = arr.iter().cloned().collect();
        tree.delete(arr[i]);
        tree.assert_correctness();
        assert!(!tree.contains(arr[i]));
        assert_eq!(
            tree.to_vec().into_iter().map(|(key, _)| key).collect::<Vec<_>>(),
            arr[..i]
                .iter()
                .chain(arr[i + 1..].iter())
                .cloned()
                .collect::<Vec<_>>()
        );
        // absent keys are ignored
        tree.delete(arr[i]);
        tree.delete(-1);
        assert_eq!(tree.size(), arr.len() as u32 - 1);
    }
}

#[test]
fn treap_duplicates_collapse() {
    let mut tree: Treap<i32> = vec![7, 7, 7, 3].into_iter().collect();
    tree.assert_correctness();
    assert_eq!(tree.to_vec(), vec![(3, 1), (7, 3)]);
    tree.delete(7);
    assert_eq!(tree.to_vec(), vec![(3, 1), (7, 2)]);
    assert_eq!(tree.size(), 3);
    tree.clear();
    assert!(tree.is_empty());
    assert_eq!(tree.priority(), None);
}

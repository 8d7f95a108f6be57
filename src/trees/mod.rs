//! This module contains the balanced search tree engines, and the trait
//! that gives all of them the same interface.

pub mod basic_tree;
pub mod fhq_treap;
pub mod splay;
pub mod treap;

use crate::data::Key;
use crate::error::TreeError;

/// An ordered multiset supporting order statistics.
///
/// Duplicated keys are counted: inserting the same key twice stores it once,
/// with a count of `2`, and `size` counts it twice.
///
/// Some engines restructure the tree on queries (splay trees splay, and the
/// merge/split treap splits and merges back), so all queries except
/// [`OrderStatisticTree::contains`] take `&mut self`.
pub trait OrderStatisticTree<K: Key> {
    /// Creates an empty tree.
    fn new() -> Self;

    /// Inserts one occurrence of `key`.
    fn insert(&mut self, key: K);

    /// Deletes one occurrence of `key`. Does nothing if `key` is absent.
    fn delete(&mut self, key: K);

    /// Returns true if at least one occurrence of `key` is stored.
    fn contains(&self, key: K) -> bool;

    /// Returns the 1-based position that `key` has, or would have if it was inserted,
    /// in the sorted sequence of all stored occurrences.
    /// That is, one plus the number of stored occurrences strictly smaller than `key`.
    fn rank(&mut self, key: K) -> u32;

    /// Returns the `k`-th smallest stored occurrence, 1-based.
    /// Fails with [`TreeError::OutOfRange`] if `k` is `0` or bigger than the size.
    fn kth(&mut self, k: u32) -> Result<K, TreeError>;

    /// Returns the biggest stored key strictly smaller than `key`.
    fn prev(&mut self, key: K) -> Result<K, TreeError>;

    /// Returns the smallest stored key strictly bigger than `key`.
    fn next(&mut self, key: K) -> Result<K, TreeError>;

    /// The number of stored occurrences, duplicates included.
    fn size(&self) -> u32;

    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Removes everything.
    fn clear(&mut self);

    /// Returns the distinct keys in increasing order, each with its count.
    fn to_vec(&self) -> Vec<(K, u32)>;

    /// Checks that invariants remain correct: every node's size
    /// is its count plus its children's sizes, the keys are strictly increasing
    /// in order, and whatever the engine itself balances by.
    /// If any of them is violated, panics.
    fn assert_correctness(&self);
}

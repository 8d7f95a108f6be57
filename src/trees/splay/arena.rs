//! Storage for the nodes of a splay tree.
//!
//! Nodes point both down to their sons and up to their parent, so they can't own each other.
//! Instead, the arena owns all of them, and links between nodes are plain [`NodeId`] handles.

use slab::Slab;
use std::ops::{Index, IndexMut};

/// A handle of a node in an [`Arena`]. Stays valid until the node is removed.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct NodeId(usize);

pub struct SplayNode<K> {
    pub(super) key: K,
    /// How many occurrences of `key` this node stands for. Always at least `1`.
    pub(super) count: u32,
    /// `count` plus the sizes of both subtrees.
    pub(super) size: u32,
    pub(super) left: Option<NodeId>,
    pub(super) right: Option<NodeId>,
    /// [`None`] for the root.
    pub(super) parent: Option<NodeId>,
}

impl<K> SplayNode<K> {
    pub fn new(key: K) -> Self {
        SplayNode {
            key,
            count: 1,
            size: 1,
            left: None,
            right: None,
            parent: None,
        }
    }
}

/// Owns the nodes of one tree. Removed slots are recycled by later insertions.
pub struct Arena<K> {
    slab: Slab<SplayNode<K>>,
}

impl<K> Arena<K> {
    pub fn new() -> Self {
        Arena { slab: Slab::new() }
    }

    pub fn insert(&mut self, node: SplayNode<K>) -> NodeId {
        NodeId(self.slab.insert(node))
    }

    /// Removes the node. Panics if it was already removed.
    pub fn remove(&mut self, id: NodeId) -> SplayNode<K> {
        self.slab.remove(id.0)
    }

    /// Removes all the nodes at once.
    pub fn clear(&mut self) {
        self.slab.clear();
    }

    /// The number of live nodes.
    pub fn len(&self) -> usize {
        self.slab.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slab.is_empty()
    }
}

impl<K> Index<NodeId> for Arena<K> {
    type Output = SplayNode<K>;
    fn index(&self, id: NodeId) -> &SplayNode<K> {
        &self.slab[id.0]
    }
}

impl<K> IndexMut<NodeId> for Arena<K> {
    fn index_mut(&mut self, id: NodeId) -> &mut SplayNode<K> {
        &mut self.slab[id.0]
    }
}

#[test]
#[should_panic]
fn removing_twice_panics() {
    let mut arena = Arena::new();
    let id = arena.insert(SplayNode::new(1));
    arena.remove(id);
    arena.remove(id);
}

#[test]
#[should_panic]
fn removed_handles_are_dead() {
    let mut arena = Arena::new();
    let id = arena.insert(SplayNode::new(1));
    arena.insert(SplayNode::new(2));
    arena.remove(id);
    let _ = arena[id].key;
}

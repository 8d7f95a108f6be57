use super::*;

/// Pending subtrees of a tree being dropped. Each step unlinks one node from its sons,
/// so no node is ever dropped while still owning a deep subtree.
struct IterativeDeallocator<K> {
    stack: Vec<Box<BasicNode<K>>>,
}

impl<K> IterativeDeallocator<K> {
    fn step(&mut self) -> Option<()> {
        let mut node = self.stack.pop()?;
        self.push(node.left.take());
        self.push(node.right.take());
        Some(())
    }

    fn push(&mut self, tree: BasicTree<K>) {
        if let Some(node) = tree.into_node_boxed() {
            self.stack.push(node);
        }
    }
}

/// Empties `tree`, freeing its nodes without recursion.
pub fn deallocate_iteratively<K>(tree: &mut BasicTree<K>) {
    let my_tree = tree.take();
    let mut deallocator = IterativeDeallocator { stack: vec![] };
    deallocator.push(my_tree);
    while let Some(()) = deallocator.step() {}
}

#[test]
fn deallocate_long_chain() {
    // a chain this long would overflow the stack if dropped recursively
    let mut tree = BasicTree::Empty;
    for key in 0..1_000_000u32 {
        let mut node = BasicNode::new(key, 0);
        node.left = tree;
        node.rebuild();
        tree = BasicTree::from_node(node);
    }
    assert_eq!(tree.size(), 1_000_000);
    deallocate_iteratively(&mut tree);
    assert!(tree.is_empty());
}

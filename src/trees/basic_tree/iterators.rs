use super::*;

/// In-order iterator over a [`BasicTree`].
/// Yields every distinct key once, together with its count.
pub struct Iter<'a, K> {
    // nodes whose left subtree was already pushed, but which weren't yielded yet
    stack: Vec<&'a BasicNode<K>>,
}

impl<'a, K> Iter<'a, K> {
    pub fn new(tree: &'a BasicTree<K>) -> Self {
        let mut res = Iter { stack: vec![] };
        res.push_left_spine(tree);
        res
    }

    fn push_left_spine(&mut self, mut tree: &'a BasicTree<K>) {
        while let Some(node) = tree.node() {
            self.stack.push(node);
            tree = &node.left;
        }
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = (&'a K, u32);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(&node.right);
        Some((&node.key, node.count))
    }
}

#[cfg(test)]
fn insert_unbalanced(tree: &mut BasicTree<i32>, key: i32) {
    if tree.is_empty() {
        let mut node = BasicNode::new(key, 0);
        node.count = 2;
        node.rebuild();
        *tree = BasicTree::from_node(node);
        return;
    }
    let node = tree.node_mut().unwrap();
    if key < node.key {
        insert_unbalanced(&mut node.left, key);
    } else {
        insert_unbalanced(&mut node.right, key);
    }
    node.rebuild();
}

#[test]
fn iterates_in_order() {
    let mut tree = BasicTree::Empty;
    for key in [5, 3, 8, 1].iter() {
        insert_unbalanced(&mut tree, *key);
    }
    assert_eq!(tree.size(), 8);
    let res: Vec<_> = tree.iter().map(|(k, c)| (*k, c)).collect();
    assert_eq!(res, vec![(1, 2), (3, 2), (5, 2), (8, 2)]);
    assert!(BasicTree::<i32>::Empty.iter().next().is_none());
}

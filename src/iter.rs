//! Lazy sorted iteration.

use std::iter::FusedIterator;

use crate::node::Node;

/// An iterator over the keys of a [`Tree`][crate::Tree] in ascending order.
///
/// Holds the path of nodes whose key is still to be yielded, so it never recurses and uses
/// `O(height)` memory.
#[derive(Clone, Debug)]
pub struct Iter<'a, K> {
    stack: Vec<&'a Node<K>>,
    remaining: usize,
}

impl<'a, K> Iter<'a, K> {
    pub(crate) fn new(root: Option<&'a Node<K>>, len: usize) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            remaining: len,
        };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut node: Option<&'a Node<K>>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left();
        }
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right());
        self.remaining = self.remaining.saturating_sub(1);
        Some(node.key())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {}

impl<K> FusedIterator for Iter<'_, K> {}

#[cfg(test)]
mod tests {
    use crate::Tree;

    #[test]
    fn empty() {
        let tree: Tree<i32> = Tree::new();
        assert_eq!(tree.iter().next(), None);
        assert_eq!(tree.iter().len(), 0);
    }

    #[test]
    fn yields_sorted_keys() {
        let tree: Tree<_> = [10, 5, 15, 3, 7, 12, 20].into_iter().collect();

        let mut iter = tree.iter();
        assert_eq!(iter.len(), 7);
        assert_eq!(iter.next(), Some(&3));
        assert_eq!(iter.len(), 6);
        assert_eq!(iter.collect::<Vec<_>>(), vec![&5, &7, &10, &12, &15, &20]);
    }

    #[test]
    fn matches_in_order_traversal() {
        let tree: Tree<_> = [8, 1, 9, 4, 2, 7, 3, 3].into_iter().collect();

        assert_eq!(tree.iter().collect::<Vec<_>>(), tree.dfs_in_order());
    }

    #[test]
    fn deep_degenerate_tree() {
        let tree: Tree<_> = (0..10_000).collect();

        assert!(tree.iter().copied().eq(0..10_000));
    }
}

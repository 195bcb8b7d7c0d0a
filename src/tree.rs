//! An unbalanced, owning BST of keys. Nodes are `Box`ed and owned by their parent, so the tree is a
//! strict ownership hierarchy: the tree owns the root and each node owns its children.
//!
//! # Examples
//!
//! ```
//! use bstree::Tree;
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert!(tree.find(&1).is_none());
//!
//! tree.insert(2).insert(1).insert(3);
//! assert_eq!(tree.find(&1).map(|n| *n.key()), Some(1));
//! assert_eq!(tree.dfs_in_order(), vec![&1, &2, &3]);
//!
//! // Removing a key hands it back.
//! assert_eq!(tree.remove(&2), Some(2));
//! assert_eq!(tree.remove(&2), None);
//! assert_eq!(tree.dfs_in_order(), vec![&1, &3]);
//! ```

use std::cmp::Ordering;
use std::collections::VecDeque;
use std::fmt;

use tracing::{debug, instrument, trace};

use crate::error::InvariantError;
use crate::iter::Iter;
use crate::node::{clone_subtree, Link, Node};
use crate::promotion::Promotion;

/// A Binary Search Tree. Keys may be inserted, found, traversed, and removed. It does not balance
/// itself, so operations are `O(height)`.
pub struct Tree<K> {
    root: Link<K>,
    len: usize,
    promotion: Promotion,
}

impl<K> Default for Tree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Drop for Tree<K> {
    fn drop(&mut self) {
        dismantle(self.root.take());
    }
}

impl<K: Clone> Clone for Tree<K> {
    fn clone(&self) -> Self {
        Self {
            root: clone_subtree(&self.root),
            len: self.len,
            promotion: self.promotion,
        }
    }
}

/// Prints the keys in sorted order rather than the node structure, which would recurse once per
/// level.
impl<K: fmt::Debug> fmt::Debug for Tree<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("len", &self.len)
            .field("promotion", &self.promotion)
            .field("keys", &self.iter().collect::<Vec<_>>())
            .finish()
    }
}

impl<K> Tree<K> {
    /// Generate a new, empty `Tree` that promotes predecessors on removal.
    pub fn new() -> Self {
        Self::with_promotion(Promotion::default())
    }

    /// Generate a new, empty `Tree` that fills the slot of removed nodes according to `promotion`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::{Promotion, Tree};
    ///
    /// let mut tree = Tree::with_promotion(Promotion::Successor);
    /// tree.extend([2, 1, 3]);
    /// tree.remove(&2);
    ///
    /// assert_eq!(tree.root().map(|n| *n.key()), Some(3));
    /// ```
    pub fn with_promotion(promotion: Promotion) -> Self {
        Self {
            root: None,
            len: 0,
            promotion,
        }
    }

    /// The removal policy this tree was built with.
    pub fn promotion(&self) -> Promotion {
        self.promotion
    }

    /// The root node, or `None` for an empty tree.
    pub fn root(&self) -> Option<&Node<K>> {
        self.root.as_deref()
    }

    /// How many keys are stored, counting duplicates.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no keys.
    pub fn is_empty(&self) -> bool {
        debug_assert!(self.len != 0 || self.root.is_none());
        self.len == 0
    }

    /// Number of levels in the tree. An empty tree has height 0 and a lone root has height 1.
    pub fn height(&self) -> usize {
        let mut level: Vec<&Node<K>> = self.root().into_iter().collect();
        let mut height = 0;
        while !level.is_empty() {
            height += 1;
            level = level
                .iter()
                .flat_map(|node| node.left().into_iter().chain(node.right()))
                .collect();
        }
        height
    }

    /// Removes every key.
    #[instrument(level = "debug", skip_all, fields(len = self.len))]
    pub fn clear(&mut self) {
        dismantle(self.root.take());
        self.len = 0;
    }

    /// Inserts `key`, walking down from the root to the first empty slot on its search path. Keys
    /// equal to an existing key are routed right, so duplicates are kept. Returns the tree so calls
    /// can be chained.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(10).insert(5).insert(15);
    ///
    /// assert_eq!(tree.dfs_pre_order(), vec![&10, &5, &15]);
    /// ```
    #[instrument(level = "trace", skip_all)]
    pub fn insert(&mut self, key: K) -> &mut Self
    where
        K: Ord,
    {
        let mut slot = &mut self.root;
        while let Some(node) = slot {
            slot = match key.cmp(&node.key) {
                Ordering::Less => &mut node.left,
                Ordering::Equal | Ordering::Greater => &mut node.right,
            };
        }
        *slot = Some(Node::new_boxed(key));
        self.len += 1;
        self
    }

    /// Same as [`insert`][Self::insert] but descends by recursing through [`Node::insert`].
    pub fn insert_recursive(&mut self, key: K) -> &mut Self
    where
        K: Ord,
    {
        if let Some(root) = self.root.as_mut() {
            root.insert(key);
        } else {
            self.root = Some(Node::new_boxed(key));
        }
        self.len += 1;
        self
    }

    /// Potentially finds the node holding the given key. If no node has the key, `None` is
    /// returned. With duplicates, the shallowest match wins.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::Tree;
    ///
    /// let tree: Tree<_> = [10, 5, 15].into_iter().collect();
    ///
    /// assert_eq!(tree.find(&5).map(|n| *n.key()), Some(5));
    /// assert!(tree.find(&42).is_none());
    /// ```
    pub fn find(&self, key: &K) -> Option<&Node<K>>
    where
        K: Ord,
    {
        let mut cursor = self.root();
        while let Some(node) = cursor {
            match key.cmp(&node.key) {
                Ordering::Less => cursor = node.left(),
                Ordering::Equal => return Some(node),
                Ordering::Greater => cursor = node.right(),
            }
        }
        None
    }

    /// Same as [`find`][Self::find] but descends by recursing through [`Node::find`].
    pub fn find_recursive(&self, key: &K) -> Option<&Node<K>>
    where
        K: Ord,
    {
        self.root()?.find(key)
    }

    /// Finds the node holding `key` along with its parent. The parent is `None` when the match is
    /// the root.
    pub fn find_with_parent(&self, key: &K) -> Option<(&Node<K>, Option<&Node<K>>)>
    where
        K: Ord,
    {
        self.root()?.find_with_parent(key, None)
    }

    /// Whether some node holds `key`.
    pub fn contains(&self, key: &K) -> bool
    where
        K: Ord,
    {
        self.find(key).is_some()
    }

    /// The node with the smallest key.
    pub fn min(&self) -> Option<&Node<K>> {
        self.root().map(Node::min)
    }

    /// The node with the largest key.
    pub fn max(&self) -> Option<&Node<K>> {
        self.root().map(Node::max)
    }

    /// Finds the node holding the next larger key after `key`. Copies of `key` itself are
    /// skipped, so with duplicates this is still a strictly larger key.
    ///
    /// Returns `None` if `key` is the largest key or isn't in the tree at all.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::Tree;
    ///
    /// let tree: Tree<_> = [10, 5, 15, 3, 7, 5].into_iter().collect();
    ///
    /// assert_eq!(tree.find_successor(&5).map(|n| *n.key()), Some(7));
    /// assert_eq!(tree.find_successor(&7).map(|n| *n.key()), Some(10));
    /// assert!(tree.find_successor(&15).is_none());
    /// ```
    pub fn find_successor(&self, key: &K) -> Option<&Node<K>>
    where
        K: Ord,
    {
        // The last node we turned left at is the smallest key seen that is larger than `key`.
        let mut cursor = self.root();
        let mut successor = None;
        let mut found = false;
        while let Some(node) = cursor {
            if *key < node.key {
                successor = Some(node);
                cursor = node.left();
            } else {
                found |= *key == node.key;
                cursor = node.right();
            }
        }
        successor.filter(|_| found)
    }

    /// Finds the node holding the next smaller key before `key`. The mirror image of
    /// [`find_successor`][Self::find_successor].
    pub fn find_predecessor(&self, key: &K) -> Option<&Node<K>>
    where
        K: Ord,
    {
        let mut cursor = self.root();
        let mut predecessor = None;
        let mut found = false;
        while let Some(node) = cursor {
            if node.key < *key {
                predecessor = Some(node);
                cursor = node.right();
            } else {
                found |= *key == node.key;
                cursor = node.left();
            }
        }
        predecessor.filter(|_| found)
    }

    /// Keys visited root, then left subtree, then right subtree.
    pub fn dfs_pre_order(&self) -> Vec<&K> {
        self.root().map_or_else(Vec::new, Node::dfs_pre_order)
    }

    /// Keys visited left subtree, then root, then right subtree. This is sorted.
    ///
    /// Like the other `dfs_*` orders this recurses once per level; for very deep trees use
    /// [`iter`][Self::iter], which keeps its own stack.
    pub fn dfs_in_order(&self) -> Vec<&K> {
        self.root().map_or_else(Vec::new, Node::dfs_in_order)
    }

    /// Keys visited left subtree, then right subtree, then root.
    pub fn dfs_post_order(&self) -> Vec<&K> {
        self.root().map_or_else(Vec::new, Node::dfs_post_order)
    }

    /// Keys visited level by level from the root, left to right within a level.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::Tree;
    ///
    /// let tree: Tree<_> = [10, 5, 15, 3, 7, 12, 20].into_iter().collect();
    ///
    /// assert_eq!(tree.bfs(), vec![&10, &5, &15, &3, &7, &12, &20]);
    /// ```
    pub fn bfs(&self) -> Vec<&K> {
        let mut keys = Vec::with_capacity(self.len);
        let mut queue: VecDeque<&Node<K>> = self.root().into_iter().collect();
        while let Some(node) = queue.pop_front() {
            keys.push(node.key());
            queue.extend(node.left());
            queue.extend(node.right());
        }
        keys
    }

    /// A lazy iterator over the keys in sorted order.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter::new(self.root(), self.len)
    }

    /// Removes the node holding `key` from the tree and returns its key. If the tree does not
    /// contain the key, nothing changes and `None` is returned.
    ///
    /// A removed leaf just leaves an empty slot and a node with one child is replaced by that
    /// child. A node with two children is replaced by a neighbour in sorted order (which one
    /// depends on the tree's [`Promotion`]). The neighbour is first spliced out of its own subtree,
    /// its single child taking its old place, and then adopts both of the removed node's subtrees:
    ///
    /// ```text
    ///        target                pred
    ///       /      \              /    \
    ///      a        z            a      z
    ///       \          remove ->  \
    ///       pred                   x
    ///       /
    ///      x
    /// ```
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::Tree;
    ///
    /// let mut tree: Tree<_> = [10, 5, 15, 3, 7, 12, 20].into_iter().collect();
    ///
    /// assert_eq!(tree.remove(&10), Some(10));
    /// assert_eq!(tree.dfs_in_order(), vec![&3, &5, &7, &12, &15, &20]);
    /// assert_eq!(tree.root().map(|n| *n.key()), Some(7));
    /// ```
    #[instrument(level = "debug", skip_all, fields(len = self.len))]
    pub fn remove(&mut self, key: &K) -> Option<K>
    where
        K: Ord,
    {
        let promotion = self.promotion;
        let slot = slot_of(&mut self.root, key);
        let Some(mut target) = slot.take() else {
            debug!("key not found");
            return None;
        };
        *slot = replacement(&mut target, promotion);
        self.len -= 1;
        Some(target.key)
    }

    /// Checks the ordering of every node against the bounds set by its ancestors and that
    /// [`len`][Self::len] matches the number of reachable nodes.
    ///
    /// # Errors
    ///
    /// The first [`InvariantError`] found.
    pub fn validate(&self) -> Result<(), InvariantError>
    where
        K: Ord,
    {
        // Lower bounds are inclusive (duplicates go right), upper bounds exclusive.
        let mut stack: Vec<(&Node<K>, Option<&K>, Option<&K>, usize)> =
            self.root().map(|root| (root, None, None, 0)).into_iter().collect();
        let mut reachable = 0;

        while let Some((node, lower, upper, depth)) = stack.pop() {
            reachable += 1;
            if lower.is_some_and(|lower| node.key < *lower)
                || upper.is_some_and(|upper| node.key >= *upper)
            {
                return Err(InvariantError::OutOfOrder { depth });
            }
            if let Some(left) = node.left() {
                stack.push((left, lower, Some(&node.key), depth + 1));
            }
            if let Some(right) = node.right() {
                stack.push((right, Some(&node.key), upper, depth + 1));
            }
        }

        if reachable == self.len {
            Ok(())
        } else {
            Err(InvariantError::LengthMismatch {
                reported: self.len,
                reachable,
            })
        }
    }
}

/// Walks down from `slot` to the slot owning the shallowest node holding `key`, or to the empty
/// slot where it would be inserted.
fn slot_of<'a, K>(mut slot: &'a mut Link<K>, key: &K) -> &'a mut Link<K>
where
    K: Ord,
{
    loop {
        let ordering = slot.as_deref().map(|node| key.cmp(&node.key));
        slot = match (ordering, slot) {
            (Some(Ordering::Less), Some(node)) => &mut node.left,
            (Some(Ordering::Greater), Some(node)) => &mut node.right,
            (_, slot) => return slot,
        };
    }
}

/// Detaches `target`'s children and builds the subtree that takes its place.
fn replacement<K>(target: &mut Node<K>, promotion: Promotion) -> Link<K>
where
    K: Ord,
{
    let (mut left, mut right) = match (target.left.take(), target.right.take()) {
        (None, None) => {
            trace!("removing leaf");
            return None;
        }
        (Some(child), None) | (None, Some(child)) => {
            trace!("lifting only child");
            return Some(child);
        }
        (left, right) => (left, right),
    };

    // A duplicated predecessor can't be promoted: its copies would end up on its left.
    let promote_predecessor = match promotion {
        Promotion::Predecessor => left.as_deref().is_some_and(has_unique_max),
        Promotion::Successor => false,
    };
    let mut promoted = if promote_predecessor {
        trace!("promoting in-order predecessor");
        take_max(&mut left)?
    } else {
        trace!("promoting in-order successor");
        take_min(&mut right)?
    };

    promoted.left = left;
    promoted.right = right;
    Some(promoted)
}

/// Whether the largest key under `node` appears once. Copies of a key always hang off the right
/// of the shallowest copy, so a duplicated maximum shows up as an equal parent of the rightmost
/// node.
fn has_unique_max<K>(node: &Node<K>) -> bool
where
    K: Ord,
{
    let mut parent = None;
    let mut node = node;
    while let Some(right) = node.right() {
        parent = Some(node);
        node = right;
    }
    !parent.is_some_and(|parent| parent.key == node.key)
}

/// Detaches the rightmost node under `slot`, moving its left child into the slot it vacates.
fn take_max<K>(mut slot: &mut Link<K>) -> Link<K> {
    while slot.as_ref().is_some_and(|node| node.right.is_some()) {
        slot = &mut slot.as_mut()?.right;
    }
    let mut max = slot.take()?;
    *slot = max.left.take();
    Some(max)
}

/// Detaches the leftmost node under `slot`, moving its right child into the slot it vacates.
fn take_min<K>(mut slot: &mut Link<K>) -> Link<K> {
    while slot.as_ref().is_some_and(|node| node.left.is_some()) {
        slot = &mut slot.as_mut()?.left;
    }
    let mut min = slot.take()?;
    *slot = min.right.take();
    Some(min)
}

/// Drops a subtree one node at a time so a degenerate tree doesn't recurse once per level.
fn dismantle<K>(root: Link<K>) {
    let mut stack: Vec<Box<Node<K>>> = root.into_iter().collect();
    while let Some(mut node) = stack.pop() {
        stack.extend(node.left.take());
        stack.extend(node.right.take());
    }
}

impl<K: Ord> FromIterator<K> for Tree<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K: Ord> Extend<K> for Tree<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<'a, K> IntoIterator for &'a Tree<K> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}


#[cfg(test)]
mod quicktests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::test::quick::Op;

    /// Applies a set of operations to a tree and a counting map standing in for a multiset.
    /// After every operation the tree must be valid and agree with the model.
    fn do_ops<K>(ops: &[Op<K>], bst: &mut Tree<K>, model: &mut BTreeMap<K, usize>)
    where
        K: Ord + Clone + std::fmt::Debug,
    {
        for op in ops {
            match op {
                Op::Insert(k) => {
                    bst.insert(k.clone());
                    *model.entry(k.clone()).or_default() += 1;
                }
                Op::Remove(k) => {
                    let expected = match model.get_mut(k) {
                        Some(count) => {
                            *count -= 1;
                            if *count == 0 {
                                model.remove(k);
                            }
                            Some(k.clone())
                        }
                        None => None,
                    };
                    assert_eq!(bst.remove(k), expected);
                }
                Op::Iter => {
                    let expected: Vec<&K> = model
                        .iter()
                        .flat_map(|(k, n)| std::iter::repeat(k).take(*n))
                        .collect();
                    assert_eq!(bst.dfs_in_order(), expected);
                    assert!(bst.iter().eq(expected));
                }
            }
            assert_eq!(bst.validate(), Ok(()));
        }
    }

    quickcheck::quickcheck! {
        fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
            let mut tree = Tree::new();
            let mut model = BTreeMap::new();

            do_ops(&ops, &mut tree, &mut model);
            model.keys().all(|key| tree.find(key).map(Node::key) == Some(key))
                && tree.len() == model.values().sum::<usize>()
        }
    }

    quickcheck::quickcheck! {
        fn fuzz_multiple_operations_promoting_successor(ops: Vec<Op<i8>>) -> bool {
            let mut tree = Tree::with_promotion(Promotion::Successor);
            let mut model = BTreeMap::new();

            do_ops(&ops, &mut tree, &mut model);
            model.keys().all(|key| tree.find(key).map(Node::key) == Some(key))
        }
    }

    quickcheck::quickcheck! {
        fn successor_matches_sorted_order(xs: Vec<i16>) -> bool {
            let tree: Tree<_> = xs.iter().copied().collect();
            let mut sorted = xs;
            sorted.sort_unstable();
            sorted.dedup();

            sorted.windows(2).all(|w| {
                tree.find_successor(&w[0]).map(Node::key) == Some(&w[1])
                    && tree.find_predecessor(&w[1]).map(Node::key) == Some(&w[0])
            })
        }
    }
}

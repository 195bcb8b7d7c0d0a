//! The vertex of a [`Tree`][crate::Tree]. Every operation here is scoped to the subtree rooted at
//! the `Node` it is called on.
//!
//! # Examples
//!
//! ```
//! use bstree::Node;
//!
//! let mut node = Node::new(10);
//! node.insert(5);
//! node.insert(15);
//!
//! assert_eq!(node.find(&5).map(Node::key), Some(&5));
//! assert_eq!(node.dfs_pre_order(), vec![&10, &5, &15]);
//! ```

use std::cmp::Ordering;
use std::fmt;

/// An owning pointer to a subtree. `None` is an empty slot.
pub(crate) type Link<K> = Option<Box<Node<K>>>;

/// A `Node` holds a key and owns up to two children. All keys in the left subtree are less than
/// `key` and all keys in the right subtree are not less than `key`.
pub struct Node<K> {
    pub(crate) key: K,
    pub(crate) left: Link<K>,
    pub(crate) right: Link<K>,
}

impl<K: Clone> Clone for Node<K> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            left: clone_subtree(&self.left),
            right: clone_subtree(&self.right),
        }
    }
}

/// Only the keys of the direct children are printed, so formatting never walks the subtree.
impl<K: fmt::Debug> fmt::Debug for Node<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("key", &self.key)
            .field("left", &self.left().map(Self::key))
            .field("right", &self.right().map(Self::key))
            .finish()
    }
}

/// Deep-copies a subtree without recursing. Nodes are rebuilt in post-order, so when a node is
/// reached its right and then left copies sit on top of `built`.
pub(crate) fn clone_subtree<K: Clone>(root: &Link<K>) -> Link<K> {
    // Reversing a (self, right, left) walk yields (left, right, self).
    let mut pending: Vec<&Node<K>> = root.as_deref().into_iter().collect();
    let mut walked = Vec::new();
    while let Some(node) = pending.pop() {
        walked.push(node);
        pending.extend(node.left());
        pending.extend(node.right());
    }

    let mut built: Vec<Box<Node<K>>> = Vec::with_capacity(walked.len());
    for node in walked.into_iter().rev() {
        let right = if node.right.is_some() { built.pop() } else { None };
        let left = if node.left.is_some() { built.pop() } else { None };
        built.push(Box::new(Node {
            key: node.key.clone(),
            left,
            right,
        }));
    }
    built.pop()
}

impl<K> Node<K> {
    /// Construct a new `Node` with the given `key` and no children.
    pub fn new(key: K) -> Self {
        Self {
            key,
            left: None,
            right: None,
        }
    }

    pub(crate) fn new_boxed(key: K) -> Box<Self> {
        Box::new(Self::new(key))
    }

    /// The key stored in this node.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// The left child, if any.
    pub fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    /// The right child, if any.
    pub fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    /// Whether this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Searches this subtree for a node with the given key. If several nodes share the key, the
    /// shallowest one is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::Node;
    ///
    /// let mut node = Node::new(2);
    /// node.insert(1);
    ///
    /// assert_eq!(node.find(&1).map(Node::key), Some(&1));
    /// assert!(node.find(&3).is_none());
    /// ```
    pub fn find(&self, key: &K) -> Option<&Self>
    where
        K: Ord,
    {
        match key.cmp(&self.key) {
            Ordering::Less => self.left()?.find(key),
            Ordering::Equal => Some(self),
            Ordering::Greater => self.right()?.find(key),
        }
    }

    /// Like [`find`][Self::find] but also returns the parent of the found node. `parent` is what
    /// gets reported when `self` is the match, so callers starting at a root pass `None`.
    ///
    /// The parent is a plain borrow used for navigation only; it never owns anything.
    pub fn find_with_parent<'a>(
        &'a self,
        key: &K,
        parent: Option<&'a Self>,
    ) -> Option<(&'a Self, Option<&'a Self>)>
    where
        K: Ord,
    {
        match key.cmp(&self.key) {
            Ordering::Less => self.left()?.find_with_parent(key, Some(self)),
            Ordering::Equal => Some((self, parent)),
            Ordering::Greater => self.right()?.find_with_parent(key, Some(self)),
        }
    }

    /// Inserts a new node holding `key` into the first empty slot on its search path and returns
    /// it. Keys equal to an existing key are routed right.
    pub fn insert(&mut self, key: K) -> &Self
    where
        K: Ord,
    {
        let slot = match key.cmp(&self.key) {
            Ordering::Less => &mut self.left,
            Ordering::Equal | Ordering::Greater => &mut self.right,
        };
        match slot {
            Some(child) => child.insert(key),
            None => &**slot.insert(Self::new_boxed(key)),
        }
    }

    /// The node holding the smallest key in this subtree.
    pub fn min(&self) -> &Self {
        let mut node = self;
        while let Some(left) = node.left() {
            node = left;
        }
        node
    }

    /// The node holding the largest key in this subtree.
    pub fn max(&self) -> &Self {
        let mut node = self;
        while let Some(right) = node.right() {
            node = right;
        }
        node
    }

    /// Keys of this subtree visited self, then left, then right.
    pub fn dfs_pre_order(&self) -> Vec<&K> {
        let mut keys = Vec::new();
        self.pre_order_into(&mut keys);
        keys
    }

    /// Keys of this subtree visited left, then self, then right. For a valid tree this is sorted.
    pub fn dfs_in_order(&self) -> Vec<&K> {
        let mut keys = Vec::new();
        self.in_order_into(&mut keys);
        keys
    }

    /// Keys of this subtree visited left, then right, then self.
    pub fn dfs_post_order(&self) -> Vec<&K> {
        let mut keys = Vec::new();
        self.post_order_into(&mut keys);
        keys
    }

    fn pre_order_into<'a>(&'a self, keys: &mut Vec<&'a K>) {
        keys.push(&self.key);
        if let Some(left) = self.left() {
            left.pre_order_into(keys);
        }
        if let Some(right) = self.right() {
            right.pre_order_into(keys);
        }
    }

    fn in_order_into<'a>(&'a self, keys: &mut Vec<&'a K>) {
        if let Some(left) = self.left() {
            left.in_order_into(keys);
        }
        keys.push(&self.key);
        if let Some(right) = self.right() {
            right.in_order_into(keys);
        }
    }

    fn post_order_into<'a>(&'a self, keys: &mut Vec<&'a K>) {
        if let Some(left) = self.left() {
            left.post_order_into(keys);
        }
        if let Some(right) = self.right() {
            right.post_order_into(keys);
        }
        keys.push(&self.key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Node<i32> {
        let mut node = Node::new(10);
        for key in [5, 15, 3, 7, 12, 20] {
            node.insert(key);
        }
        node
    }

    #[test]
    fn insert_returns_new_leaf() {
        let mut node = Node::new(10);

        let inserted = node.insert(5);
        assert_eq!(inserted.key(), &5);
        assert!(inserted.is_leaf());

        let inserted = node.insert(7);
        assert_eq!(inserted.key(), &7);
        assert_eq!(node.left().and_then(Node::right).map(Node::key), Some(&7));
    }

    #[test]
    fn insert_routes_duplicates_right() {
        let mut node = Node::new(1);
        node.insert(1);

        assert!(node.left().is_none());
        assert_eq!(node.right().map(Node::key), Some(&1));
    }

    #[test]
    fn find_hits_and_misses() {
        let node = sample();

        assert_eq!(node.find(&12).map(Node::key), Some(&12));
        assert_eq!(node.find(&10).map(Node::key), Some(&10));
        assert!(node.find(&99).is_none());
        assert!(node.find(&-1).is_none());
    }

    #[test]
    fn find_with_parent_reports_parent() {
        let node = sample();

        let (found, parent) = node.find_with_parent(&7, None).unwrap();
        assert_eq!(found.key(), &7);
        assert_eq!(parent.map(Node::key), Some(&5));

        let (found, parent) = node.find_with_parent(&10, None).unwrap();
        assert_eq!(found.key(), &10);
        assert!(parent.is_none());

        assert!(node.find_with_parent(&8, None).is_none());
    }

    #[test]
    fn traversals() {
        let node = sample();

        assert_eq!(node.dfs_pre_order(), vec![&10, &5, &3, &7, &15, &12, &20]);
        assert_eq!(node.dfs_in_order(), vec![&3, &5, &7, &10, &12, &15, &20]);
        assert_eq!(node.dfs_post_order(), vec![&3, &7, &5, &12, &20, &15, &10]);
    }

    #[test]
    fn traversals_are_restartable() {
        let node = sample();

        assert_eq!(node.dfs_in_order(), node.dfs_in_order());
        assert_eq!(node.dfs_pre_order().len(), 7);
    }

    #[test]
    fn clone_keeps_shape() {
        let node = sample();
        let cloned = node.clone();

        assert_eq!(cloned.dfs_pre_order(), node.dfs_pre_order());
        assert_eq!(cloned.dfs_post_order(), node.dfs_post_order());
    }

    #[test]
    fn debug_shows_only_child_keys() {
        let node = sample();

        assert_eq!(
            format!("{:?}", node),
            "Node { key: 10, left: Some(5), right: Some(15) }"
        );
    }

    #[test]
    fn min_and_max() {
        let node = sample();

        assert_eq!(node.min().key(), &3);
        assert_eq!(node.max().key(), &20);
        assert_eq!(Node::new('a').min().key(), &'a');
    }
}

//! A Binary Search Tree (BST) of keys supporting ordered insertion, lookup, traversal, and
//! deletion.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to insert, find, and delete
//! stored keys. BSTs are defined recursively using the notion of a [`Node`]. A `Node` stores a key
//! and may have up to two child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a key less than its own
//!    key.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a key greater than its
//!    own key.
//!
//! > This crate keeps duplicate keys. They are always routed right, so the second invariant
//! > reads "not less than" for them.
//!
//! Searching for keys in the tree takes `O(height)` (where `height` is defined as the longest path
//! from the root `Node` to a leaf `Node`). The [`Tree`] here does not balance itself, so inserting
//! keys in sorted order degrades it into a linked list. BSTs also naturally support sorted
//! iteration by visiting the left subtree, then the subtree root, then the right subtree.
//!
//! # Examples
//!
//! ```
//! use bstree::Tree;
//!
//! let mut tree: Tree<_> = [10, 5, 15, 3, 7, 12, 20].into_iter().collect();
//!
//! assert_eq!(tree.dfs_in_order(), vec![&3, &5, &7, &10, &12, &15, &20]);
//! assert_eq!(tree.bfs(), vec![&10, &5, &15, &3, &7, &12, &20]);
//!
//! assert_eq!(tree.remove(&10), Some(10));
//! assert_eq!(tree.dfs_in_order(), vec![&3, &5, &7, &12, &15, &20]);
//! assert!(tree.validate().is_ok());
//! ```
//!
//! ## Concurrency
//!
//! Nothing here synchronizes. Mutation takes `&mut self`, so sharing a `Tree` across threads
//! requires wrapping the whole tree in a lock.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

mod error;
mod iter;
mod node;
mod promotion;
mod tree;

#[cfg(test)]
mod test;

pub use error::InvariantError;
pub use iter::Iter;
pub use node::Node;
pub use promotion::Promotion;
pub use tree::Tree;

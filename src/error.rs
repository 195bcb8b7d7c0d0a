//! Errors reported when checking a tree's structure.

use thiserror::Error;

/// A structural problem found by [`Tree::validate`][crate::Tree::validate].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantError {
    /// A key is not within the bounds set by its ancestors: it is not less than an ancestor it sits
    /// left of, or it is less than an ancestor it sits right of.
    #[error("node at depth {depth} is out of order with one of its ancestors")]
    OutOfOrder {
        /// Distance from the root, which has depth 0.
        depth: usize,
    },

    /// The cached length disagrees with the number of nodes reachable from the root.
    #[error("tree reports {reported} nodes but {reachable} are reachable")]
    LengthMismatch {
        /// What [`Tree::len`][crate::Tree::len] returns.
        reported: usize,
        /// How many nodes a walk from the root visits.
        reachable: usize,
    },
}

//! Which neighbour takes the place of a removed node.

/// The policy [`Tree::remove`][crate::Tree::remove] uses to pick the node that fills the slot of a
/// removed node with two children. A node with a single child is always replaced by that child.
///
/// Whichever neighbour is promoted, it is spliced out of its subtree first (its own child takes its
/// old slot) and then adopts both of the removed node's subtrees, so no key is ever lost.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Promotion {
    /// Promote the in-order predecessor (the largest key of the left subtree). If that key is
    /// duplicated, the successor is promoted instead.
    #[default]
    Predecessor,
    /// Promote the in-order successor (the smallest key of the right subtree).
    Successor,
}

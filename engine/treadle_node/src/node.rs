//! The node contract consumed by the dispatch engine.

use std::fmt;
use std::hash::Hash;

/// Discriminant identifying which case of a tagged-variant node an
/// instance is.
///
/// Blanket-implemented, so a plain fieldless enum qualifies with
/// `#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]`. The `Debug`
/// bound exists so dispatch errors can name the offending kind.
pub trait VariantKind: Copy + Eq + Hash + fmt::Debug {}

impl<K: Copy + Eq + Hash + fmt::Debug> VariantKind for K {}

/// The structural contract a node type must satisfy to be traversable.
///
/// Both operations must be referentially stable for the duration of one
/// engine run: `kind` is a pure function of the node's identity, and
/// `children` returns the same nodes in the same order every time it is
/// called. The engine never mutates nodes.
///
/// Children are owned by their parent (tree, not graph): no sharing and
/// no cycles. A consequence worth knowing about when trees get degenerate:
/// the dispatch engine removes traversal recursion, but dropping a deeply
/// nested owned tree still recurses through the compiler-generated `Drop`
/// glue. Owners of very deep trees should drain children iteratively in a
/// manual `Drop` impl.
pub trait TreeNode: Sized {
    /// The discriminant type used for handler lookup.
    type Kind: VariantKind;

    /// The variant tag of this node.
    fn kind(&self) -> Self::Kind;

    /// Direct children in stable, deterministic order. Empty for leaves.
    fn children(&self) -> &[Self];

    /// Whether this node has no children.
    fn is_leaf(&self) -> bool {
        self.children().is_empty()
    }
}

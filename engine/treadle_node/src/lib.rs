//! Treadle Node - structural contract for traversable trees.
//!
//! This crate defines the minimal interface a tree node type must satisfy
//! for the Treadle dispatch engine to traverse it: a discriminant ([`TreeNode::kind`])
//! used for handler lookup, and an ordered view of direct children
//! ([`TreeNode::children`]).
//!
//! The contract is read-only. Construction and mutation of trees belong to
//! the caller; consumers of this crate only ever inspect kinds and children.
//!
//! # Re-exports
//!
//! - [`TreeNode`], [`VariantKind`] - the node contract
//! - [`descendants`], [`Descendants`] - non-recursive pre-order walk

mod node;
mod walk;

pub use node::{TreeNode, VariantKind};
pub use walk::{descendants, Descendants};

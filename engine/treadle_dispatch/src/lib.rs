//! Treadle Dispatch - type-tag dispatch over heterogeneous trees without
//! call-stack recursion.
//!
//! Given a tree of nodes satisfying the [`TreeNode`] contract and a
//! [`HandlerRegistry`] mapping each node kind to a [`Handler`], the
//! [`DispatchEngine`] computes a value for the root by visiting nodes
//! depth-first, left to right. Handlers request child results through
//! explicit suspension ([`Flow::Need`]) instead of calling back into the
//! engine, so the whole computation runs on a heap-allocated work stack:
//! traversal depth is bounded by available memory, not by the native call
//! stack.
//!
//! # Architecture
//!
//! - `handler` - the handler contract: one resolution step at a time,
//!   suspended work carried as a boxed continuation
//! - `registry` - per-kind handler registration with an optional fallback
//! - `engine` - the trampoline loop driving suspended handlers
//! - `recursive` - call-stack reference evaluation, kept for differential
//!   testing against the trampoline
//! - `errors` - registration and dispatch failures
//!
//! # Re-exports
//!
//! The node contract from `treadle_node` is re-exported so downstream
//! crates can depend on this crate alone.

pub mod errors;
mod engine;
mod handler;
mod recursive;
mod registry;

pub use engine::DispatchEngine;
pub use handler::{handler_fn, Flow, FnHandler, Handler, Resume, StepResult};
pub use recursive::run_recursive;
pub use registry::HandlerRegistry;

pub use errors::{DuplicateHandler, EngineError, HandlerError};

// Re-export the node contract for downstream convenience.
pub use treadle_node::{descendants, Descendants, TreeNode, VariantKind};

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
mod tests;

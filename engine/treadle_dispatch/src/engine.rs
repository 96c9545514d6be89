//! The dispatch trampoline.
//!
//! [`DispatchEngine::run`] evaluates a tree bottom-up by repeatedly
//! resuming suspended handlers until none remain, replacing native
//! recursive call/return. The work stack is an explicit, heap-growable
//! sequence of suspended-handler frames:
//!
//! - Reaching a node dispatches its handler immediately; there is no
//!   separate pending-node frame. A handler either finishes on the spot
//!   or suspends on its first child request.
//! - A suspension parks the handler's continuation on the stack and
//!   descends into the requested child.
//! - A finished value is delivered to the frame below, or returned to the
//!   caller when the stack is empty.
//!
//! At any moment the stack holds exactly the suspended ancestors of the
//! node being processed, root at the bottom, so its depth equals the
//! tree's depth, never the node count. Children are evaluated in exactly
//! the order handlers request them; the engine never reorders or
//! parallelizes requests, which reproduces depth-first, left-to-right
//! evaluation order identical to a naive recursive visitor.

use smallvec::SmallVec;
use tracing::trace;

use treadle_node::TreeNode;

use crate::errors::{handler_failure, EngineError};
use crate::handler::{Flow, Resume};
use crate::registry::HandlerRegistry;

/// A suspended handler awaiting one child's value.
struct Frame<'t, N: TreeNode, V> {
    /// Kind of the node the suspended handler is computing, kept for
    /// failure context when the resumed handler errors.
    kind: N::Kind,
    resume: Resume<'t, N, V>,
}

/// Work-stack frames kept inline before spilling to the heap.
const INLINE_FRAMES: usize = 16;

/// Drives handler execution over a tree through an explicit work stack.
///
/// The engine holds no state of its own between runs; each [`run`] call
/// creates a fresh work stack and fully consumes it before returning.
///
/// [`run`]: Self::run
pub struct DispatchEngine<'r, N: TreeNode, V> {
    registry: &'r HandlerRegistry<N, V>,
}

impl<'r, N: TreeNode, V> DispatchEngine<'r, N, V> {
    /// Create an engine dispatching through `registry`.
    pub fn new(registry: &'r HandlerRegistry<N, V>) -> Self {
        DispatchEngine { registry }
    }

    /// Evaluate `root` and return its value.
    ///
    /// Fails with `UnhandledKind` when a reached node's kind resolves to
    /// no handler, or with `Handler` when a handler raises a domain
    /// error; either failure aborts the whole run with no partial result.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn run<'t>(&self, root: &'t N) -> Result<V, EngineError<N::Kind>> {
        let mut stack: SmallVec<[Frame<'t, N, V>; INLINE_FRAMES]> = SmallVec::new();
        let mut kind = root.kind();
        let mut flow = self.dispatch(root)?;
        loop {
            match flow {
                Flow::Need { child, resume } => {
                    stack.push(Frame { kind, resume });
                    trace!(kind = ?child.kind(), depth = stack.len(), "descend");
                    kind = child.kind();
                    flow = self.dispatch(child)?;
                }
                Flow::Done(value) => match stack.pop() {
                    None => {
                        trace!("run complete");
                        return Ok(value);
                    }
                    Some(frame) => {
                        trace!(kind = ?frame.kind, depth = stack.len(), "resume");
                        kind = frame.kind;
                        flow = (frame.resume)(value)
                            .map_err(|source| handler_failure(frame.kind, source))?;
                    }
                },
            }
        }
    }

    /// Resolve and start the handler for one node.
    fn dispatch<'t>(&self, node: &'t N) -> Result<Flow<'t, N, V>, EngineError<N::Kind>> {
        let kind = node.kind();
        trace!(kind = ?kind, "dispatch");
        let handler = self.registry.resolve(kind)?;
        handler
            .call(node)
            .map_err(|source| handler_failure(kind, source))
    }
}

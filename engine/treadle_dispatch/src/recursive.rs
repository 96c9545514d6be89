//! Call-stack reference evaluation.
//!
//! [`run_recursive`] drives the same handlers as [`DispatchEngine`]
//! through ordinary recursive call/return. It exists as the differential
//! baseline for the trampoline: over any tree and handler set, both must
//! produce the same value and fail at the same points.
//!
//! Because the native stack is the limiting resource here, the recursion
//! grows it on demand (native targets only; WASM manages its own stack).
//! That keeps the baseline alive on the moderately deep trees property
//! tests generate, but degenerate trees remain the trampoline's job.
//!
//! [`DispatchEngine`]: crate::DispatchEngine

use treadle_node::TreeNode;

use crate::errors::{handler_failure, EngineError};
use crate::handler::Flow;
use crate::registry::HandlerRegistry;

/// Remaining stack below which another segment is allocated (100KB).
#[cfg(not(target_arch = "wasm32"))]
const RED_ZONE: usize = 100 * 1024;

/// Size of each newly allocated stack segment (1MB).
#[cfg(not(target_arch = "wasm32"))]
const STACK_PER_SEGMENT: usize = 1024 * 1024;

#[cfg(not(target_arch = "wasm32"))]
fn with_stack_headroom<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_SEGMENT, f)
}

#[cfg(target_arch = "wasm32")]
fn with_stack_headroom<R>(f: impl FnOnce() -> R) -> R {
    f()
}

/// Evaluate `root` by direct recursion over the same handler contract
/// the trampoline drives.
///
/// Each suspension is satisfied by a recursive call in place of a work
/// stack frame; everything observable matches [`DispatchEngine::run`].
///
/// [`DispatchEngine::run`]: crate::DispatchEngine::run
pub fn run_recursive<N: TreeNode, V>(
    registry: &HandlerRegistry<N, V>,
    root: &N,
) -> Result<V, EngineError<N::Kind>> {
    with_stack_headroom(|| {
        let kind = root.kind();
        let handler = registry.resolve(kind)?;
        let mut flow = handler
            .call(root)
            .map_err(|source| handler_failure(kind, source))?;
        loop {
            match flow {
                Flow::Done(value) => return Ok(value),
                Flow::Need { child, resume } => {
                    let value = run_recursive(registry, child)?;
                    flow = resume(value).map_err(|source| handler_failure(kind, source))?;
                }
            }
        }
    })
}

//! The handler contract.
//!
//! A handler computes the value of a single node. It may depend on child
//! values, but it never evaluates a child itself: it *suspends*, handing
//! the engine the child it needs together with a continuation, and the
//! engine resumes the continuation with exactly one value once the child
//! has been evaluated. A handler that needs no children returns
//! [`Flow::Done`] from its first step.
//!
//! Everything a suspended handler has computed so far lives inside the
//! continuation's captures, so a suspension is an ordinary value the
//! engine can park on its work stack. State that must survive a
//! suspension point has to be owned by (moved into) the continuation.
//!
//! # Example
//!
//! A two-operand handler, written as the chain of suspension points it is:
//!
//! ```text
//! impl Handler<Expr, f64> for AddHandler {
//!     fn call<'t>(&self, node: &'t Expr) -> StepResult<'t, Expr, f64> {
//!         let (lhs, rhs) = binary_operands(node)?;
//!         Ok(Flow::need(lhs, move |l: f64| {
//!             Ok(Flow::need(rhs, move |r| Ok(Flow::Done(l + r))))
//!         }))
//!     }
//! }
//! ```

use treadle_node::TreeNode;

use crate::errors::HandlerError;

/// Continuation of a suspended handler: consumes the requested child's
/// value and produces the handler's next step.
pub type Resume<'t, N, V> = Box<dyn FnOnce(V) -> StepResult<'t, N, V> + 't>;

/// Result of driving a handler one step: the next [`Flow`], or the
/// handler's own domain failure.
pub type StepResult<'t, N, V> = Result<Flow<'t, N, V>, HandlerError>;

/// Outcome of one handler step.
pub enum Flow<'t, N, V> {
    /// The handler finished; this is the node's value.
    Done(V),
    /// The handler needs `child` evaluated before it can continue.
    Need {
        /// The child whose value is requested.
        child: &'t N,
        /// Resumed with the child's value once it is available.
        resume: Resume<'t, N, V>,
    },
}

impl<'t, N, V> Flow<'t, N, V> {
    /// Suspend: request `child`'s value and continue with `resume`.
    pub fn need(child: &'t N, resume: impl FnOnce(V) -> StepResult<'t, N, V> + 't) -> Self {
        Flow::Need {
            child,
            resume: Box::new(resume),
        }
    }
}

/// Computes the value of nodes of one kind.
///
/// `Send + Sync` is required so a populated registry can be shared
/// read-only across threads; independent engine runs never share mutable
/// state.
pub trait Handler<N: TreeNode, V>: Send + Sync {
    /// Begin handling `node`: return its value, or the first suspension
    /// point.
    fn call<'t>(&self, node: &'t N) -> StepResult<'t, N, V>;
}

/// [`Handler`] backed by a plain function. See [`handler_fn`].
pub struct FnHandler<F> {
    f: F,
}

impl<N, V, F> Handler<N, V> for FnHandler<F>
where
    N: TreeNode,
    F: for<'t> Fn(&'t N) -> StepResult<'t, N, V> + Send + Sync,
{
    fn call<'t>(&self, node: &'t N) -> StepResult<'t, N, V> {
        (self.f)(node)
    }
}

/// Wrap a plain function as a [`Handler`], for handlers with no state of
/// their own:
///
/// ```text
/// fn number<'t>(node: &'t Expr) -> StepResult<'t, Expr, f64> {
///     Ok(Flow::Done(node.value))
/// }
///
/// registry.register(Kind::Number, handler_fn(number))?;
/// ```
pub fn handler_fn<F>(f: F) -> FnHandler<F> {
    FnHandler { f }
}

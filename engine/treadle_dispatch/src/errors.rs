//! Error types for handler registration and dispatch.
//!
//! Three failures exist, all terminal for the operation that raised them:
//!
//! - [`DuplicateHandler`] - registration-time caller logic error
//! - [`EngineError::UnhandledKind`] - a reachable node kind has no handler
//!   and no fallback; a configuration error surfaced at dispatch time
//! - [`EngineError::Handler`] - a handler's own domain logic failed; the
//!   cause is propagated to the `run` caller with the originating node
//!   kind attached
//!
//! Factory functions (`unhandled_kind`, `handler_failure`, ...) are the
//! construction points used inside the crate; the types themselves are the
//! public matching surface.

use std::error::Error;
use std::fmt;

use treadle_node::VariantKind;

/// Registration-time failure: the kind already has a handler.
///
/// Overriding must be explicit via [`HandlerRegistry::replace`] to avoid
/// silent shadowing.
///
/// [`HandlerRegistry::replace`]: crate::HandlerRegistry::replace
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DuplicateHandler<K> {
    /// The kind that was already registered.
    pub kind: K,
}

impl<K: VariantKind> fmt::Display for DuplicateHandler<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "a handler is already registered for node kind {:?} (use `replace` to override)",
            self.kind
        )
    }
}

impl<K: VariantKind> Error for DuplicateHandler<K> {}

/// Domain failure raised by a handler while computing a node's value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HandlerError {
    message: String,
}

impl HandlerError {
    /// Create a handler error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        HandlerError {
            message: message.into(),
        }
    }

    /// The failure message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for HandlerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for HandlerError {}

impl From<String> for HandlerError {
    fn from(message: String) -> Self {
        HandlerError { message }
    }
}

impl From<&str> for HandlerError {
    fn from(message: &str) -> Self {
        HandlerError::new(message)
    }
}

/// Failure of a whole [`DispatchEngine::run`] call.
///
/// Neither variant is recovered by the engine: the in-flight work stack is
/// discarded and no partial result is produced. Nodes are never mutated,
/// so the caller's tree is untouched on every failure path.
///
/// [`DispatchEngine::run`]: crate::DispatchEngine::run
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EngineError<K> {
    /// A reachable node's kind has neither a specific handler nor a
    /// fallback.
    UnhandledKind {
        /// The kind no handler was found for.
        kind: K,
    },
    /// A handler failed while computing the value of a node.
    Handler {
        /// Kind of the node whose handler failed.
        kind: K,
        /// The handler's own failure.
        source: HandlerError,
    },
}

impl<K: VariantKind> fmt::Display for EngineError<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnhandledKind { kind } => {
                write!(
                    f,
                    "no handler registered for node kind {kind:?} and no fallback is set"
                )
            }
            Self::Handler { kind, source } => {
                write!(f, "handler for node kind {kind:?} failed: {source}")
            }
        }
    }
}

impl<K: VariantKind> Error for EngineError<K> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::UnhandledKind { .. } => None,
            Self::Handler { source, .. } => Some(source),
        }
    }
}

/// No handler and no fallback for `kind`.
pub fn unhandled_kind<K>(kind: K) -> EngineError<K> {
    EngineError::UnhandledKind { kind }
}

/// A handler for a node of `kind` failed with `source`.
pub fn handler_failure<K>(kind: K, source: HandlerError) -> EngineError<K> {
    EngineError::Handler { kind, source }
}

/// `kind` already has a registered handler.
pub fn duplicate_handler<K>(kind: K) -> DuplicateHandler<K> {
    DuplicateHandler { kind }
}

//! Handler registry: kind-to-handler lookup with an optional fallback.
//!
//! The set of kinds is closed and known to the registry: every kind
//! reachable during a run must resolve to a handler, or the run fails
//! with `UnhandledKind`. At most one handler exists per kind; overriding
//! a registration is explicit via [`HandlerRegistry::replace`].

use rustc_hash::FxHashMap;
use std::collections::hash_map::Entry;

use treadle_node::{descendants, TreeNode};

use crate::errors::{duplicate_handler, unhandled_kind, DuplicateHandler, EngineError};
use crate::handler::Handler;

/// Mapping from node kind to handler, with an optional fallback used when
/// no kind-specific handler exists.
///
/// A registry is built once, then used read-only by any number of engine
/// runs; handlers are `Send + Sync`, so a populated registry may also be
/// shared across threads.
pub struct HandlerRegistry<N: TreeNode, V> {
    handlers: FxHashMap<N::Kind, Box<dyn Handler<N, V>>>,
    fallback: Option<Box<dyn Handler<N, V>>>,
}

impl<N: TreeNode, V> HandlerRegistry<N, V> {
    /// Create an empty registry.
    pub fn new() -> Self {
        HandlerRegistry {
            handlers: FxHashMap::default(),
            fallback: None,
        }
    }

    /// Associate `handler` with `kind`.
    ///
    /// Fails with [`DuplicateHandler`] if `kind` already has a handler;
    /// overriding must go through [`replace`](Self::replace) so that
    /// shadowing is always deliberate.
    pub fn register(
        &mut self,
        kind: N::Kind,
        handler: impl Handler<N, V> + 'static,
    ) -> Result<(), DuplicateHandler<N::Kind>> {
        match self.handlers.entry(kind) {
            Entry::Occupied(_) => Err(duplicate_handler(kind)),
            Entry::Vacant(slot) => {
                slot.insert(Box::new(handler));
                Ok(())
            }
        }
    }

    /// Associate `handler` with `kind`, displacing any previous handler.
    ///
    /// Returns the displaced handler, or `None` if `kind` was
    /// unregistered.
    pub fn replace(
        &mut self,
        kind: N::Kind,
        handler: impl Handler<N, V> + 'static,
    ) -> Option<Box<dyn Handler<N, V>>> {
        self.handlers.insert(kind, Box::new(handler))
    }

    /// Install the fallback handler consulted when no kind-specific
    /// handler exists. Replaces any previous fallback.
    pub fn set_fallback(&mut self, handler: impl Handler<N, V> + 'static) {
        self.fallback = Some(Box::new(handler));
    }

    /// Look up the handler for `kind`: the kind-specific handler if
    /// present, else the fallback, else `UnhandledKind`.
    pub fn resolve(&self, kind: N::Kind) -> Result<&dyn Handler<N, V>, EngineError<N::Kind>> {
        if let Some(handler) = self.handlers.get(&kind) {
            return Ok(handler.as_ref());
        }
        self.fallback.as_deref().ok_or_else(|| unhandled_kind(kind))
    }

    /// The kinds with a registered handler, in no particular order.
    pub fn kinds(&self) -> impl Iterator<Item = N::Kind> + '_ {
        self.handlers.keys().copied()
    }

    /// Number of kind-specific handlers (the fallback is not counted).
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether no kind-specific handler is registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Whether a fallback handler is installed.
    pub fn has_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    /// Preflight check: the kinds reachable from `root` that neither a
    /// kind-specific handler nor the fallback covers, in first-encounter
    /// (pre-order) order. Empty means a run over `root` cannot fail with
    /// `UnhandledKind`.
    pub fn missing_kinds(&self, root: &N) -> Vec<N::Kind> {
        if self.fallback.is_some() {
            return Vec::new();
        }
        let mut missing = Vec::new();
        for node in descendants(root) {
            let kind = node.kind();
            if !self.handlers.contains_key(&kind) && !missing.contains(&kind) {
                missing.push(kind);
            }
        }
        missing
    }
}

impl<N: TreeNode, V> Default for HandlerRegistry<N, V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]

//! Scenario tests for the dispatch engine.
//!
//! Shared fixtures (an arithmetic tree plus an evaluator and a code
//! generator handler set) live in `support`; the sibling modules cover
//! evaluation, code generation, and engine mechanics.

pub mod support;

//! Core types for the table-driven machine.
//!
//! This module contains the pure data side of the machine:
//! - State tags via the `State` trait
//! - Transition records with predicates and optional extractors
//! - The `Step` value a running machine returns per input line
//!
//! Nothing here performs I/O or mutates shared state; the imperative loop
//! lives in [`crate::engine`].

mod state;
mod transition;

pub use state::State;
pub use transition::{ExtractFn, Predicate, Step, Transition};

//! Machine errors.

use std::error::Error;
use thiserror::Error;

/// Errors raised by [`crate::engine::Machine`].
///
/// Configuration mistakes (`AlreadyRunning`, `InvalidStart`) and lifecycle
/// misuse (`NotRunning`) are caller bugs; `NoTransition` and `Ambiguous`
/// surface while the machine runs because predicates are data-dependent and
/// cannot be checked exhaustively at registration time. None of these are
/// recovered internally; the first one aborts the run.
///
/// `E` is the error type of the table's extractors.
#[derive(Debug, Error)]
pub enum MachineError<E: Error + 'static> {
    #[error("machine is running; transitions cannot be registered after start()")]
    AlreadyRunning,

    #[error("'{state}' is not the source of any registered transition")]
    InvalidStart { state: String },

    #[error("machine is not running; call start() before submitting input")]
    NotRunning,

    #[error("no transition from state '{state}' matches line {line:?}")]
    NoTransition { state: String, line: String },

    #[error("ambiguous transitions from state '{state}' on line {line:?}; candidate targets: {candidates:?}")]
    Ambiguous {
        state: String,
        line: String,
        candidates: Vec<String>,
    },

    #[error("extraction failed on line {line:?}")]
    Extract {
        line: String,
        #[source]
        source: E,
    },
}

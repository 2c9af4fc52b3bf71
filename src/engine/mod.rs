//! The transition evaluator.
//!
//! [`Machine`] owns a transition table and its previous/current state tags,
//! and nothing else. It is driven one input line at a time and knows nothing
//! about what the lines mean; see [`crate::report`] for the domain table.

mod error;
mod machine;

pub use error::MachineError;
pub use machine::Machine;

//! Core State trait for machine state tags.
//!
//! State tags are small opaque identifiers; the machine compares them for
//! equality and reports them by name in errors and logs.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for state machine state tags.
///
/// States are immutable values that describe the current position in a
/// machine. The machine itself never inspects a state beyond comparing it
/// and asking for its name, so any cheap enum works.
///
/// # Required Traits
///
/// - `Clone`: states are copied into the previous/current slots on every step
/// - `PartialEq`: transition selection compares source states for equality
/// - `Debug`: states appear in diagnostics
/// - `Serialize` + `Deserialize`: states are plain data and travel with the
///   values they annotate
///
/// # Example
///
/// ```rust
/// use blastmap::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
/// enum Phase {
///     Preamble,
///     Body,
/// }
///
/// impl State for Phase {
///     fn name(&self) -> &str {
///         match self {
///             Self::Preamble => "Preamble",
///             Self::Body => "Body",
///         }
///     }
/// }
///
/// assert_eq!(Phase::Body.name(), "Body");
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Get the state's name for display/logging.
    ///
    /// Returns a static string reference for zero-cost naming.
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
    enum TestState {
        Idle,
        Scanning,
    }

    impl State for TestState {
        fn name(&self) -> &str {
            match self {
                Self::Idle => "Idle",
                Self::Scanning => "Scanning",
            }
        }
    }

    #[test]
    fn state_name_returns_correct_value() {
        assert_eq!(TestState::Idle.name(), "Idle");
        assert_eq!(TestState::Scanning.name(), "Scanning");
    }

    #[test]
    fn state_is_comparable_and_cloneable() {
        let a = TestState::Scanning;
        let b = a;
        assert_eq!(a, b);
        assert_ne!(a, TestState::Idle);
    }

    #[test]
    fn state_serializes_correctly() {
        let state = TestState::Scanning;
        let json = serde_json::to_string(&state).unwrap();
        let back: TestState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, back);
    }
}

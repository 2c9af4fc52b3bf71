//! Transition records evaluated by the machine.
//!
//! A transition is pure data: a source state, a target state, a predicate
//! over the input line, and an optional extractor that pulls a value out of
//! the line when the transition fires. Predicates and extractors are plain
//! `fn` pointers, so a transition table is a closed, inspectable set of named
//! rules rather than a bag of opaque closures.

use crate::core::state::State;

/// Predicate deciding whether a transition applies to an input line.
///
/// `Always` is the unconditional rule; `When` wraps a named pure function.
///
/// # Example
///
/// ```rust
/// use blastmap::core::Predicate;
///
/// fn is_header(line: &str) -> bool {
///     line.starts_with('>')
/// }
///
/// assert!(Predicate::Always.matches("anything"));
/// assert!(Predicate::When(is_header).matches(">sp|P12345"));
/// assert!(!Predicate::When(is_header).matches("plain text"));
/// ```
#[derive(Clone, Copy, Debug)]
pub enum Predicate {
    /// Applies to every input line.
    Always,
    /// Applies when the wrapped function accepts the line.
    When(fn(&str) -> bool),
}

impl Predicate {
    /// Evaluate the predicate against a raw input line (pure).
    pub fn matches(&self, line: &str) -> bool {
        match self {
            Predicate::Always => true,
            Predicate::When(f) => f(line),
        }
    }
}

/// Extractor function: pulls a typed value out of a matched line.
///
/// Extractors may fail (a coordinate line with no numeric token, say);
/// failures abort the step rather than panic.
pub type ExtractFn<V, E> = fn(&str) -> Result<V, E>;

/// A single transition rule.
///
/// `from == to` is a valid self-loop, and a self-loop may still carry an
/// extractor. The extractor field being `None` means the transition produces
/// no value.
pub struct Transition<S: State, V, E> {
    /// Source state this rule applies from.
    pub from: S,
    /// Target state the machine moves to when the rule fires.
    pub to: S,
    /// Line predicate gating the rule.
    pub predicate: Predicate,
    /// Optional value extraction, run only when the rule fires.
    pub extract: Option<ExtractFn<V, E>>,
}

impl<S: State, V, E> Transition<S, V, E> {
    /// Create a transition with no extractor.
    pub fn new(from: S, to: S, predicate: Predicate) -> Self {
        Self {
            from,
            to,
            predicate,
            extract: None,
        }
    }

    /// Create a transition that extracts a value when it fires.
    pub fn extracting(from: S, to: S, predicate: Predicate, extract: ExtractFn<V, E>) -> Self {
        Self {
            from,
            to,
            predicate,
            extract: Some(extract),
        }
    }

    /// Check whether this rule applies from `current` on `line` (pure).
    pub fn applies(&self, current: &S, line: &str) -> bool {
        self.from == *current && self.predicate.matches(line)
    }
}

// Manual impl: deriving would demand Clone of V and E, which only appear
// inside the `fn` pointer type.
impl<S: State, V, E> Clone for Transition<S, V, E> {
    fn clone(&self) -> Self {
        Self {
            from: self.from.clone(),
            to: self.to.clone(),
            predicate: self.predicate,
            extract: self.extract,
        }
    }
}

/// Outcome of submitting one input line to a running machine.
#[derive(Clone, Debug, PartialEq)]
pub struct Step<S: State, V> {
    /// State the machine is in after the step.
    pub state: S,
    /// Whether the step moved to a different state (false on self-loops).
    pub changed: bool,
    /// Value produced by the fired transition's extractor, if it had one.
    pub extracted: Option<V>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use std::convert::Infallible;

    #[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
    enum TestState {
        Outside,
        Inside,
    }

    impl State for TestState {
        fn name(&self) -> &str {
            match self {
                Self::Outside => "Outside",
                Self::Inside => "Inside",
            }
        }
    }

    fn starts_with_hash(line: &str) -> bool {
        line.starts_with('#')
    }

    fn line_length(line: &str) -> Result<usize, Infallible> {
        Ok(line.len())
    }

    #[test]
    fn always_predicate_matches_everything() {
        assert!(Predicate::Always.matches(""));
        assert!(Predicate::Always.matches("# comment"));
    }

    #[test]
    fn when_predicate_delegates_to_function() {
        let p = Predicate::When(starts_with_hash);
        assert!(p.matches("# comment"));
        assert!(!p.matches("data"));
    }

    #[test]
    fn applies_requires_matching_source_state() {
        let t: Transition<TestState, usize, Infallible> = Transition::new(
            TestState::Outside,
            TestState::Inside,
            Predicate::When(starts_with_hash),
        );

        assert!(t.applies(&TestState::Outside, "# x"));
        assert!(!t.applies(&TestState::Inside, "# x"));
        assert!(!t.applies(&TestState::Outside, "x"));
    }

    #[test]
    fn extracting_constructor_sets_extractor() {
        let t: Transition<TestState, usize, Infallible> = Transition::extracting(
            TestState::Outside,
            TestState::Inside,
            Predicate::Always,
            line_length,
        );

        let f = t.extract.expect("extractor present");
        assert_eq!(f("abcd"), Ok(4));
    }

    #[test]
    fn self_loop_is_a_valid_rule() {
        let t: Transition<TestState, usize, Infallible> =
            Transition::new(TestState::Inside, TestState::Inside, Predicate::Always);

        assert!(t.applies(&TestState::Inside, "anything"));
        assert_eq!(t.from, t.to);
    }
}

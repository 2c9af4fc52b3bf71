//! Table-driven state machine.
//!
//! The machine owns an ordered transition table and the previous/current
//! state tags, nothing else. It is synchronous and single-threaded: one
//! input line in, one [`Step`] out. Domain knowledge lives entirely in the
//! table it is given.

use crate::core::{State, Step, Transition};
use crate::engine::error::MachineError;
use std::error::Error;

/// A table-driven transition evaluator.
///
/// Lifecycle: construct (empty or from a prebuilt table), register
/// transitions while stopped, [`start`](Machine::start), drive with repeated
/// [`submit`](Machine::submit) calls, [`stop`](Machine::stop).
///
/// For every submitted line, exactly one transition out of the current state
/// must apply. Zero applicable transitions means the table does not cover
/// the input; more than one means the table itself is defective. Both are
/// fatal, never silently resolved.
///
/// # Example
///
/// ```rust
/// use blastmap::core::{Predicate, State, Transition};
/// use blastmap::engine::Machine;
/// use serde::{Deserialize, Serialize};
/// use std::convert::Infallible;
///
/// #[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
/// enum Phase {
///     Outside,
///     Inside,
/// }
///
/// impl State for Phase {
///     fn name(&self) -> &str {
///         match self {
///             Self::Outside => "Outside",
///             Self::Inside => "Inside",
///         }
///     }
/// }
///
/// fn is_open(line: &str) -> bool {
///     line.starts_with('{')
/// }
/// fn is_other(line: &str) -> bool {
///     !line.starts_with('{')
/// }
///
/// let table: Vec<Transition<Phase, (), Infallible>> = vec![
///     Transition::new(Phase::Outside, Phase::Outside, Predicate::When(is_other)),
///     Transition::new(Phase::Outside, Phase::Inside, Predicate::When(is_open)),
///     Transition::new(Phase::Inside, Phase::Inside, Predicate::Always),
/// ];
///
/// let mut machine = Machine::with_transitions(table);
/// machine.start(Phase::Outside).unwrap();
///
/// let step = machine.submit("text").unwrap();
/// assert!(!step.changed);
///
/// let step = machine.submit("{").unwrap();
/// assert!(step.changed);
/// assert_eq!(step.state, Phase::Inside);
///
/// machine.stop();
/// ```
pub struct Machine<S: State, V, E: Error + 'static> {
    transitions: Vec<Transition<S, V, E>>,
    previous: Option<S>,
    current: Option<S>,
    running: bool,
}

impl<S: State, V, E: Error + 'static> Machine<S, V, E> {
    /// Create a machine with an empty transition table.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
            previous: None,
            current: None,
            running: false,
        }
    }

    /// Create a machine from a prebuilt, constructed-once table.
    pub fn with_transitions(transitions: Vec<Transition<S, V, E>>) -> Self {
        Self {
            transitions,
            previous: None,
            current: None,
            running: false,
        }
    }

    /// Append a transition to the table.
    ///
    /// Fails with [`MachineError::AlreadyRunning`] once the machine has been
    /// started; the table is fixed for the duration of a run.
    pub fn register(&mut self, transition: Transition<S, V, E>) -> Result<(), MachineError<E>> {
        if self.running {
            return Err(MachineError::AlreadyRunning);
        }
        self.transitions.push(transition);
        Ok(())
    }

    /// Start the machine in `initial`.
    ///
    /// Fails with [`MachineError::InvalidStart`] unless `initial` is the
    /// source state of at least one registered transition.
    pub fn start(&mut self, initial: S) -> Result<(), MachineError<E>> {
        if !self.transitions.iter().any(|t| t.from == initial) {
            return Err(MachineError::InvalidStart {
                state: initial.name().to_string(),
            });
        }
        log::debug!("machine started in state '{}'", initial.name());
        self.previous = Some(initial.clone());
        self.current = Some(initial);
        self.running = true;
        Ok(())
    }

    /// Stop the machine, clearing the current state. Idempotent.
    pub fn stop(&mut self) {
        if self.running {
            log::debug!("machine stopped");
        }
        self.current = None;
        self.running = false;
    }

    /// Whether the machine has been started and not yet stopped.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// The current state, if the machine is running.
    pub fn current_state(&self) -> Option<&S> {
        self.current.as_ref()
    }

    /// The state before the most recent step.
    pub fn previous_state(&self) -> Option<&S> {
        self.previous.as_ref()
    }

    /// Submit one input line and take the uniquely applicable transition.
    ///
    /// Returns the new state, whether it differs from the old one, and the
    /// fired transition's extracted value (if it had an extractor). A
    /// transition may target its own source state; the extractor still runs
    /// on such a self-loop and `changed` is `false`.
    pub fn submit(&mut self, line: &str) -> Result<Step<S, V>, MachineError<E>> {
        if !self.running {
            return Err(MachineError::NotRunning);
        }
        let Some(current) = self.current.clone() else {
            return Err(MachineError::NotRunning);
        };

        let matches: Vec<&Transition<S, V, E>> = self
            .transitions
            .iter()
            .filter(|t| t.applies(&current, line))
            .collect();

        let transition = match matches.as_slice() {
            [] => {
                return Err(MachineError::NoTransition {
                    state: current.name().to_string(),
                    line: line.to_string(),
                })
            }
            [one] => *one,
            many => {
                return Err(MachineError::Ambiguous {
                    state: current.name().to_string(),
                    line: line.to_string(),
                    candidates: many.iter().map(|t| t.to.name().to_string()).collect(),
                })
            }
        };

        let next = transition.to.clone();
        let extract = transition.extract;
        let changed = current != next;
        if changed {
            log::trace!("machine: '{}' -> '{}'", current.name(), next.name());
        }

        self.previous = Some(current);
        self.current = Some(next.clone());

        let extracted = match extract {
            Some(f) => Some(f(line).map_err(|source| MachineError::Extract {
                line: line.to_string(),
                source,
            })?),
            None => None,
        };

        Ok(Step {
            state: next,
            changed,
            extracted,
        })
    }
}

impl<S: State, V, E: Error + 'static> Default for Machine<S, V, E> {
    fn default() -> Self {
        Self::new()
    }
}

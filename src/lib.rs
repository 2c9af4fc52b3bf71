//! Blastmap: streaming BLAST-report scanning on a table-driven state machine.
//!
//! A BLAST-style alignment report is a long, line-oriented text dump. This
//! crate walks it one line at a time with a declarative finite-state machine
//! and produces, per query sequence and matched subject, the aligned
//! coordinate interval on each side. No full-file buffering, no
//! backtracking.
//!
//! # Core Concepts
//!
//! - **Machine**: a generic, table-driven transition evaluator with no
//!   domain knowledge ([`engine::Machine`])
//! - **Rules**: the closed set of line predicates and extractors that make
//!   up the report's transition table ([`report::transition_table`])
//! - **Scan**: the driver that streams lines through the machine and folds
//!   extracted values into an [`report::AlignmentMap`]
//!
//! # Example
//!
//! ```rust
//! use blastmap::report::scan_lines;
//!
//! let report = [
//!     "BLASTP 2.12.0+",
//!     "",
//!     "Query= P00533",
//!     "",
//!     ">sp|P12345|EGFR_MOUSE Epidermal growth factor receptor",
//!     "",
//!     "Query  10  MRPSGTAGA  18",
//!     "           MRPSGTAGA",
//!     "Sbjct  12  MRPSGTAGA  20",
//! ];
//!
//! let map = scan_lines(report).unwrap();
//! let hit = &map["P00533"]["sp|P12345|EGFR_MOUSE"];
//! assert_eq!((hit.query.start, hit.query.end), (10, 18));
//! assert_eq!((hit.subject.start, hit.subject.end), (12, 20));
//! ```

pub mod core;
pub mod engine;
pub mod report;

// Re-export commonly used types
pub use crate::core::{Predicate, State, Step, Transition};
pub use engine::{Machine, MachineError};
pub use report::{scan_file, scan_lines, scan_reader, AlignmentMap, HitSpan, Interval, ScanError};

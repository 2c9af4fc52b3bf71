//! BLAST-report domain: parse states, line rules, and the streaming driver.

mod rules;
mod scan;
mod span;

pub use rules::{
    transition_table, Extracted, ParseState, ReportMachine, ReportTransition, RuleError,
    QUERY_COORDS, QUERY_HEADER, SUBJECT_COORDS, SUBJECT_HEADER,
};
pub use scan::{scan_file, scan_lines, scan_reader, ScanError};
pub use span::{AlignmentMap, HitSpan, Interval};

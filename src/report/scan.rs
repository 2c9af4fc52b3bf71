//! Streaming report driver.
//!
//! Feeds a report to the machine one line at a time and folds the extracted
//! values into an [`AlignmentMap`]. A block's record is written exactly once,
//! on the transition that leaves its coordinate states (the next subject
//! header, the next query header, or end of input). No line is buffered
//! beyond the one being processed and there is no backtracking.

use crate::engine::MachineError;
use crate::report::rules::{transition_table, Extracted, ParseState, ReportMachine, RuleError};
use crate::report::span::{AlignmentMap, HitSpan, Interval};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors aborting a scan.
///
/// A scan either completes with a fully populated mapping or fails at the
/// first error; there is no partial-success mode. Machine errors carry the
/// 1-based number of the offending line.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("scanner transition table rejected at startup")]
    Setup(#[source] MachineError<RuleError>),

    #[error("report line {line_no} rejected")]
    Line {
        line_no: u64,
        #[source]
        source: MachineError<RuleError>,
    },

    #[error("failed reading report at line {line_no}")]
    Read {
        line_no: u64,
        #[source]
        source: io::Error,
    },

    #[error("failed to open report {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Per-block accumulation state.
///
/// Only the first and last coordinate of each side matter, so instead of
/// collecting every endpoint the accumulator keeps one `(first, last)` pair
/// per side and extends `last` as fragments arrive.
#[derive(Debug, Default)]
struct Accumulator {
    query: Option<String>,
    subject: Option<String>,
    query_span: Option<(u64, u64)>,
    subject_span: Option<(u64, u64)>,
}

impl Accumulator {
    fn begin_query(&mut self, name: String) {
        self.query = Some(name);
        self.subject = None;
        self.query_span = None;
        self.subject_span = None;
    }

    fn begin_subject(&mut self, id: String) {
        self.subject = Some(id);
        self.query_span = None;
        self.subject_span = None;
    }

    fn push_query(&mut self, first: u64, last: u64) {
        extend(&mut self.query_span, first, last);
    }

    fn push_subject(&mut self, first: u64, last: u64) {
        extend(&mut self.subject_span, first, last);
    }

    /// Close the current block, writing its record if one accumulated.
    ///
    /// Draining the spans makes a repeated close a no-op, so the mapping is
    /// unchanged however often a block is finalized.
    fn finalize_into(&mut self, map: &mut AlignmentMap) {
        let (Some(query), Some(subject)) = (self.query.as_ref(), self.subject.as_ref()) else {
            return;
        };
        let (Some(q), Some(s)) = (self.query_span.take(), self.subject_span.take()) else {
            return;
        };
        let span = HitSpan {
            query: Interval::new(q.0, q.1),
            subject: Interval::new(s.0, s.1),
        };
        log::debug!(
            "closed block {query}/{subject}: query {}, subject {}",
            span.query,
            span.subject
        );
        map.entry(query.clone())
            .or_default()
            .insert(subject.clone(), span);
    }
}

fn extend(span: &mut Option<(u64, u64)>, first: u64, last: u64) {
    *span = match *span {
        None => Some((first, last)),
        Some((opened, _)) => Some((opened, last)),
    };
}

/// Scan a report given as in-memory lines.
///
/// Lines may or may not carry their trailing newline; markers are matched
/// at the start of the line either way.
///
/// # Example
///
/// ```rust
/// use blastmap::report::scan_lines;
///
/// let report = [
///     "Query= Q1",
///     ">S1 some subject",
///     "Query  10  ABCDE  14",
///     "Sbjct  100  ABCDE  104",
///     "Query= Q2",
/// ];
/// let map = scan_lines(report).unwrap();
/// let hit = &map["Q1"]["S1"];
/// assert_eq!((hit.query.start, hit.query.end), (10, 14));
/// assert_eq!((hit.subject.start, hit.subject.end), (100, 104));
/// assert!(map["Q2"].is_empty());
/// ```
pub fn scan_lines<I, L>(lines: I) -> Result<AlignmentMap, ScanError>
where
    I: IntoIterator<Item = L>,
    L: AsRef<str>,
{
    scan(lines.into_iter().map(Ok))
}

/// Scan a report pulled line-by-line from a buffered reader.
pub fn scan_reader<R: BufRead>(reader: R) -> Result<AlignmentMap, ScanError> {
    scan(reader.lines())
}

/// Scan a report file.
pub fn scan_file<P: AsRef<Path>>(path: P) -> Result<AlignmentMap, ScanError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| ScanError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    scan_reader(BufReader::new(file))
}

fn scan<I, L>(lines: I) -> Result<AlignmentMap, ScanError>
where
    I: Iterator<Item = Result<L, io::Error>>,
    L: AsRef<str>,
{
    let mut machine: ReportMachine = ReportMachine::with_transitions(transition_table());
    machine.start(ParseState::Start).map_err(ScanError::Setup)?;

    let mut map = AlignmentMap::new();
    let mut acc = Accumulator::default();
    let mut line_no: u64 = 0;

    for item in lines {
        line_no += 1;
        let line = item.map_err(|source| ScanError::Read { line_no, source })?;
        let step = machine
            .submit(line.as_ref())
            .map_err(|source| ScanError::Line { line_no, source })?;

        if !step.changed {
            continue;
        }
        match step.extracted {
            Some(Extracted::QueryName(name)) => {
                acc.finalize_into(&mut map);
                // A query header installs a fresh, empty subject map.
                map.insert(name.clone(), BTreeMap::new());
                acc.begin_query(name);
            }
            Some(Extracted::SubjectId(id)) => {
                acc.finalize_into(&mut map);
                acc.begin_subject(id);
            }
            Some(Extracted::Coords(first, last)) => match step.state {
                ParseState::AlignQuery => acc.push_query(first, last),
                ParseState::AlignSubject => acc.push_subject(first, last),
                _ => {}
            },
            None => {}
        }
    }

    // End of input closes the last block.
    acc.finalize_into(&mut map);
    machine.stop();
    log::debug!("scan complete: {} queries over {line_no} lines", map.len());
    Ok(map)
}

//! Result model for scanned reports.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A coordinate interval in file order.
///
/// `start` is the first coordinate seen for a block and `end` the last, both
/// 1-based as printed in the report. They are deliberately *not* normalized:
/// a subject aligned on the minus strand is reported with `start > end`, and
/// that orientation information must survive.
///
/// # Example
///
/// ```rust
/// use blastmap::report::Interval;
///
/// let plus = Interval::new(10, 14);
/// let minus = Interval::new(500, 496);
/// assert_eq!(plus.to_string(), "10..14");
/// assert_eq!(minus.to_string(), "500..496");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    /// First coordinate seen, 1-based.
    pub start: u64,
    /// Last coordinate seen, 1-based.
    pub end: u64,
}

impl Interval {
    /// Create an interval from the first and last coordinates seen.
    pub fn new(start: u64, end: u64) -> Self {
        Self { start, end }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// The aligned intervals of one query/subject pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitSpan {
    /// Interval covered on the query sequence.
    pub query: Interval,
    /// Interval covered on the subject sequence.
    pub subject: Interval,
}

/// Mapping produced by a scan: query id -> subject id -> aligned intervals.
///
/// `BTreeMap` keeps iteration deterministic for whatever serializes the
/// result downstream.
pub type AlignmentMap = BTreeMap<String, BTreeMap<String, HitSpan>>;

//! Line-classification rules for BLAST-style reports.
//!
//! The scanner's whole vocabulary lives here: the parse states, the marker
//! strings that open each kind of line, the named predicate and extractor
//! functions, and the transition table wiring them together. The table is
//! data; the engine in [`crate::engine`] never sees a marker string.
//!
//! Predicates for any one state are mutually exclusive by construction
//! (a line cannot start with two different markers), so the engine's
//! ambiguity check is a safety net, not a normal path.

use crate::core::{Predicate, State, Transition};
use crate::engine::Machine;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Marker opening a query header line (`Query= P00533`).
pub const QUERY_HEADER: &str = "Query= ";
/// Marker opening a subject header line (`>sp|P12345 description`).
pub const SUBJECT_HEADER: &str = ">";
/// Marker opening a query coordinate line (`Query  10  ABCDE  14`).
pub const QUERY_COORDS: &str = "Query ";
/// Marker opening a subject coordinate line (`Sbjct  100  ABCDE  104`).
pub const SUBJECT_COORDS: &str = "Sbjct ";

/// Parse states of the report scanner.
///
/// There is no terminal state; the machine runs until the report is
/// exhausted and is then stopped explicitly.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum ParseState {
    /// Preamble before the first query header.
    Start,
    /// Inside a query's section, before its first subject.
    Query,
    /// A subject header has been seen, coordinates not yet.
    Subject,
    /// The last coordinate line seen was on the query side.
    AlignQuery,
    /// The last coordinate line seen was on the subject side.
    AlignSubject,
}

impl State for ParseState {
    fn name(&self) -> &str {
        match self {
            Self::Start => "Start",
            Self::Query => "Query",
            Self::Subject => "Subject",
            Self::AlignQuery => "AlignQuery",
            Self::AlignSubject => "AlignSubject",
        }
    }
}

/// Value extracted from a marker line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Extracted {
    /// Query name from a `Query= ` header.
    QueryName(String),
    /// Subject identifier from a `>` header.
    SubjectId(String),
    /// First and last numeric tokens of a coordinate line, in file order.
    Coords(u64, u64),
}

/// Extraction failures on lines whose marker matched.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("query header carries no name: {line:?}")]
    EmptyQueryName { line: String },

    #[error("subject header carries no identifier: {line:?}")]
    EmptySubjectId { line: String },

    #[error("coordinate line has no numeric token: {line:?}")]
    NoCoordinates { line: String },
}

/// Transition record specialized to the report rules.
pub type ReportTransition = Transition<ParseState, Extracted, RuleError>;
/// Machine specialized to the report rules.
pub type ReportMachine = Machine<ParseState, Extracted, RuleError>;

// Predicates. Each is total over arbitrary lines; the positive and negative
// forms of a marker pair partition the input for their state.

fn is_preamble(line: &str) -> bool {
    !line.starts_with("Query") && !line.starts_with("Sbjct")
}

fn is_query_header(line: &str) -> bool {
    line.starts_with(QUERY_HEADER)
}

fn is_subject_header(line: &str) -> bool {
    line.starts_with(SUBJECT_HEADER)
}

fn not_subject_header(line: &str) -> bool {
    !line.starts_with(SUBJECT_HEADER)
}

fn is_query_coords(line: &str) -> bool {
    line.starts_with(QUERY_COORDS)
}

fn not_query_coords(line: &str) -> bool {
    !line.starts_with(QUERY_COORDS)
}

fn is_subject_coords(line: &str) -> bool {
    line.starts_with(SUBJECT_COORDS)
}

fn not_subject_coords(line: &str) -> bool {
    !line.starts_with(SUBJECT_COORDS)
}

fn is_alignment_filler(line: &str) -> bool {
    !line.starts_with("Query") && !line.starts_with(SUBJECT_HEADER)
}

// Extractors.

fn extract_query_name(line: &str) -> Result<Extracted, RuleError> {
    let name = line.strip_prefix(QUERY_HEADER).unwrap_or(line).trim();
    if name.is_empty() {
        return Err(RuleError::EmptyQueryName {
            line: line.to_string(),
        });
    }
    Ok(Extracted::QueryName(name.to_string()))
}

fn extract_subject_id(line: &str) -> Result<Extracted, RuleError> {
    line.strip_prefix(SUBJECT_HEADER)
        .unwrap_or(line)
        .split_whitespace()
        .next()
        .map(|id| Extracted::SubjectId(id.to_string()))
        .ok_or_else(|| RuleError::EmptySubjectId {
            line: line.to_string(),
        })
}

fn extract_coords(line: &str) -> Result<Extracted, RuleError> {
    let mut numbers = line
        .split_whitespace()
        .filter_map(|token| token.parse::<u64>().ok());
    let first = numbers.next().ok_or_else(|| RuleError::NoCoordinates {
        line: line.to_string(),
    })?;
    let last = numbers.last().unwrap_or(first);
    Ok(Extracted::Coords(first, last))
}

/// The fixed transition table for BLAST-style reports.
///
/// Constructed once per scan and handed to the machine whole; there is no
/// process-wide rule registry.
pub fn transition_table() -> Vec<ReportTransition> {
    use ParseState::*;
    vec![
        Transition::new(Start, Start, Predicate::When(is_preamble)),
        Transition::extracting(
            Start,
            Query,
            Predicate::When(is_query_header),
            extract_query_name,
        ),
        Transition::new(Query, Query, Predicate::When(not_subject_header)),
        Transition::extracting(
            Query,
            Subject,
            Predicate::When(is_subject_header),
            extract_subject_id,
        ),
        Transition::new(Subject, Subject, Predicate::When(not_query_coords)),
        Transition::extracting(
            Subject,
            AlignQuery,
            Predicate::When(is_query_coords),
            extract_coords,
        ),
        Transition::new(AlignQuery, AlignQuery, Predicate::When(not_subject_coords)),
        Transition::extracting(
            AlignQuery,
            AlignSubject,
            Predicate::When(is_subject_coords),
            extract_coords,
        ),
        Transition::extracting(
            AlignSubject,
            AlignQuery,
            Predicate::When(is_query_coords),
            extract_coords,
        ),
        Transition::extracting(
            AlignSubject,
            Subject,
            Predicate::When(is_subject_header),
            extract_subject_id,
        ),
        Transition::extracting(
            AlignSubject,
            Query,
            Predicate::When(is_query_header),
            extract_query_name,
        ),
        Transition::new(
            AlignSubject,
            AlignSubject,
            Predicate::When(is_alignment_filler),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_header_is_not_a_coordinate_line() {
        assert!(is_query_header("Query= P00533\n"));
        assert!(!is_query_coords("Query= P00533\n"));
        assert!(!is_preamble("Query= P00533\n"));
    }

    #[test]
    fn coordinate_line_is_not_a_header() {
        assert!(is_query_coords("Query  10  ABCDE  14\n"));
        assert!(!is_query_header("Query  10  ABCDE  14\n"));
    }

    #[test]
    fn preamble_accepts_blank_and_banner_lines() {
        assert!(is_preamble("\n"));
        assert!(is_preamble("BLASTP 2.12.0+\n"));
        assert!(!is_preamble("Sbjct  1  A  1\n"));
    }

    #[test]
    fn alignment_filler_excludes_headers_and_query_lines() {
        assert!(is_alignment_filler("           ||||| |||\n"));
        assert!(is_alignment_filler("Sbjct  100  ABCDE  104\n"));
        assert!(!is_alignment_filler(">next subject\n"));
        assert!(!is_alignment_filler("Query  20  FGHIJ  24\n"));
        assert!(!is_alignment_filler("Query= P00533\n"));
    }

    #[test]
    fn extract_query_name_strips_marker_and_trims() {
        assert_eq!(
            extract_query_name("Query= Q8N158 extra description\n"),
            Ok(Extracted::QueryName(
                "Q8N158 extra description".to_string()
            ))
        );
        // Names starting with marker letters survive intact.
        assert_eq!(
            extract_query_name("Query= Query_77\n"),
            Ok(Extracted::QueryName("Query_77".to_string()))
        );
    }

    #[test]
    fn extract_query_name_rejects_blank_header() {
        assert!(matches!(
            extract_query_name("Query=   \n"),
            Err(RuleError::EmptyQueryName { .. })
        ));
    }

    #[test]
    fn extract_subject_id_takes_first_token() {
        assert_eq!(
            extract_subject_id(">sp|P12345|EGFR_HUMAN Epidermal growth factor\n"),
            Ok(Extracted::SubjectId("sp|P12345|EGFR_HUMAN".to_string()))
        );
    }

    #[test]
    fn extract_subject_id_rejects_bare_marker() {
        assert!(matches!(
            extract_subject_id(">  \n"),
            Err(RuleError::EmptySubjectId { .. })
        ));
    }

    #[test]
    fn extract_coords_takes_first_and_last_numeric_tokens() {
        assert_eq!(
            extract_coords("Query  10  ABCDE  14\n"),
            Ok(Extracted::Coords(10, 14))
        );
        assert_eq!(
            extract_coords("Sbjct  500  ABCDE  496\n"),
            Ok(Extracted::Coords(500, 496))
        );
    }

    #[test]
    fn extract_coords_with_single_number_repeats_it() {
        assert_eq!(extract_coords("Query 42\n"), Ok(Extracted::Coords(42, 42)));
    }

    #[test]
    fn extract_coords_rejects_lines_without_numbers() {
        assert!(matches!(
            extract_coords("Query  -----  gap\n"),
            Err(RuleError::NoCoordinates { .. })
        ));
    }

    #[test]
    fn table_covers_every_state_as_a_source() {
        use ParseState::*;
        let table = transition_table();
        assert_eq!(table.len(), 12);
        for state in [Start, Query, Subject, AlignQuery, AlignSubject] {
            assert!(
                table.iter().any(|t| t.from == state),
                "no rule out of {state:?}"
            );
        }
    }

    #[test]
    fn rules_per_state_are_mutually_exclusive_on_real_lines() {
        use ParseState::*;
        let table = transition_table();
        let lines = [
            "BLASTP 2.12.0+\n",
            "\n",
            "Query= P00533\n",
            ">sp|P12345 desc\n",
            "Query  10  ABCDE  14\n",
            "Sbjct  100  ABCDE  104\n",
            "           ||| ||\n",
            "Lambda      K        H\n",
        ];
        for state in [Start, Query, Subject, AlignQuery, AlignSubject] {
            for line in lines {
                let applicable = table.iter().filter(|t| t.applies(&state, line)).count();
                assert!(
                    applicable <= 1,
                    "{applicable} rules apply from {state:?} on {line:?}"
                );
            }
        }
    }
}

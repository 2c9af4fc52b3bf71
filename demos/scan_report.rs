//! Scanning a BLAST report
//!
//! This example scans a small in-memory report and prints the resulting
//! query -> subject -> interval mapping as JSON.
//!
//! Key concepts:
//! - Streaming, line-at-a-time scanning
//! - Intervals kept in file order (minus strand stays reversed)
//! - The mapping is plain serde data for whatever persists it
//!
//! Run with: cargo run --example scan_report

use blastmap::report::scan_lines;

const REPORT: &str = "\
BLASTP 2.12.0+

Query= P00533

Length=1210

>sp|P12345|EGFR_MOUSE Epidermal growth factor receptor
Length=1210

 Score = 2377 bits (6160),  Expect = 0.0

Query  1    MRPSGTAGAALLALLAALCPASRA  24
            MRPSGTAGAALLALLAALCPASRA
Sbjct  1    MRPSGTAGAALLALLAALCPASRA  24

Query  25   LEEKKVCQGTSNKLTQLGTFEDHF  48
            LEEKKVCQGTSNKLTQLGTFEDHF
Sbjct  25   LEEKKVCQGTSNKLTQLGTFEDHF  48

>sp|Q99999|SOME_OTHER Hypothetical protein
Length=400

Query  100  GTSNKLTQL  108
            GTSNKLT L
Sbjct  390  GTSNKLTAL  382

Query= Q8N158

Length=561
";

fn main() {
    println!("=== Scanning a BLAST report ===\n");

    let map = scan_lines(REPORT.lines()).expect("report scans cleanly");

    for (query, subjects) in &map {
        println!("query {query}: {} subject(s)", subjects.len());
        for (subject, hit) in subjects {
            println!("  {subject}: query {}, subject {}", hit.query, hit.subject);
        }
    }

    println!("\nAs JSON:");
    println!("{}", serde_json::to_string_pretty(&map).unwrap());
}

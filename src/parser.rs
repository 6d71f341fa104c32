use log::{debug, warn};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::error::Result;
use crate::problem::{Difficulty, ProblemRecord};

/// Minimum number of positional fields a data line needs
const MIN_FIELDS: usize = 5;

/// Why a single data line was rejected
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RowError {
    #[error("expected at least 5 fields, found {0}")]
    TooFewFields(usize),

    #[error("unrecognized difficulty {0:?}")]
    UnknownDifficulty(String),
}

/// Parse a problem list.
///
/// The first line is a header and is skipped. Each data line is split on
/// every comma (quotes are not an escape mechanism here), in the column order
/// `Difficulty, Title, Frequency, AcceptanceRate, Link, Topics...`.
/// Malformed lines are logged and dropped; they never abort the parse.
pub fn parse_problems(text: &str) -> Vec<ProblemRecord> {
    // the header is whatever the first physical line holds, even if blank
    let body = text.split_once('\n').map_or("", |(_, rest)| rest);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(body.as_bytes());

    let mut records = Vec::new();
    for (idx, row) in reader.records().enumerate() {
        // header is line 1
        let fallback_line = idx as u64 + 2;
        let row = match row {
            Ok(row) => row,
            Err(e) => {
                warn!("skipping unreadable line {fallback_line}: {e}");
                continue;
            }
        };
        let line = row
            .position()
            .map(|p| p.line() + 1)
            .unwrap_or(fallback_line);

        let fields: Vec<&str> = row.iter().collect();
        if fields.iter().all(|f| f.trim().is_empty()) {
            continue;
        }

        match parse_fields(&fields) {
            Ok(record) => records.push(record),
            Err(e) => warn!("skipping line {line}: {e}"),
        }
    }

    debug!("parsed {} problem records", records.len());
    records
}

/// Read and parse a problem list from disk
pub fn load_problems<P: AsRef<Path>>(path: P) -> Result<Vec<ProblemRecord>> {
    let text = fs::read_to_string(path.as_ref())?;
    Ok(parse_problems(&text))
}

/// Build one record from the positional fields of a data line
pub fn parse_fields(fields: &[&str]) -> std::result::Result<ProblemRecord, RowError> {
    if fields.len() < MIN_FIELDS {
        return Err(RowError::TooFewFields(fields.len()));
    }

    let difficulty = Difficulty::parse(fields[0])
        .ok_or_else(|| RowError::UnknownDifficulty(fields[0].to_string()))?;

    Ok(ProblemRecord {
        difficulty,
        title: strip_outer_quotes(fields[1]).to_string(),
        frequency: parse_number(fields[2]),
        acceptance_rate: normalize_acceptance(parse_number(fields[3])),
        link: strip_outer_quotes(fields[4]).to_string(),
        topics: split_topics(&fields[5..]),
    })
}

/// Drop a single leading and a single trailing `"`, if present
pub fn strip_outer_quotes(s: &str) -> &str {
    let s = s.strip_prefix('"').unwrap_or(s);
    s.strip_suffix('"').unwrap_or(s)
}

/// Lenient float parse; anything unparseable becomes NaN
fn parse_number(raw: &str) -> f64 {
    let raw = raw.trim();
    let raw = raw.strip_suffix('%').unwrap_or(raw).trim_end();
    raw.parse::<f64>().unwrap_or(f64::NAN)
}

/// Rates at or below 1 are fractions and get scaled to percent.
/// 1.0 itself counts as a fraction.
pub fn normalize_acceptance(value: f64) -> f64 {
    if value <= 1.0 {
        value * 100.0
    } else {
        value
    }
}

/// Rejoin the trailing fields, strip the outer quotes and split on commas again
fn split_topics(rest: &[&str]) -> Vec<String> {
    let joined = rest.join(",");
    strip_outer_quotes(&joined)
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

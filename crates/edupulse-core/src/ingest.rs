//! CSV roster ingestion.
//!
//! The expected layout is a header line followed by one student per line:
//!
//! ```text
//! Name,Marks,Attendance,StudyHours
//! Alice,85,92,4.5
//! ```
//!
//! The first physical line is always the header, even when it is blank.
//! Comma is the only delimiter and quotes have no special meaning. Rows with
//! fewer than four fields or an empty name are skipped; numeric fields that
//! do not parse become `0`, and an `Infinity` cell stays infinite so the
//! validator rejects it.

use std::path::Path;

use anyhow::{Context, Result};
use csv::{ReaderBuilder, Trim};

use crate::error::PipelineError;
use crate::model::RawStudent;

/// Minimum number of fields a data row needs to be accepted.
const REQUIRED_FIELDS: usize = 4;

/// Parse roster text into fresh records.
///
/// Returns [`PipelineError::InvalidFormat`] when no row is accepted, which
/// includes empty and header-only input.
pub fn parse_roster(text: &str) -> Result<Vec<RawStudent>, PipelineError> {
    let body = text.split_once('\n').map_or("", |(_, rest)| rest);
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All)
        .from_reader(body.as_bytes());

    let mut students = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let line = index + 2;
        let record = match record {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!("skipping line {line}: {e}");
                continue;
            }
        };

        if record.len() < REQUIRED_FIELDS || record[0].is_empty() {
            tracing::debug!(line, fields = record.len(), "skipping incomplete row");
            continue;
        }

        students.push(RawStudent::new(
            &record[0],
            parse_number(&record[1]),
            parse_number(&record[2]),
            parse_number(&record[3]),
        ));
    }

    if students.is_empty() {
        return Err(PipelineError::InvalidFormat);
    }

    tracing::debug!(count = students.len(), "parsed roster");
    Ok(students)
}

/// Read and parse a roster file.
///
/// I/O failures come back as `anyhow` errors; a file without any student
/// rows still downcasts to [`PipelineError::InvalidFormat`].
pub fn load_roster(path: &Path) -> Result<Vec<RawStudent>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read roster file: {}", path.display()))?;
    Ok(parse_roster(&content)?)
}

/// Parse the longest numeric prefix of a field, defaulting to `0`.
///
/// `"85"` → 85, `"4.5h"` → 4.5, `"abc"` → 0, `""` → 0, `"-Infinity"` → -∞.
pub fn parse_number(field: &str) -> f64 {
    let bytes = field.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    if field[end..].starts_with("Infinity") {
        return if bytes.first() == Some(&b'-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }

    if digits == 0 {
        return 0.0;
    }

    // Exponent only counts when it carries at least one digit.
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    field[..end].parse::<f64>().unwrap_or(0.0)
}

//! Pipeline error types.
//!
//! Ingestion and validation failures are surfaced next to the action that
//! caused them and block progression to the analysis view. Insight
//! failures never appear here; the requester absorbs them.

use std::fmt;

use thiserror::Error;

/// Errors raised while importing or saving student records.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    /// The CSV input contained no acceptable rows.
    #[error(
        "invalid file format: no student rows found. Please ensure the CSV matches headers: Name, Marks, Attendance, StudyHours"
    )]
    InvalidFormat,

    /// A record failed a save-time constraint. The whole batch is rejected.
    #[error("invalid record at row {}: {constraint}", .index + 1)]
    InvalidRecord {
        /// Zero-based position of the first offending record.
        index: usize,
        constraint: Constraint,
    },
}

/// A save-time constraint on a student record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    NameRequired,
    MarksRange,
    AttendanceRange,
    StudyHoursNonNegative,
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::NameRequired => write!(f, "name must not be empty"),
            Constraint::MarksRange => write!(f, "marks must be between 0 and 100"),
            Constraint::AttendanceRange => write!(f, "attendance must be between 0 and 100"),
            Constraint::StudyHoursNonNegative => write!(f, "study hours must not be negative"),
        }
    }
}

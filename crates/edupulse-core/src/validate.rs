//! Save-time validation of a student batch.
//!
//! Validation is all or nothing: the first record that breaks a constraint
//! rejects the entire batch.

use crate::error::{Constraint, PipelineError};
use crate::model::RawStudent;

/// Check a whole batch, returning the first violation found.
pub fn validate_batch(students: &[RawStudent]) -> Result<(), PipelineError> {
    for (index, student) in students.iter().enumerate() {
        if let Some(constraint) = check_record(student) {
            tracing::debug!(index, %constraint, "batch rejected");
            return Err(PipelineError::InvalidRecord { index, constraint });
        }
    }
    Ok(())
}

/// Return the first constraint a single record breaks, if any.
///
/// Non-finite numbers never satisfy a range.
pub fn check_record(student: &RawStudent) -> Option<Constraint> {
    if student.name.trim().is_empty() {
        return Some(Constraint::NameRequired);
    }
    if !in_percent_range(student.marks) {
        return Some(Constraint::MarksRange);
    }
    if !in_percent_range(student.attendance) {
        return Some(Constraint::AttendanceRange);
    }
    if !(student.study_hours.is_finite() && student.study_hours >= 0.0) {
        return Some(Constraint::StudyHoursNonNegative);
    }
    None
}

fn in_percent_range(value: f64) -> bool {
    (0.0..=100.0).contains(&value)
}

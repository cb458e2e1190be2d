//! Pass/fail classification and weighted performance score.
//!
//! Both are pure functions of marks and attendance. They are applied to
//! unvalidated input too (live preview), so nothing here can fail.

use crate::model::{DerivedStudent, RawStudent, Status};

/// Minimum marks required to pass.
pub const PASS_MARKS: f64 = 50.0;
/// Minimum attendance percentage required to pass.
pub const PASS_ATTENDANCE: f64 = 75.0;
/// Weight of marks in the performance score.
pub const MARKS_WEIGHT: f64 = 0.7;
/// Weight of attendance in the performance score.
pub const ATTENDANCE_WEIGHT: f64 = 0.3;

/// Pass iff both thresholds are met.
pub fn classify(marks: f64, attendance: f64) -> Status {
    if marks >= PASS_MARKS && attendance >= PASS_ATTENDANCE {
        Status::Pass
    } else {
        Status::Fail
    }
}

/// Weighted score. Study hours do not contribute.
pub fn performance_score(marks: f64, attendance: f64) -> f64 {
    marks * MARKS_WEIGHT + attendance * ATTENDANCE_WEIGHT
}

/// Enrich a single record.
pub fn derive(student: &RawStudent) -> DerivedStudent {
    DerivedStudent {
        status: classify(student.marks, student.attendance),
        performance_score: performance_score(student.marks, student.attendance),
        student: student.clone(),
    }
}

/// Enrich a whole collection, preserving order.
pub fn derive_all(students: &[RawStudent]) -> Vec<DerivedStudent> {
    students.iter().map(derive).collect()
}

//! Core data model types for edupulse.
//!
//! A [`RawStudent`] is what the educator typed or imported. A
//! [`DerivedStudent`] is the same record enriched with its classification
//! and weighted score; it is always recomputed from the raw record and
//! never edited directly.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A single student record as entered manually or parsed from CSV.
///
/// Nothing here is validated on construction. Range checks happen at save
/// time, see [`crate::validate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawStudent {
    /// Opaque unique identifier.
    pub id: Uuid,
    /// Student name.
    pub name: String,
    /// Marks out of 100.
    pub marks: f64,
    /// Attendance percentage.
    pub attendance: f64,
    /// Average study hours per day.
    pub study_hours: f64,
}

impl RawStudent {
    /// Create a record with a freshly generated id.
    pub fn new(name: impl Into<String>, marks: f64, attendance: f64, study_hours: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            marks,
            attendance,
            study_hours,
        }
    }

    /// An empty row, as offered by the data-entry view.
    pub fn blank() -> Self {
        Self::new("", 0.0, 0.0, 0.0)
    }

    /// Apply a single field edit.
    pub fn apply(&mut self, edit: FieldEdit) {
        match edit {
            FieldEdit::Name(name) => self.name = name,
            FieldEdit::Marks(v) => self.marks = v,
            FieldEdit::Attendance(v) => self.attendance = v,
            FieldEdit::StudyHours(v) => self.study_hours = v,
        }
    }
}

/// One edit to one field of a [`RawStudent`].
#[derive(Debug, Clone, PartialEq)]
pub enum FieldEdit {
    Name(String),
    Marks(f64),
    Attendance(f64),
    StudyHours(f64),
}

/// Pass/fail outcome of a student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Pass,
    Fail,
}

impl Status {
    pub fn is_pass(self) -> bool {
        self == Status::Pass
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Pass => write!(f, "Pass"),
            Status::Fail => write!(f, "Fail"),
        }
    }
}

/// A raw record plus its computed status and performance score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedStudent {
    #[serde(flatten)]
    pub student: RawStudent,
    pub status: Status,
    /// `marks * 0.7 + attendance * 0.3`.
    pub performance_score: f64,
}

impl DerivedStudent {
    pub fn name(&self) -> &str {
        &self.student.name
    }
}

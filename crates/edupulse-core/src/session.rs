//! In-memory session state and navigation.
//!
//! The session owns the committed collection of [`RawStudent`]s, the one
//! source of truth. Editing happens on an [`EntryDraft`] opened from the
//! data-entry view; saving validates the draft and commits it wholesale.
//! Derived records and analytics are recomputed on every read.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::PipelineError;
use crate::ingest::parse_roster;
use crate::model::{DerivedStudent, FieldEdit, RawStudent};
use crate::scoring::derive_all;
use crate::statistics::{analyze, AnalysisView};
use crate::validate::validate_batch;

/// The three addressable views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    #[default]
    Home,
    DataEntry,
    Analysis,
}

/// One user session. Nothing is persisted.
#[derive(Debug, Default)]
pub struct Session {
    students: Vec<RawStudent>,
    view: View,
    revision: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn navigate(&mut self, view: View) {
        tracing::debug!(from = ?self.view, to = ?view, "navigate");
        self.view = view;
    }

    /// Committed records.
    pub fn students(&self) -> &[RawStudent] {
        &self.students
    }

    /// Bumped on every commit. Consumers re-request insights when it moves.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Navigate to data entry and open a draft of the committed records.
    pub fn open_entry(&mut self) -> EntryDraft {
        self.navigate(View::DataEntry);
        EntryDraft::from_committed(&self.students)
    }

    /// Validate the draft and commit it, then show the analysis.
    ///
    /// On failure the error is recorded on the draft, the committed
    /// collection is left alone and the view does not change.
    pub fn save(&mut self, draft: &mut EntryDraft) -> Result<(), PipelineError> {
        if let Err(e) = validate_batch(&draft.rows) {
            draft.error = Some(e.clone());
            return Err(e);
        }
        draft.error = None;
        self.students = draft.rows.clone();
        self.revision += 1;
        tracing::info!(count = self.students.len(), revision = self.revision, "records saved");
        self.navigate(View::Analysis);
        Ok(())
    }

    /// Derived projection of the committed records.
    pub fn derived(&self) -> Vec<DerivedStudent> {
        derive_all(&self.students)
    }

    /// Analytics for the committed records, or the empty state.
    pub fn analysis(&self) -> AnalysisView {
        analyze(&self.derived())
    }
}

/// Editable rows held by the data-entry view.
#[derive(Debug, Clone)]
pub struct EntryDraft {
    rows: Vec<RawStudent>,
    error: Option<PipelineError>,
}

impl EntryDraft {
    /// Seed from committed records, or a single blank row when there are none.
    pub fn from_committed(students: &[RawStudent]) -> Self {
        let rows = if students.is_empty() {
            vec![RawStudent::blank()]
        } else {
            students.to_vec()
        };
        Self { rows, error: None }
    }

    pub fn rows(&self) -> &[RawStudent] {
        &self.rows
    }

    /// Error from the last failed import or save, if any.
    pub fn error(&self) -> Option<&PipelineError> {
        self.error.as_ref()
    }

    /// Append a blank row and return its id.
    pub fn add_row(&mut self) -> Uuid {
        let row = RawStudent::blank();
        let id = row.id;
        self.rows.push(row);
        id
    }

    /// Remove a row. The last remaining row cannot be removed.
    pub fn remove_row(&mut self, id: Uuid) -> bool {
        if self.rows.len() <= 1 {
            return false;
        }
        let before = self.rows.len();
        self.rows.retain(|r| r.id != id);
        self.rows.len() != before
    }

    /// Edit one field of one row. Returns `false` if the id is unknown.
    pub fn update(&mut self, id: Uuid, edit: FieldEdit) -> bool {
        match self.rows.iter_mut().find(|r| r.id == id) {
            Some(row) => {
                row.apply(edit);
                true
            }
            None => false,
        }
    }

    /// Replace all rows with the parsed CSV.
    ///
    /// On [`PipelineError::InvalidFormat`] the rows are kept and the error
    /// is recorded.
    pub fn import_csv(&mut self, text: &str) -> Result<usize, PipelineError> {
        match parse_roster(text) {
            Ok(rows) => {
                let count = rows.len();
                self.rows = rows;
                self.error = None;
                Ok(count)
            }
            Err(e) => {
                self.error = Some(e.clone());
                Err(e)
            }
        }
    }

    /// Derived records for the unvalidated rows.
    pub fn preview(&self) -> Vec<DerivedStudent> {
        derive_all(&self.rows)
    }
}

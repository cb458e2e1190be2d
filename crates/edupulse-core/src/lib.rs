//! edupulse-core: student records, scoring pipeline, and analytics.
//!
//! This crate defines the record model and the derivation pipeline that
//! the rest of edupulse builds on: CSV ingestion, save-time validation,
//! pass/fail scoring, aggregation, and insight requests.

pub mod error;
pub mod ingest;
pub mod insight;
pub mod model;
pub mod report;
pub mod scoring;
pub mod session;
pub mod statistics;
pub mod traits;
pub mod validate;

pub use error::{Constraint, PipelineError};

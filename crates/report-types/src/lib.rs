//! Read-only input model for inspection report generation
//!
//! A [`ReportBundle`] is assembled by the caller from the inspection,
//! vessel, observation and photo records and handed to the report
//! engine once per generation request.

pub mod types;

pub use types::{
    FindingsSummary, Inspection, Observation, Person, Photo, PhotoId, ReportBundle, Severity,
    SummaryItem, Vessel,
};

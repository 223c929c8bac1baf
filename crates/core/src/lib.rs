//! Student progress tracker domain logic.
//!
//! Everything in this crate is pure and synchronous: record types, the
//! score-to-grade evaluator, the roster view-model that powers the list
//! page, draft validation, and the state of the create/edit form. I/O
//! lives in the `tracker-client` and `tracker-assistant` crates.

pub mod error;
pub mod form;
pub mod grading;
pub mod names;
pub mod roster;
pub mod routes;
pub mod student;
pub mod types;
pub mod validation;

pub use error::CoreError;
pub use grading::{evaluate, Grade, ScoreCard};
pub use roster::{
    DisplayRecord, FilterCriteria, RosterViewModel, SortDirection, SortField, SortState,
};
pub use student::{StudentDraft, StudentRecord};
pub use types::StudentId;

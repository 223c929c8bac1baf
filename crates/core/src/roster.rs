//! Roster view-model: the data behind the student list page.
//!
//! [`RosterViewModel`] owns the loaded roster and the projection currently
//! on screen. Filtering and sorting go through [`RosterViewModel::apply_filters`],
//! which never touches the roster itself; callers store its output with
//! [`RosterViewModel::refresh`].

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::names::split_name;
use crate::student::StudentRecord;

// ---------------------------------------------------------------------------
// DisplayRecord
// ---------------------------------------------------------------------------

/// A student plus the name parts shown in separate list columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayRecord {
    #[serde(flatten)]
    pub record: StudentRecord,
    pub first_name: String,
    pub last_name: String,
}

impl From<StudentRecord> for DisplayRecord {
    fn from(record: StudentRecord) -> Self {
        let (first_name, last_name) = split_name(&record.name);
        Self {
            record,
            first_name,
            last_name,
        }
    }
}

impl DisplayRecord {
    pub fn id(&self) -> &str {
        &self.record.id
    }
}

// ---------------------------------------------------------------------------
// Filter and sort state
// ---------------------------------------------------------------------------

/// Filters chosen on the list page. Empty strings disable a filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Case-insensitive substring of the full, first, or last name.
    pub name: String,
    /// Exact match against the class number as text.
    pub class: String,
    /// Exact, case-sensitive match against the section.
    pub section: String,
}

impl FilterCriteria {
    fn matches(&self, row: &DisplayRecord) -> bool {
        self.matches_name(row) && self.matches_class(row) && self.matches_section(row)
    }

    fn matches_name(&self, row: &DisplayRecord) -> bool {
        if self.name.is_empty() {
            return true;
        }
        let needle = self.name.to_lowercase();
        [&row.record.name, &row.first_name, &row.last_name]
            .iter()
            .any(|haystack| haystack.to_lowercase().contains(&needle))
    }

    fn matches_class(&self, row: &DisplayRecord) -> bool {
        self.class.is_empty() || row.record.class.to_string() == self.class
    }

    fn matches_section(&self, row: &DisplayRecord) -> bool {
        self.section.is_empty() || row.record.section == self.section
    }
}

/// Sortable columns of the list page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    Id,
    Name,
    FirstName,
    LastName,
    Class,
    Section,
    Math,
    Science,
    English,
    Total,
    Grade,
}

impl SortField {
    pub const ALL: [SortField; 11] = [
        SortField::Id,
        SortField::Name,
        SortField::FirstName,
        SortField::LastName,
        SortField::Class,
        SortField::Section,
        SortField::Math,
        SortField::Science,
        SortField::English,
        SortField::Total,
        SortField::Grade,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Name => "name",
            SortField::FirstName => "firstName",
            SortField::LastName => "lastName",
            SortField::Class => "class",
            SortField::Section => "section",
            SortField::Math => "math",
            SortField::Science => "science",
            SortField::English => "english",
            SortField::Total => "total",
            SortField::Grade => "grade",
        }
    }

    /// Compare two rows on this column's value.
    ///
    /// Text columns compare as strings (the grade by its letter), number
    /// columns numerically.
    fn compare(&self, a: &DisplayRecord, b: &DisplayRecord) -> Ordering {
        let (ra, rb) = (&a.record, &b.record);
        match self {
            SortField::Id => ra.id.cmp(&rb.id),
            SortField::Name => ra.name.cmp(&rb.name),
            SortField::FirstName => a.first_name.cmp(&b.first_name),
            SortField::LastName => a.last_name.cmp(&b.last_name),
            SortField::Class => ra.class.cmp(&rb.class),
            SortField::Section => ra.section.cmp(&rb.section),
            SortField::Math => ra.math.cmp(&rb.math),
            SortField::Science => ra.science.cmp(&rb.science),
            SortField::English => ra.english.cmp(&rb.english),
            SortField::Total => ra.total.cmp(&rb.total),
            SortField::Grade => ra.grade.as_str().cmp(rb.grade.as_str()),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown sort field: {0}")]
pub struct UnknownSortField(pub String);

impl FromStr for SortField {
    type Err = UnknownSortField;

    /// Accepts the camelCase column key or its snake_case spelling.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.replace('_', "").to_ascii_lowercase();
        SortField::ALL
            .into_iter()
            .find(|field| field.as_str().to_ascii_lowercase() == normalized)
            .ok_or_else(|| UnknownSortField(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Current sort column and direction of the list page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub field: Option<SortField>,
    pub direction: SortDirection,
}

impl SortState {
    pub fn by(field: SortField, direction: SortDirection) -> Self {
        Self {
            field: Some(field),
            direction,
        }
    }

    /// Select a column: the active column flips direction, any other
    /// column becomes active in ascending order.
    pub fn toggle(&mut self, field: SortField) {
        if self.field == Some(field) {
            self.direction = self.direction.flipped();
        } else {
            self.field = Some(field);
            self.direction = SortDirection::Asc;
        }
    }

    fn compare(&self, a: &DisplayRecord, b: &DisplayRecord) -> Ordering {
        let Some(field) = self.field else {
            return Ordering::Equal;
        };
        let ordering = field.compare(a, b);
        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

// ---------------------------------------------------------------------------
// RosterViewModel
// ---------------------------------------------------------------------------

/// In-memory roster with its filter drop-down values and visible projection.
#[derive(Debug, Clone, Default)]
pub struct RosterViewModel {
    rows: Vec<DisplayRecord>,
    projection: Vec<DisplayRecord>,
    classes: Vec<u32>,
    sections: Vec<String>,
}

impl RosterViewModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole roster.
    ///
    /// Derives the name parts, recomputes the filter values, and resets the
    /// projection to every row in input order.
    pub fn set_roster(&mut self, records: impl IntoIterator<Item = StudentRecord>) {
        self.rows = records.into_iter().map(DisplayRecord::from).collect();
        self.projection = self.rows.clone();
        self.recompute_filter_values();
    }

    /// Filtered and sorted copy of the roster.
    ///
    /// All three filters must match. Without a sort field the roster order
    /// is kept.
    pub fn apply_filters(&self, criteria: &FilterCriteria, sort: &SortState) -> Vec<DisplayRecord> {
        let mut rows: Vec<DisplayRecord> = self
            .rows
            .iter()
            .filter(|row| criteria.matches(row))
            .cloned()
            .collect();
        if sort.field.is_some() {
            rows.sort_by(|a, b| sort.compare(a, b));
        }
        rows
    }

    /// Recompute and store the visible projection.
    pub fn refresh(&mut self, criteria: &FilterCriteria, sort: &SortState) -> &[DisplayRecord] {
        self.projection = self.apply_filters(criteria, sort);
        &self.projection
    }

    /// Drop a student after the server confirmed the delete.
    ///
    /// Returns whether a row was removed; an unknown id leaves everything
    /// unchanged.
    pub fn remove_by_id(&mut self, id: &str) -> bool {
        let before = self.rows.len();
        self.rows.retain(|row| row.id() != id);
        if self.rows.len() == before {
            return false;
        }
        self.projection.retain(|row| row.id() != id);
        self.recompute_filter_values();
        true
    }

    pub fn rows(&self) -> &[DisplayRecord] {
        &self.rows
    }

    pub fn projection(&self) -> &[DisplayRecord] {
        &self.projection
    }

    /// Distinct class numbers, ascending.
    pub fn classes(&self) -> &[u32] {
        &self.classes
    }

    /// Distinct sections, ascending.
    pub fn sections(&self) -> &[String] {
        &self.sections
    }

    pub fn get(&self, id: &str) -> Option<&DisplayRecord> {
        self.rows.iter().find(|row| row.id() == id)
    }

    pub fn students(&self) -> impl Iterator<Item = &StudentRecord> {
        self.rows.iter().map(|row| &row.record)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn recompute_filter_values(&mut self) {
        self.classes = self
            .rows
            .iter()
            .map(|row| row.record.class)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        self.sections = self
            .rows
            .iter()
            .map(|row| row.record.section.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

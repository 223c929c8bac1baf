//! Navigation targets of the application.

use std::fmt;

use crate::types::StudentId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Student list with filters and sorting.
    List,
    /// Form for adding a new student.
    Create,
    /// Form for editing an existing student.
    Edit(StudentId),
    /// Read-only view of one student.
    Details(StudentId),
}

impl Route {
    /// Resolve a path. The empty path and `/` redirect to the list.
    pub fn parse(path: &str) -> Option<Self> {
        let trimmed = path.trim_matches('/');
        let mut segments = trimmed.split('/');
        let route = match (segments.next(), segments.next()) {
            (Some(""), None) | (Some("students"), None) => Route::List,
            (Some("add-student"), None) => Route::Create,
            (Some("edit"), Some(id)) if !id.is_empty() => Route::Edit(id.to_string()),
            (Some("details"), Some(id)) if !id.is_empty() => Route::Details(id.to_string()),
            _ => return None,
        };
        if segments.next().is_some() {
            return None;
        }
        Some(route)
    }

    pub fn path(&self) -> String {
        match self {
            Route::List => "/students".to_string(),
            Route::Create => "/add-student".to_string(),
            Route::Edit(id) => format!("/edit/{id}"),
            Route::Details(id) => format!("/details/{id}"),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::List => "Student List - Student Progress Tracker",
            Route::Create => "Add New Student - Student Progress Tracker",
            Route::Edit(_) => "Edit Student - Student Progress Tracker",
            Route::Details(_) => "Student Details - Student Progress Tracker",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

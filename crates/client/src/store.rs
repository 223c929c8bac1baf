//! The CRUD interface over student records.

use std::future::Future;

use tracker_core::{StudentDraft, StudentId, StudentRecord};

/// Errors from a [`StudentStore`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, decode).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// No student with this id exists.
    #[error("Student not found: {0}")]
    NotFound(StudentId),

    /// The API answered with a non-2xx status other than 404.
    #[error("Students API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

/// Persistence collaborator for student records.
///
/// Every call either succeeds once or fails once; implementations do not
/// retry.
pub trait StudentStore: Send + Sync {
    /// Fetch the whole roster.
    fn list(&self) -> impl Future<Output = Result<Vec<StudentRecord>, StoreError>> + Send;

    /// Persist a new student. The store assigns the id.
    fn create(
        &self,
        draft: &StudentDraft,
    ) -> impl Future<Output = Result<StudentRecord, StoreError>> + Send;

    /// Fetch one student, failing with [`StoreError::NotFound`] if absent.
    fn read(&self, id: &str) -> impl Future<Output = Result<StudentRecord, StoreError>> + Send;

    /// Replace every field of an existing student.
    fn update(
        &self,
        id: &str,
        draft: &StudentDraft,
    ) -> impl Future<Output = Result<StudentRecord, StoreError>> + Send;

    /// Delete one student.
    fn delete(&self, id: &str) -> impl Future<Output = Result<(), StoreError>> + Send;
}

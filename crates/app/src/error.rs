use tracker_client::StoreError;
use tracker_core::validation::FieldViolation;
use tracker_core::{CoreError, StudentId};

/// Failures surfaced by the page controllers.
///
/// None of them is fatal: each is reported inline or as a toast and the
/// page stays usable.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Loading data failed.
    #[error("Failed to load data: {0}")]
    FetchFailure(StoreError),

    /// A keyed request targeted an id the store does not know.
    #[error("Student not found: {0}")]
    NotFound(StudentId),

    /// Submission was blocked before any request was made.
    #[error(transparent)]
    Validation(#[from] CoreError),

    /// A create, update or delete was rejected.
    #[error("Failed to save changes: {0}")]
    MutationFailure(StoreError),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Classify an error from a read.
    pub fn fetch(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => AppError::NotFound(id),
            other => AppError::FetchFailure(other),
        }
    }

    /// Classify an error from a write.
    pub fn mutation(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => AppError::NotFound(id),
            other => AppError::MutationFailure(other),
        }
    }

    /// Per-field violations of a blocked submission.
    pub fn violations(&self) -> &[FieldViolation] {
        match self {
            AppError::Validation(CoreError::Validation(v)) => v,
            _ => &[],
        }
    }
}

use std::sync::Arc;

use tracker_client::StudentStore;
use tracker_core::DisplayRecord;

use super::MSG_DETAILS_FAILED;
use crate::error::{AppError, AppResult};

/// Read-only view of one student.
pub struct DetailsPage<S> {
    store: Arc<S>,
    student: Option<DisplayRecord>,
    loading: bool,
    error: Option<String>,
}

impl<S: StudentStore> DetailsPage<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            student: None,
            loading: false,
            error: None,
        }
    }

    pub async fn load(&mut self, id: &str) -> AppResult<&DisplayRecord> {
        self.loading = true;
        self.error = None;
        let result = self.store.read(id).await;
        self.loading = false;
        match result {
            Ok(record) => Ok(&*self.student.insert(DisplayRecord::from(record))),
            Err(e) => {
                tracing::warn!(student_id = %id, error = %e, "Failed to load student details");
                self.student = None;
                self.error = Some(MSG_DETAILS_FAILED.to_string());
                Err(AppError::fetch(e))
            }
        }
    }

    pub fn student(&self) -> Option<&DisplayRecord> {
        self.student.as_ref()
    }

    /// CSS class of the grade badge.
    pub fn badge_class(&self) -> Option<&'static str> {
        self.student.as_ref().map(|s| s.record.grade.badge_class())
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

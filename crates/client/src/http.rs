//! REST implementation of [`StudentStore`].
//!
//! Wraps a JSON REST API rooted at a collection URL
//! (e.g. `http://localhost:3000/students`):
//!
//! | Operation | Request                    |
//! |-----------|----------------------------|
//! | list      | `GET    {base}`            |
//! | create    | `POST   {base}`            |
//! | read      | `GET    {base}/{id}`       |
//! | update    | `PUT    {base}/{id}`       |
//! | delete    | `DELETE {base}/{id}`       |

use std::time::Duration;

use reqwest::StatusCode;
use tracker_core::{StudentDraft, StudentRecord};

use crate::store::{StoreError, StudentStore};

/// Default collection URL of the students API.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/students";

/// HTTP client for the students collection.
#[derive(Debug, Clone)]
pub struct HttpStudentStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpStudentStore {
    /// Create a store with its own HTTP client.
    ///
    /// * `base_url` - collection URL; a trailing `/` is ignored.
    /// * `timeout`  - per-request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Create a store reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn record_url(&self, id: &str) -> String {
        format!("{}/{}", self.base_url, id)
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code.
    ///
    /// A 404 on a keyed request becomes [`StoreError::NotFound`]; any other
    /// failure becomes [`StoreError::Api`] with the body text.
    async fn ensure_success(
        response: reqwest::Response,
        id: Option<&str>,
    ) -> Result<reqwest::Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::NOT_FOUND {
            if let Some(id) = id {
                return Err(StoreError::NotFound(id.to_string()));
            }
        }
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        Err(StoreError::Api {
            status: status.as_u16(),
            body,
        })
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
        id: Option<&str>,
    ) -> Result<T, StoreError> {
        let response = Self::ensure_success(response, id).await?;
        Ok(response.json::<T>().await?)
    }
}

impl StudentStore for HttpStudentStore {
    async fn list(&self) -> Result<Vec<StudentRecord>, StoreError> {
        let response = self.client.get(&self.base_url).send().await?;
        let students: Vec<StudentRecord> = Self::parse_response(response, None).await?;
        tracing::debug!(count = students.len(), "Fetched student roster");
        Ok(students)
    }

    async fn create(&self, draft: &StudentDraft) -> Result<StudentRecord, StoreError> {
        let response = self.client.post(&self.base_url).json(draft).send().await?;
        let created: StudentRecord = Self::parse_response(response, None).await?;
        tracing::info!(student_id = %created.id, "Student created");
        Ok(created)
    }

    async fn read(&self, id: &str) -> Result<StudentRecord, StoreError> {
        let response = self.client.get(self.record_url(id)).send().await?;
        Self::parse_response(response, Some(id)).await
    }

    async fn update(&self, id: &str, draft: &StudentDraft) -> Result<StudentRecord, StoreError> {
        let response = self
            .client
            .put(self.record_url(id))
            .json(draft)
            .send()
            .await?;
        let updated: StudentRecord = Self::parse_response(response, Some(id)).await?;
        tracing::info!(student_id = %id, "Student updated");
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let response = self.client.delete(self.record_url(id)).send().await?;
        Self::ensure_success(response, Some(id)).await?;
        tracing::info!(student_id = %id, "Student deleted");
        Ok(())
    }
}

//! In-process [`StudentStore`] used as a test double for the REST API.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use tokio::sync::Mutex;
use tracker_core::{StudentDraft, StudentRecord};

use crate::store::{StoreError, StudentStore};

/// Keeps records in insertion order and assigns increasing numeric ids.
#[derive(Debug, Default)]
pub struct MemoryStudentStore {
    records: Mutex<Vec<StudentRecord>>,
    next_id: AtomicU64,
    failing: AtomicBool,
}

impl MemoryStudentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with existing records. New ids continue after the seed count.
    pub fn with_records(records: Vec<StudentRecord>) -> Self {
        let next_id = records.len() as u64;
        Self {
            records: Mutex::new(records),
            next_id: AtomicU64::new(next_id),
            failing: AtomicBool::new(false),
        }
    }

    /// Make every following call fail with a 500 until reset.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub async fn snapshot(&self) -> Vec<StudentRecord> {
        self.records.lock().await.clone()
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Api {
                status: 500,
                body: "store unavailable".to_string(),
            });
        }
        Ok(())
    }
}

impl StudentStore for MemoryStudentStore {
    async fn list(&self) -> Result<Vec<StudentRecord>, StoreError> {
        self.check_available()?;
        Ok(self.records.lock().await.clone())
    }

    async fn create(&self, draft: &StudentDraft) -> Result<StudentRecord, StoreError> {
        self.check_available()?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let record = StudentRecord::from_draft(id.to_string(), draft.clone());
        self.records.lock().await.push(record.clone());
        Ok(record)
    }

    async fn read(&self, id: &str) -> Result<StudentRecord, StoreError> {
        self.check_available()?;
        self.records
            .lock()
            .await
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn update(&self, id: &str, draft: &StudentDraft) -> Result<StudentRecord, StoreError> {
        self.check_available()?;
        let mut records = self.records.lock().await;
        let slot = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        *slot = StudentRecord::from_draft(id, draft.clone());
        Ok(slot.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.check_available()?;
        let mut records = self.records.lock().await;
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }
}

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use tracker_assistant::{AssistantError, GenerativeModel};
use tracker_client::MemoryStudentStore;
use tracker_core::{StudentDraft, StudentRecord};
use tracker_events::ToastService;

/// Build a record with derived total and grade.
pub fn student(
    id: &str,
    name: &str,
    class: u32,
    section: &str,
    scores: (i64, i64, i64),
) -> StudentRecord {
    StudentRecord::from_draft(
        id,
        StudentDraft::new(name, class, section, scores.0, scores.1, scores.2),
    )
}

/// Three students across two classes and two sections.
pub fn sample_roster() -> Vec<StudentRecord> {
    vec![
        student("1", "John Doe", 10, "A", (95, 90, 92)),
        student("2", "Jane Smith", 10, "B", (70, 65, 80)),
        student("3", "Madonna", 9, "A", (40, 45, 50)),
    ]
}

pub fn seeded_store() -> Arc<MemoryStudentStore> {
    Arc::new(MemoryStudentStore::with_records(sample_roster()))
}

pub fn toasts() -> Arc<ToastService> {
    Arc::new(ToastService::default())
}

pub fn toast_messages(toasts: &ToastService) -> Vec<String> {
    toasts.active().into_iter().map(|t| t.message).collect()
}

/// Model that records every prompt and answers with a fixed text.
/// Clones share the recorded prompts.
#[derive(Clone, Default)]
pub struct RecordingModel {
    prompts: Arc<Mutex<Vec<String>>>,
}

impl RecordingModel {
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl GenerativeModel for RecordingModel {
    async fn generate(&self, prompt: &str) -> Result<String, AssistantError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok("John Doe has the highest total.".to_string())
    }
}

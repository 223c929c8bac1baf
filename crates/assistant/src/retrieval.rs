//! Context supplied to the model alongside each question.
//!
//! No similarity search is performed: [`RosterContext`] hands over every
//! student it was given, and [`NoContext`] hands over nothing.

use std::future::Future;

use tracker_core::StudentRecord;

use crate::error::AssistantError;

/// Leading line of every rendered context block.
pub const CONTEXT_HEADER: &str = "Here is the relevant student data for your analysis:\n\n";

/// Body used when there is nothing to retrieve.
pub const NO_CONTEXT: &str = "No relevant context found.";

/// Source of the context text embedded in each enhanced message.
pub trait ContextRetriever: Send + Sync {
    fn retrieve(&self, query: &str) -> impl Future<Output = Result<String, AssistantError>> + Send;
}

/// Retriever that never has any context.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoContext;

impl ContextRetriever for NoContext {
    async fn retrieve(&self, _query: &str) -> Result<String, AssistantError> {
        Ok(format!("{CONTEXT_HEADER}{NO_CONTEXT}"))
    }
}

/// One student rendered as plain text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextDocument {
    pub student_id: String,
    pub content: String,
}

impl From<&StudentRecord> for ContextDocument {
    fn from(s: &StudentRecord) -> Self {
        let content = format!(
            "Student ID: {}\nName: {}\nClass: {}\nSection: {}\nMath Score: {}\nScience Score: {}\nEnglish Score: {}\nTotal Score: {}\nGrade: {}",
            s.id, s.name, s.class, s.section, s.math, s.science, s.english, s.total, s.grade
        );
        Self {
            student_id: s.id.clone(),
            content,
        }
    }
}

/// Render a roster as context documents, in roster order.
pub fn prepare_documents(students: &[StudentRecord]) -> Vec<ContextDocument> {
    students.iter().map(ContextDocument::from).collect()
}

/// Retriever over a snapshot of the roster.
#[derive(Debug, Clone, Default)]
pub struct RosterContext {
    documents: Vec<ContextDocument>,
}

impl RosterContext {
    pub fn new(students: &[StudentRecord]) -> Self {
        Self {
            documents: prepare_documents(students),
        }
    }

    pub fn documents(&self) -> &[ContextDocument] {
        &self.documents
    }
}

impl ContextRetriever for RosterContext {
    async fn retrieve(&self, query: &str) -> Result<String, AssistantError> {
        tracing::debug!(query, documents = self.documents.len(), "Rendering roster context");
        if self.documents.is_empty() {
            return Ok(format!("{CONTEXT_HEADER}{NO_CONTEXT}"));
        }
        let body = self
            .documents
            .iter()
            .enumerate()
            .map(|(i, doc)| format!("Student {}:\n{}", i + 1, doc.content))
            .collect::<Vec<_>>()
            .join("\n\n");
        Ok(format!("{CONTEXT_HEADER}{body}"))
    }
}

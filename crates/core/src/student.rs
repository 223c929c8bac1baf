//! Student record and draft types.

use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use crate::grading::{evaluate, Grade, ScoreCard};
use crate::types::StudentId;
use crate::validation;

// ---------------------------------------------------------------------------
// StudentRecord
// ---------------------------------------------------------------------------

/// A persisted student as returned by the REST API.
///
/// `total` and `grade` are derived from the scores when a record is read;
/// the values stored on the server are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "WireRecord")]
pub struct StudentRecord {
    /// Server-assigned identity. Numeric ids are accepted and kept as text.
    pub id: StudentId,
    pub name: String,
    pub class: u32,
    pub section: String,
    pub math: i64,
    pub science: i64,
    pub english: i64,
    pub total: i64,
    pub grade: Grade,
}

impl StudentRecord {
    /// Attach a server id to a draft.
    pub fn from_draft(id: impl Into<StudentId>, draft: StudentDraft) -> Self {
        Self {
            id: id.into(),
            name: draft.name,
            class: draft.class,
            section: draft.section,
            math: draft.math,
            science: draft.science,
            english: draft.english,
            total: draft.total,
            grade: draft.grade,
        }
    }

    /// The editable fields of this record, with derived fields recomputed.
    pub fn to_draft(&self) -> StudentDraft {
        StudentDraft::new(
            self.name.clone(),
            self.class,
            self.section.clone(),
            self.math,
            self.science,
            self.english,
        )
    }
}

/// The fields of a stored record that are trusted on read.
#[derive(Deserialize)]
struct WireRecord {
    #[serde(deserialize_with = "deserialize_id")]
    id: StudentId,
    name: String,
    class: u32,
    section: String,
    math: i64,
    science: i64,
    english: i64,
}

impl From<WireRecord> for StudentRecord {
    fn from(wire: WireRecord) -> Self {
        let ScoreCard { total, grade } = evaluate(wire.math, wire.science, wire.english);
        Self {
            id: wire.id,
            name: wire.name,
            class: wire.class,
            section: wire.section,
            math: wire.math,
            science: wire.science,
            english: wire.english,
            total,
            grade,
        }
    }
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<StudentId, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}

// ---------------------------------------------------------------------------
// StudentDraft
// ---------------------------------------------------------------------------

/// A student without an id: the payload of create and update calls.
///
/// Scores are only changed through [`StudentDraft::new`] and the score
/// setters, which re-derive `total` and `grade` on every change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Validate)]
pub struct StudentDraft {
    #[validate(length(min = 2))]
    pub name: String,
    #[validate(range(min = 1, max = 99))]
    pub class: u32,
    #[validate(custom(function = "validation::validate_section"))]
    pub section: String,
    #[validate(range(min = 0, max = 100))]
    math: i64,
    #[validate(range(min = 0, max = 100))]
    science: i64,
    #[validate(range(min = 0, max = 100))]
    english: i64,
    total: i64,
    grade: Grade,
}

impl StudentDraft {
    pub fn new(
        name: impl Into<String>,
        class: u32,
        section: impl Into<String>,
        math: i64,
        science: i64,
        english: i64,
    ) -> Self {
        let ScoreCard { total, grade } = evaluate(math, science, english);
        Self {
            name: name.into(),
            class,
            section: section.into(),
            math,
            science,
            english,
            total,
            grade,
        }
    }

    pub fn math(&self) -> i64 {
        self.math
    }

    pub fn science(&self) -> i64 {
        self.science
    }

    pub fn english(&self) -> i64 {
        self.english
    }

    pub fn total(&self) -> i64 {
        self.total
    }

    pub fn grade(&self) -> Grade {
        self.grade
    }

    pub fn set_math(&mut self, math: i64) {
        self.math = math;
        self.rescore();
    }

    pub fn set_science(&mut self, science: i64) {
        self.science = science;
        self.rescore();
    }

    pub fn set_english(&mut self, english: i64) {
        self.english = english;
        self.rescore();
    }

    fn rescore(&mut self) {
        let ScoreCard { total, grade } = evaluate(self.math, self.science, self.english);
        self.total = total;
        self.grade = grade;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

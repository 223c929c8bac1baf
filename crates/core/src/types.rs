/// Student ids are opaque strings assigned by the REST API.
pub type StudentId = String;

/// Highest score a single subject can carry.
pub const MAX_SUBJECT_SCORE: i64 = 100;

/// Number of graded subjects per student.
pub const SUBJECT_COUNT: i64 = 3;

/// Highest possible total across all subjects.
pub const MAX_TOTAL: i64 = MAX_SUBJECT_SCORE * SUBJECT_COUNT;

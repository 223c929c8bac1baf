//! Draft validation at the input-acceptance boundary.
//!
//! Raw form text is checked first (presence, digit patterns), then the
//! typed [`StudentDraft`] is checked with its `validator` rules. Every
//! violation is reported against the field it belongs to, one per field.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::form::FormField;
use crate::student::StudentDraft;

static CLASS_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{1,2}$").expect("valid regex"));

static SECTION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]$").expect("valid regex"));

pub const CLASS_MESSAGE: &str = "Class must be a number between 1 and 99";
pub const SECTION_MESSAGE: &str = "Section must be a single uppercase letter";

/// A single field-level rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    pub field: String,
    pub rule_type: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(
        field: impl Into<String>,
        rule_type: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            rule_type: rule_type.into(),
            message: message.into(),
        }
    }
}

/// `validator` hook for the section field.
pub fn validate_section(section: &str) -> Result<(), ValidationError> {
    if SECTION_PATTERN.is_match(section) {
        Ok(())
    } else {
        Err(ValidationError::new("pattern"))
    }
}

/// Unparsed text of every editable field, as typed into the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawStudentInput {
    pub name: String,
    pub class: String,
    pub section: String,
    pub math: String,
    pub science: String,
    pub english: String,
}

impl RawStudentInput {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Class => &self.class,
            FormField::Section => &self.section,
            FormField::Math => &self.math,
            FormField::Science => &self.science,
            FormField::English => &self.english,
        }
    }

    pub fn get_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Name => &mut self.name,
            FormField::Class => &mut self.class,
            FormField::Section => &mut self.section,
            FormField::Math => &mut self.math,
            FormField::Science => &mut self.science,
            FormField::English => &mut self.english,
        }
    }
}

impl From<&StudentDraft> for RawStudentInput {
    fn from(draft: &StudentDraft) -> Self {
        Self {
            name: draft.name.clone(),
            class: draft.class.to_string(),
            section: draft.section.clone(),
            math: draft.math().to_string(),
            science: draft.science().to_string(),
            english: draft.english().to_string(),
        }
    }
}

/// Validate raw form input and build a draft from it.
///
/// Returns every violation found; a draft is only produced when there are
/// none.
pub fn parse_draft(input: &RawStudentInput) -> Result<StudentDraft, Vec<FieldViolation>> {
    let mut violations = Vec::new();

    let name = input.name.trim();
    if name.is_empty() {
        violations.push(required("name"));
    }

    let class_text = input.class.trim();
    let class = if class_text.is_empty() {
        violations.push(required("class"));
        None
    } else if !CLASS_PATTERN.is_match(class_text) {
        violations.push(FieldViolation::new("class", "pattern", CLASS_MESSAGE));
        None
    } else {
        class_text.parse::<u32>().ok()
    };

    let section = input.section.trim();
    if section.is_empty() {
        violations.push(required("section"));
    }

    let math = parse_whole_number("math", &input.math, &mut violations);
    let science = parse_whole_number("science", &input.science, &mut violations);
    let english = parse_whole_number("english", &input.english, &mut violations);

    let draft = StudentDraft::new(
        name,
        class.unwrap_or_default(),
        section,
        math.unwrap_or_default(),
        science.unwrap_or_default(),
        english.unwrap_or_default(),
    );

    // Fields that already failed on their raw text are not re-reported.
    let reported: BTreeSet<String> = violations.iter().map(|v| v.field.clone()).collect();
    if let Err(errors) = draft.validate() {
        violations.extend(
            draft_violations(&draft, &errors)
                .into_iter()
                .filter(|v| !reported.contains(&v.field)),
        );
    }

    if violations.is_empty() {
        Ok(draft)
    } else {
        violations.sort_by_key(|v| field_position(&v.field));
        Err(violations)
    }
}

fn draft_violations(draft: &StudentDraft, errors: &ValidationErrors) -> Vec<FieldViolation> {
    errors
        .field_errors()
        .into_iter()
        .filter_map(|(field, field_errors)| {
            let field: &str = field.as_ref();
            field_errors.first().map(|error| match field {
                "name" => FieldViolation::new(
                    "name",
                    error.code.to_string(),
                    "name must be at least 2 characters",
                ),
                "class" => FieldViolation::new("class", error.code.to_string(), CLASS_MESSAGE),
                "section" => {
                    FieldViolation::new("section", error.code.to_string(), SECTION_MESSAGE)
                }
                score_field => score_violation(score_field, score_of(draft, score_field)),
            })
        })
        .collect()
}

fn score_of(draft: &StudentDraft, field: &str) -> i64 {
    match field {
        "math" => draft.math(),
        "science" => draft.science(),
        _ => draft.english(),
    }
}

fn score_violation(field: &str, value: i64) -> FieldViolation {
    if value < 0 {
        FieldViolation::new(field, "min", format!("{field} must be at least 0"))
    } else {
        FieldViolation::new(field, "max", format!("{field} must be at most 100"))
    }
}

fn required(field: &str) -> FieldViolation {
    FieldViolation::new(field, "required", format!("{field} is required"))
}

fn parse_whole_number(
    field: &str,
    text: &str,
    violations: &mut Vec<FieldViolation>,
) -> Option<i64> {
    let text = text.trim();
    if text.is_empty() {
        violations.push(required(field));
        return None;
    }
    match text.parse::<i64>() {
        Ok(v) => Some(v),
        Err(_) => {
            violations.push(FieldViolation::new(field, "type_check", "Invalid format"));
            None
        }
    }
}

fn field_position(field: &str) -> usize {
    FormField::ALL
        .iter()
        .position(|f| f.as_str() == field)
        .unwrap_or(FormField::ALL.len())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

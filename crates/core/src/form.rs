//! State of the create/edit student form.
//!
//! Inputs are kept as the text the user typed. Every score edit re-runs
//! the evaluator before returning, so [`StudentForm::score`] is never
//! stale by the time [`StudentForm::submit`] builds the draft.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::grading::{evaluate_inputs, Grade, ScoreCard};
use crate::student::{StudentDraft, StudentRecord};
use crate::types::StudentId;
use crate::validation::{parse_draft, FieldViolation, RawStudentInput};

// ---------------------------------------------------------------------------
// FormField
// ---------------------------------------------------------------------------

/// User-editable inputs of the form. `total` and `grade` are derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormField {
    Name,
    Class,
    Section,
    Math,
    Science,
    English,
}

impl FormField {
    /// Form order.
    pub const ALL: [FormField; 6] = [
        FormField::Name,
        FormField::Class,
        FormField::Section,
        FormField::Math,
        FormField::Science,
        FormField::English,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Class => "class",
            FormField::Section => "section",
            FormField::Math => "math",
            FormField::Science => "science",
            FormField::English => "english",
        }
    }

    pub fn is_score(&self) -> bool {
        matches!(self, FormField::Math | FormField::Science | FormField::English)
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown form field: {0}")]
pub struct UnknownField(pub String);

impl FromStr for FormField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FormField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// StudentForm
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(StudentId),
}

#[derive(Debug, Clone)]
pub struct StudentForm {
    mode: FormMode,
    input: RawStudentInput,
    score: ScoreCard,
    touched: BTreeSet<FormField>,
    submitted: bool,
}

impl StudentForm {
    pub fn create() -> Self {
        Self::with_mode(FormMode::Create)
    }

    pub fn edit(id: impl Into<StudentId>) -> Self {
        Self::with_mode(FormMode::Edit(id.into()))
    }

    fn with_mode(mode: FormMode) -> Self {
        let input = RawStudentInput::default();
        let score = evaluate_inputs(&input.math, &input.science, &input.english);
        Self {
            mode,
            input,
            score,
            touched: BTreeSet::new(),
            submitted: false,
        }
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn is_edit(&self) -> bool {
        matches!(self.mode, FormMode::Edit(_))
    }

    /// Fill every input from a stored record (edit mode).
    pub fn populate(&mut self, record: &StudentRecord) {
        self.input = RawStudentInput::from(&record.to_draft());
        self.recompute();
    }

    /// Set one input. Score inputs trigger an immediate recompute.
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        *self.input.get_mut(field) = value.into();
        self.touched.insert(field);
        if field.is_score() {
            self.recompute();
        }
    }

    pub fn value(&self, field: FormField) -> &str {
        self.input.get(field)
    }

    pub fn input(&self) -> &RawStudentInput {
        &self.input
    }

    pub fn score(&self) -> ScoreCard {
        self.score
    }

    pub fn total(&self) -> i64 {
        self.score.total
    }

    pub fn grade(&self) -> Grade {
        self.score.grade
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// Current violations of every field, in form order.
    pub fn violations(&self) -> Vec<FieldViolation> {
        parse_draft(&self.input).err().unwrap_or_default()
    }

    pub fn is_valid(&self) -> bool {
        parse_draft(&self.input).is_ok()
    }

    /// Whether a field should be rendered as invalid: it has a violation
    /// and was either edited or a submit was attempted.
    pub fn is_field_invalid(&self, field: FormField) -> bool {
        (self.submitted || self.touched.contains(&field)) && self.error_message(field).is_some()
    }

    pub fn error_message(&self, field: FormField) -> Option<String> {
        self.violations()
            .into_iter()
            .find(|v| v.field == field.as_str())
            .map(|v| v.message)
    }

    /// Validate and build the draft to persist.
    pub fn submit(&mut self) -> Result<StudentDraft, CoreError> {
        self.submitted = true;
        parse_draft(&self.input).map_err(CoreError::Validation)
    }

    fn recompute(&mut self) {
        self.score = evaluate_inputs(&self.input.math, &self.input.science, &self.input.english);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn filled() -> StudentForm {
        let mut form = StudentForm::create();
        form.set(FormField::Name, "John Doe");
        form.set(FormField::Class, "10");
        form.set(FormField::Section, "A");
        form.set(FormField::Math, "85");
        form.set(FormField::Science, "90");
        form.set(FormField::English, "88");
        form
    }

    #[test]
    fn new_form_starts_at_zero() {
        let form = StudentForm::create();
        assert!(!form.is_edit());
        assert_eq!(form.total(), 0);
        assert_eq!(form.grade(), Grade::F);
    }

    #[test]
    fn each_score_edit_recomputes() {
        let mut form = StudentForm::create();
        form.set(FormField::Math, "90");
        assert_eq!(form.total(), 90);
        form.set(FormField::Science, "90");
        assert_eq!(form.total(), 180);
        assert_eq!(form.grade(), Grade::C);
        form.set(FormField::English, "90");
        assert_eq!(form.total(), 270);
        assert_eq!(form.grade(), Grade::APlus);
        form.set(FormField::English, "89");
        assert_eq!(form.grade(), Grade::A);
    }

    #[test]
    fn non_numeric_score_counts_as_zero_in_total() {
        let mut form = filled();
        form.set(FormField::Math, "abc");
        assert_eq!(form.total(), 178);
        assert!(form.is_field_invalid(FormField::Math));
    }

    #[test]
    fn submit_valid_form_yields_consistent_draft() {
        let mut form = filled();
        let draft = form.submit().unwrap();
        assert_eq!(draft.total(), 263);
        assert_eq!(draft.grade(), Grade::A);
        assert_eq!(draft.total(), form.total());
    }

    #[test]
    fn submit_invalid_form_is_blocked() {
        let mut form = StudentForm::create();
        form.set(FormField::Name, "J");
        assert!(!form.is_field_invalid(FormField::Class));

        let err = form.submit().unwrap_err();
        assert_matches!(err, CoreError::Validation(ref v) if v.len() == 6);
        assert!(form.is_submitted());
        assert!(form.is_field_invalid(FormField::Class));
        assert_eq!(
            form.error_message(FormField::Name).as_deref(),
            Some("name must be at least 2 characters")
        );
    }

    #[test]
    fn untouched_fields_are_not_flagged_before_submit() {
        let mut form = StudentForm::create();
        form.set(FormField::Section, "a");
        assert!(form.is_field_invalid(FormField::Section));
        assert!(!form.is_field_invalid(FormField::Name));
    }

    #[test]
    fn populate_fills_inputs_and_recomputes() {
        let draft = StudentDraft::new("Jane Smith", 10, "B", 92, 88, 95);
        let record = StudentRecord::from_draft("2", draft);
        let mut form = StudentForm::edit("2");
        form.populate(&record);
        assert!(form.is_edit());
        assert_eq!(form.mode(), &FormMode::Edit("2".to_string()));
        assert_eq!(form.value(FormField::Name), "Jane Smith");
        assert_eq!(form.value(FormField::Class), "10");
        assert_eq!(form.total(), 275);
        assert_eq!(form.grade(), Grade::APlus);
        assert!(form.is_valid());
    }

    #[test]
    fn form_field_parses() {
        assert_eq!("science".parse::<FormField>(), Ok(FormField::Science));
        assert!("total".parse::<FormField>().is_err());
    }
}

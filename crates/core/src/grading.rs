//! Score evaluator: subject scores to total and letter grade.
//!
//! The evaluator is total over all integer inputs. Range checks belong to
//! [`crate::validation`], not here, so a form can show a live total even
//! while one of its inputs is still out of range.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::MAX_TOTAL;

// ---------------------------------------------------------------------------
// Grade
// ---------------------------------------------------------------------------

/// Letter grade derived from the percentage of the maximum total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "D")]
    D,
    #[serde(rename = "F")]
    F,
}

/// Minimum percentage for each grade, checked from the top down.
const GRADE_THRESHOLDS: [(i64, Grade); 5] = [
    (90, Grade::APlus),
    (80, Grade::A),
    (70, Grade::B),
    (60, Grade::C),
    (50, Grade::D),
];

impl Grade {
    /// Grade for a total out of [`MAX_TOTAL`].
    ///
    /// Compares `total * 100 >= threshold * MAX_TOTAL` so boundaries are
    /// exact (270 is an A+, 269 is an A).
    pub fn for_total(total: i64) -> Self {
        let scaled = total.saturating_mul(100);
        GRADE_THRESHOLDS
            .iter()
            .find(|(percent, _)| scaled >= percent * MAX_TOTAL)
            .map(|(_, grade)| *grade)
            .unwrap_or(Grade::F)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }

    /// CSS class of the badge shown on the details page. `A+` shares the
    /// `A` badge.
    pub fn badge_class(&self) -> &'static str {
        match self {
            Grade::APlus | Grade::A => "grade-a",
            Grade::B => "grade-b",
            Grade::C => "grade-c",
            Grade::D => "grade-d",
            Grade::F => "grade-f",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown grade: {0}")]
pub struct UnknownGrade(pub String);

impl FromStr for Grade {
    type Err = UnknownGrade;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A+" => Ok(Grade::APlus),
            "A" => Ok(Grade::A),
            "B" => Ok(Grade::B),
            "C" => Ok(Grade::C),
            "D" => Ok(Grade::D),
            "F" => Ok(Grade::F),
            other => Err(UnknownGrade(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

/// Derived fields of a student record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreCard {
    pub total: i64,
    pub grade: Grade,
}

/// Sum the three subject scores and grade the result.
pub fn evaluate(math: i64, science: i64, english: i64) -> ScoreCard {
    let total = math.saturating_add(science).saturating_add(english);
    ScoreCard {
        total,
        grade: Grade::for_total(total),
    }
}

/// Evaluate raw text inputs, coercing each with [`parse_score`].
pub fn evaluate_inputs(math: &str, science: &str, english: &str) -> ScoreCard {
    evaluate(parse_score(math), parse_score(science), parse_score(english))
}

/// Permissive integer parse of a form input.
///
/// Skips leading whitespace, accepts an optional sign, then reads digits
/// up to the first non-digit. Input with no leading digits is `0`.
pub fn parse_score(input: &str) -> i64 {
    let trimmed = input.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let magnitude = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i64, |acc, b| {
            acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
        });

    if negative {
        -magnitude
    } else {
        magnitude
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_is_sum_of_subjects() {
        assert_eq!(evaluate(85, 90, 88).total, 263);
        assert_eq!(evaluate(0, 0, 0).total, 0);
        assert_eq!(evaluate(100, 100, 100).total, 300);
    }

    #[test]
    fn grade_boundaries_are_exact() {
        let cases = [
            (300, Grade::APlus),
            (270, Grade::APlus),
            (269, Grade::A),
            (240, Grade::A),
            (239, Grade::B),
            (210, Grade::B),
            (209, Grade::C),
            (180, Grade::C),
            (179, Grade::D),
            (150, Grade::D),
            (149, Grade::F),
            (0, Grade::F),
        ];
        for (total, expected) in cases {
            assert_eq!(Grade::for_total(total), expected, "total {total}");
        }
    }

    #[test]
    fn grade_never_improves_as_total_drops() {
        let mut previous = Grade::for_total(300);
        for total in (0..300).rev() {
            let grade = Grade::for_total(total);
            // Variants are declared best-first, so a worse grade compares greater.
            assert!(grade >= previous, "total {total}");
            previous = grade;
        }
    }

    #[test]
    fn every_in_range_triple_sums() {
        for m in (0..=100).step_by(7) {
            for s in (0..=100).step_by(11) {
                for e in (0..=100).step_by(13) {
                    let card = evaluate(m, s, e);
                    assert_eq!(card.total, m + s + e);
                    assert_eq!(card.grade, Grade::for_total(m + s + e));
                }
            }
        }
    }

    #[test]
    fn out_of_range_inputs_still_evaluate() {
        assert_eq!(evaluate(-10, 0, 0), ScoreCard { total: -10, grade: Grade::F });
        assert_eq!(evaluate(150, 150, 0).grade, Grade::APlus);
        assert_eq!(evaluate(i64::MAX, 1, 1).total, i64::MAX);
    }

    #[test]
    fn parse_score_is_permissive() {
        assert_eq!(parse_score("85"), 85);
        assert_eq!(parse_score("  42"), 42);
        assert_eq!(parse_score("7.9"), 7);
        assert_eq!(parse_score("12abc"), 12);
        assert_eq!(parse_score("-5"), -5);
        assert_eq!(parse_score("+3"), 3);
        assert_eq!(parse_score(""), 0);
        assert_eq!(parse_score("abc"), 0);
        assert_eq!(parse_score("-"), 0);
    }

    #[test]
    fn evaluate_inputs_treats_blank_as_zero() {
        let card = evaluate_inputs("90", "", "x");
        assert_eq!(card.total, 90);
        assert_eq!(card.grade, Grade::F);
    }

    #[test]
    fn grade_round_trips_through_str() {
        for grade in [Grade::APlus, Grade::A, Grade::B, Grade::C, Grade::D, Grade::F] {
            assert_eq!(grade.as_str().parse::<Grade>(), Ok(grade));
        }
        assert_eq!("E".parse::<Grade>(), Err(UnknownGrade("E".to_string())));
    }

    #[test]
    fn grade_serializes_as_letter() {
        assert_eq!(serde_json::to_string(&Grade::APlus).unwrap(), "\"A+\"");
        let parsed: Grade = serde_json::from_str("\"B\"").unwrap();
        assert_eq!(parsed, Grade::B);
    }

    #[test]
    fn a_plus_shares_a_badge() {
        assert_eq!(Grade::APlus.badge_class(), "grade-a");
        assert_eq!(Grade::A.badge_class(), "grade-a");
        assert_eq!(Grade::F.badge_class(), "grade-f");
    }
}

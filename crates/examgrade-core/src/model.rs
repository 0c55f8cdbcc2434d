//! Core data model types for examgrade.
//!
//! The raw, text-block shaped request (`Submission`, `CourseInput`) lives next
//! to the parsed structures the engine works on (`Roster`, `CourseSheet`,
//! `Student`) and the analysis types handed to renderers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::parser::{parse_answer_slots, parse_lines};

/// Which physical answer-sheet layout a student filled in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variant {
    #[default]
    A,
    B,
}

impl Variant {
    /// Lenient conversion used for roster tokens.
    ///
    /// `B`/`b` selects variant B; a missing or unrecognised token means A.
    pub fn from_token(token: Option<&str>) -> Self {
        match token.map(str::trim) {
            Some(t) if t.eq_ignore_ascii_case("b") => Variant::B,
            _ => Variant::A,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::A => write!(f, "A"),
            Variant::B => write!(f, "B"),
        }
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "A" => Ok(Variant::A),
            "B" => Ok(Variant::B),
            other => Err(format!("unknown exam variant: {other}")),
        }
    }
}

/// Classification of one (student, question) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Outcome {
    Correct,
    Wrong,
    NotAnswered,
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// One grading request as entered by the user: raw newline-delimited blocks.
///
/// The roster (`student_names`, `exam_variant`) is shared by every course.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    /// One student name per line.
    #[serde(default)]
    pub student_names: String,
    /// One `A`/`B` token per line, aligned with `student_names`.
    #[serde(default)]
    pub exam_variant: String,
    /// Per-course blocks, graded in this order.
    #[serde(default)]
    pub courses: Vec<CourseInput>,
}

/// Per-course raw input blocks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseInput {
    #[serde(default)]
    pub course_name: String,
    /// One correct letter per line.
    #[serde(default)]
    pub answer_key: String,
    /// 1-based variant-B position per line.
    #[serde(default)]
    pub question_reference_map: String,
    #[serde(default)]
    pub question_topics: String,
    /// One line per student, one character per physical answer.
    #[serde(default)]
    pub student_answers: String,
}

impl CourseInput {
    /// True when every per-course grading field is blank after trimming.
    ///
    /// The course name alone does not make an entry gradable.
    pub fn is_blank(&self) -> bool {
        [
            &self.answer_key,
            &self.question_topics,
            &self.question_reference_map,
            &self.student_answers,
        ]
        .iter()
        .all(|block| block.trim().is_empty())
    }
}

// ---------------------------------------------------------------------------
// Parsed structures
// ---------------------------------------------------------------------------

/// A roster entry shared across all courses of a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    pub name: String,
    pub variant: Variant,
}

/// The shared, read-only student roster.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    pub entries: Vec<RosterEntry>,
}

impl Roster {
    /// Build the roster from the names and variants blocks.
    ///
    /// The roster size is the number of names; variants beyond it are ignored
    /// and missing ones default to A.
    pub fn from_blocks(names: &str, variants: &str) -> Self {
        let variants = parse_lines(variants);
        let entries = parse_lines(names)
            .into_iter()
            .enumerate()
            .map(|(i, name)| RosterEntry {
                name,
                variant: Variant::from_token(variants.get(i).map(String::as_str)),
            })
            .collect();
        Self { entries }
    }

    pub fn from_submission(submission: &Submission) -> Self {
        Self::from_blocks(&submission.student_names, &submission.exam_variant)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pair every roster entry with its answer line (by position).
    ///
    /// A student without a line gets an empty answer sequence.
    pub fn students(&self, answer_lines: &[String]) -> Vec<Student> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, entry)| Student {
                name: entry.name.clone(),
                variant: entry.variant,
                raw_answers: answer_lines
                    .get(i)
                    .map(|line| parse_answer_slots(line))
                    .unwrap_or_default(),
            })
            .collect()
    }
}

/// A student as seen by the grader for a single course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    pub name: String,
    pub variant: Variant,
    /// One slot per physical answer; `None` is a blank (whitespace) slot.
    pub raw_answers: Vec<Option<char>>,
}

impl Student {
    pub fn new(name: impl Into<String>, variant: Variant, answers: &str) -> Self {
        Self {
            name: name.into(),
            variant,
            raw_answers: parse_answer_slots(answers),
        }
    }
}

/// A course with its blocks split into lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseSheet {
    pub course_name: String,
    pub answer_key: Vec<String>,
    pub reference_map: Vec<String>,
    pub topics: Vec<String>,
    pub answer_lines: Vec<String>,
}

impl CourseSheet {
    pub fn parse(input: &CourseInput) -> Self {
        Self {
            course_name: input.course_name.trim().to_string(),
            answer_key: parse_lines(&input.answer_key),
            reference_map: parse_lines(&input.question_reference_map),
            topics: parse_lines(&input.question_topics),
            answer_lines: parse_lines(&input.student_answers),
        }
    }

    pub fn total_questions(&self) -> usize {
        self.answer_key.len()
    }
}

// ---------------------------------------------------------------------------
// Analysis types
// ---------------------------------------------------------------------------

/// Tallies and name lists for one canonical question.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionAnalysis {
    pub correct_count: usize,
    pub wrong_count: usize,
    pub not_answered_count: usize,
    pub correct_students: Vec<String>,
    pub wrong_students: Vec<String>,
    pub not_answered_students: Vec<String>,
}

impl QuestionAnalysis {
    /// Count one outcome for `name`. Name lists are left unsorted.
    pub fn record(&mut self, outcome: Outcome, name: &str) {
        let (count, names) = match outcome {
            Outcome::Correct => (&mut self.correct_count, &mut self.correct_students),
            Outcome::Wrong => (&mut self.wrong_count, &mut self.wrong_students),
            Outcome::NotAnswered => (
                &mut self.not_answered_count,
                &mut self.not_answered_students,
            ),
        };
        *count += 1;
        names.push(name.to_string());
    }

    /// Sort all three name lists ascending.
    pub fn sort_names(&mut self) {
        self.correct_students.sort();
        self.wrong_students.sort();
        self.not_answered_students.sort();
    }

    pub fn total(&self) -> usize {
        self.correct_count + self.wrong_count + self.not_answered_count
    }

    pub fn count(&self, outcome: Outcome) -> usize {
        match outcome {
            Outcome::Correct => self.correct_count,
            Outcome::Wrong => self.wrong_count,
            Outcome::NotAnswered => self.not_answered_count,
        }
    }

    pub fn students(&self, outcome: Outcome) -> &[String] {
        match outcome {
            Outcome::Correct => &self.correct_students,
            Outcome::Wrong => &self.wrong_students,
            Outcome::NotAnswered => &self.not_answered_students,
        }
    }
}

/// Per-student mean counts across a course, rounded to one decimal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallAverages {
    pub correct: f64,
    pub wrong: f64,
    pub not_answered: f64,
}

/// The finished analysis of one course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseAnalysis {
    pub course_name: String,
    pub questions_analysis: Vec<QuestionAnalysis>,
    pub topics: Vec<String>,
    pub question_reference: Vec<String>,
    pub num_students: usize,
    pub total_questions: usize,
    pub overall_averages: OverallAverages,
}

impl CourseAnalysis {
    /// Topic label for a canonical question, if one was given.
    pub fn topic(&self, question: usize) -> Option<&str> {
        self.topics.get(question).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variant_tokens() {
        assert_eq!(Variant::from_token(Some("B")), Variant::B);
        assert_eq!(Variant::from_token(Some(" b ")), Variant::B);
        assert_eq!(Variant::from_token(Some("A")), Variant::A);
        assert_eq!(Variant::from_token(Some("C")), Variant::A);
        assert_eq!(Variant::from_token(None), Variant::A);
        assert_eq!("b".parse::<Variant>().unwrap(), Variant::B);
        assert!("C".parse::<Variant>().is_err());
        assert_eq!(Variant::B.to_string(), "B");
    }

    #[test]
    fn roster_defaults_missing_variants_to_a() {
        let roster = Roster::from_blocks("Ali\nAyse\nCan\n", "B\n\nb");
        assert_eq!(roster.len(), 3);
        assert_eq!(roster.entries[0].variant, Variant::B);
        // blank lines are dropped before alignment, so "b" belongs to Ayse
        assert_eq!(roster.entries[1].variant, Variant::B);
        assert_eq!(roster.entries[2].variant, Variant::A);
    }

    #[test]
    fn roster_students_missing_answer_line_is_empty() {
        let roster = Roster::from_blocks("Ali\nAyse", "");
        let students = roster.students(&["AB".to_string()]);
        assert_eq!(students[0].raw_answers, vec![Some('A'), Some('B')]);
        assert!(students[1].raw_answers.is_empty());
    }

    #[test]
    fn blank_course_ignores_name() {
        let course = CourseInput {
            course_name: "Matematik".into(),
            answer_key: "  \n ".into(),
            ..Default::default()
        };
        assert!(course.is_blank());

        let course = CourseInput {
            question_topics: "Kesirler".into(),
            ..Default::default()
        };
        assert!(!course.is_blank());
    }

    #[test]
    fn question_analysis_record_and_sort() {
        let mut qa = QuestionAnalysis::default();
        qa.record(Outcome::Correct, "Zeynep");
        qa.record(Outcome::Correct, "Ali");
        qa.record(Outcome::NotAnswered, "Can");
        qa.sort_names();
        assert_eq!(qa.correct_students, vec!["Ali", "Zeynep"]);
        assert_eq!(qa.count(Outcome::NotAnswered), 1);
        assert_eq!(qa.total(), 3);
    }

    #[test]
    fn submission_uses_camel_case_fields() {
        let json = r#"{
            "studentNames": "Ali\nAyse",
            "courses": [{ "courseName": "Fen Bilgisi", "answerKey": "A" }]
        }"#;
        let submission: Submission = serde_json::from_str(json).unwrap();
        assert_eq!(submission.courses[0].course_name, "Fen Bilgisi");
        assert!(submission.exam_variant.is_empty());
    }
}

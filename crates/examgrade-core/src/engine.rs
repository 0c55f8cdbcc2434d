//! Grading engine.
//!
//! Classifies every (student, canonical question) pair of a course and folds
//! the outcomes into per-question tallies and a course-level average.

use crate::model::{CourseAnalysis, CourseSheet, Outcome, QuestionAnalysis, Roster, Student};
use crate::resolver::{resolve, Resolution};
use crate::statistics::{aggregate, OutcomeTotals};

/// Literal marker for a question left unanswered. Case-sensitive.
pub const NOT_ANSWERED: char = 'X';

/// Progress reporting trait.
pub trait ProgressReporter {
    fn on_course_start(&self, course: &str, students: usize, questions: usize);
    fn on_course_skipped(&self, index: usize);
    fn on_course_complete(&self, analysis: &CourseAnalysis);
    fn on_run_complete(&self, graded: usize, skipped: usize);
}

/// No-op progress reporter.
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn on_course_start(&self, _: &str, _: usize, _: usize) {}
    fn on_course_skipped(&self, _: usize) {}
    fn on_course_complete(&self, _: &CourseAnalysis) {}
    fn on_run_complete(&self, _: usize, _: usize) {}
}

/// Case-insensitive comparison of one answer character against a key entry.
fn matches_key(answer: char, key: &str) -> bool {
    answer
        .to_uppercase()
        .eq(key.chars().flat_map(char::to_uppercase))
}

/// Classify one student's answer to canonical question `question`.
///
/// A blank or out-of-bounds slot counts as `Wrong`; only the `X` sentinel
/// is `NotAnswered`.
pub fn classify(
    student: &Student,
    question: usize,
    answer_key: &[String],
    reference_map: &[String],
) -> Outcome {
    let resolution = resolve(question, student.variant, reference_map);
    classify_resolved(student, question, resolution, answer_key)
}

fn classify_resolved(
    student: &Student,
    question: usize,
    resolution: Resolution,
    answer_key: &[String],
) -> Outcome {
    let answer = student.raw_answers.get(resolution.index()).copied().flatten();
    let key = answer_key.get(question).map(String::as_str).unwrap_or("");

    match answer {
        Some(NOT_ANSWERED) => Outcome::NotAnswered,
        Some(c) if matches_key(c, key) => Outcome::Correct,
        _ => Outcome::Wrong,
    }
}

/// Grade a whole course against the shared roster.
pub fn grade_course(sheet: &CourseSheet, roster: &Roster) -> CourseAnalysis {
    let total_questions = sheet.total_questions();
    let students = roster.students(&sheet.answer_lines);
    let mut questions = vec![QuestionAnalysis::default(); total_questions];

    for student in &students {
        for (q, analysis) in questions.iter_mut().enumerate() {
            let resolution = resolve(q, student.variant, &sheet.reference_map);
            if resolution.is_fallback() {
                tracing::debug!(
                    course = %sheet.course_name,
                    student = %student.name,
                    question = q + 1,
                    "no usable reference entry, using canonical position"
                );
            }
            let outcome = classify_resolved(student, q, resolution, &sheet.answer_key);
            analysis.record(outcome, &student.name);
        }
    }

    for analysis in &mut questions {
        analysis.sort_names();
    }

    let totals = OutcomeTotals::from_questions(&questions);
    let overall_averages = aggregate(
        totals.correct,
        totals.wrong,
        totals.not_answered,
        students.len(),
    );

    CourseAnalysis {
        course_name: sheet.course_name.clone(),
        questions_analysis: questions,
        topics: sheet.topics.clone(),
        question_reference: sheet.reference_map.clone(),
        num_students: students.len(),
        total_questions,
        overall_averages,
    }
}

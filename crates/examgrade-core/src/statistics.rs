//! Per-course averages and small numeric helpers shared by the renderers.

use crate::model::{OverallAverages, QuestionAnalysis};

/// Round half away from zero to one decimal place.
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Outcome totals summed over every question of a course.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutcomeTotals {
    pub correct: usize,
    pub wrong: usize,
    pub not_answered: usize,
}

impl OutcomeTotals {
    pub fn from_questions(questions: &[QuestionAnalysis]) -> Self {
        questions.iter().fold(Self::default(), |acc, q| Self {
            correct: acc.correct + q.correct_count,
            wrong: acc.wrong + q.wrong_count,
            not_answered: acc.not_answered + q.not_answered_count,
        })
    }
}

/// Mean correct/wrong/unanswered count per student.
///
/// With no students every average is 0.
pub fn aggregate(
    total_correct: usize,
    total_wrong: usize,
    total_not_answered: usize,
    num_students: usize,
) -> OverallAverages {
    if num_students == 0 {
        return OverallAverages::default();
    }

    let per_student = |total: usize| round_one_decimal(total as f64 / num_students as f64);

    OverallAverages {
        correct: per_student(total_correct),
        wrong: per_student(total_wrong),
        not_answered: per_student(total_not_answered),
    }
}

/// Share of `count` in `total` as a percentage; 0 when `total` is 0.
pub fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 * 100.0 / total as f64
    }
}

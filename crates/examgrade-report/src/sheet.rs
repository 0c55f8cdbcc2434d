//! Workbook export: one sheet per course, laid out as a row grid.
//!
//! Each sheet holds a title block, a header row and a value row of averages,
//! then per question a header/topic row, a counts row and three aligned name
//! columns. Sheets are written as tab-separated files so any spreadsheet
//! application can open them.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use examgrade_core::model::{CourseAnalysis, Outcome};
use examgrade_core::GradingReport;

/// Spreadsheet applications cap sheet names at 31 characters.
pub const MAX_SHEET_NAME: usize = 31;

/// A single worksheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Vec<String>>,
}

/// Lay out one course as a sheet grid.
pub fn build_sheet(course: &CourseAnalysis, name: String) -> Sheet {
    let mut rows: Vec<Vec<String>> = Vec::new();
    let avg = &course.overall_averages;

    rows.push(vec![course.course_name.clone()]);
    rows.push(vec![
        "Students".into(),
        course.num_students.to_string(),
        "Questions".into(),
        course.total_questions.to_string(),
    ]);
    rows.push(vec![]);
    rows.push(vec![
        "Average correct".into(),
        "Average wrong".into(),
        "Average not answered".into(),
    ]);
    rows.push(vec![
        format!("{:.1}", avg.correct),
        format!("{:.1}", avg.wrong),
        format!("{:.1}", avg.not_answered),
    ]);
    rows.push(vec![]);

    for (q, qa) in course.questions_analysis.iter().enumerate() {
        rows.push(vec![
            format!("Question {}", q + 1),
            course.topic(q).unwrap_or_default().to_string(),
        ]);
        rows.push(vec![
            "Correct".into(),
            qa.correct_count.to_string(),
            "Wrong".into(),
            qa.wrong_count.to_string(),
            "Not answered".into(),
            qa.not_answered_count.to_string(),
        ]);
        rows.push(vec![
            "Correct students".into(),
            "Wrong students".into(),
            "Not answered students".into(),
        ]);

        let columns = [
            qa.students(Outcome::Correct),
            qa.students(Outcome::Wrong),
            qa.students(Outcome::NotAnswered),
        ];
        let depth = columns.iter().map(|c| c.len()).max().unwrap_or(0);
        for i in 0..depth {
            rows.push(
                columns
                    .iter()
                    .map(|names| names.get(i).cloned().unwrap_or_default())
                    .collect(),
            );
        }
        rows.push(vec![]);
    }

    Sheet { name, rows }
}

/// Make a course name usable as a unique sheet name.
///
/// Forbidden characters become `_`, the result is capped at
/// [`MAX_SHEET_NAME`] characters, and duplicates get a ` (n)` suffix.
pub fn sheet_name(course_name: &str, index: usize, used: &mut HashSet<String>) -> String {
    let cleaned: String = course_name
        .chars()
        .map(|c| if "/\\?*[]:".contains(c) { '_' } else { c })
        .collect();
    let cleaned = cleaned.trim();
    let base: String = if cleaned.is_empty() {
        format!("Course {}", index + 1)
    } else {
        cleaned.chars().take(MAX_SHEET_NAME).collect()
    };

    let mut candidate = base.clone();
    let mut n = 2;
    while !used.insert(candidate.to_lowercase()) {
        let suffix = format!(" ({n})");
        let keep = MAX_SHEET_NAME.saturating_sub(suffix.chars().count());
        candidate = base.chars().take(keep).collect::<String>() + &suffix;
        n += 1;
    }
    candidate
}

/// One sheet per graded course, in report order.
pub fn build_workbook(report: &GradingReport) -> Vec<Sheet> {
    let mut used = HashSet::new();
    report
        .courses
        .iter()
        .enumerate()
        .map(|(i, course)| build_sheet(course, sheet_name(&course.course_name, i, &mut used)))
        .collect()
}

/// Render a sheet as tab-separated text.
pub fn render_tsv(sheet: &Sheet) -> String {
    let mut out = String::new();
    for row in &sheet.rows {
        let cells: Vec<String> = row
            .iter()
            .map(|cell| cell.replace(['\t', '\n', '\r'], " "))
            .collect();
        out.push_str(&cells.join("\t"));
        out.push('\n');
    }
    out
}

/// Write every sheet of the report into `dir`, returning the written paths.
pub fn write_workbook(report: &GradingReport, dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create workbook directory {}", dir.display()))?;

    let mut written = Vec::new();
    for (i, sheet) in build_workbook(report).iter().enumerate() {
        let path = dir.join(format!("{:02}-{}.tsv", i + 1, sheet.name));
        std::fs::write(&path, render_tsv(sheet))
            .with_context(|| format!("failed to write sheet {}", path.display()))?;
        tracing::debug!(sheet = %sheet.name, path = %path.display(), "sheet written");
        written.push(path);
    }
    Ok(written)
}

//! Report assembly and JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::{grade_course, NoopReporter, ProgressReporter};
use crate::model::{CourseAnalysis, CourseSheet, Roster, Submission};

/// Grade every non-blank course of a submission, in input order.
pub fn assemble(submission: &Submission, progress: &dyn ProgressReporter) -> Vec<CourseAnalysis> {
    let roster = Roster::from_submission(submission);
    let mut courses = Vec::new();
    let mut skipped = 0usize;

    for (index, input) in submission.courses.iter().enumerate() {
        if input.is_blank() {
            tracing::debug!(index, "skipping blank course entry");
            progress.on_course_skipped(index);
            skipped += 1;
            continue;
        }

        let sheet = CourseSheet::parse(input);
        progress.on_course_start(&sheet.course_name, roster.len(), sheet.total_questions());

        let analysis = grade_course(&sheet, &roster);
        tracing::debug!(
            course = %analysis.course_name,
            students = analysis.num_students,
            questions = analysis.total_questions,
            "course graded"
        );
        progress.on_course_complete(&analysis);
        courses.push(analysis);
    }

    progress.on_run_complete(courses.len(), skipped);
    courses
}

/// Pure grading entry point: submission in, per-course analyses out.
pub fn grade(submission: &Submission) -> Vec<CourseAnalysis> {
    assemble(submission, &NoopReporter)
}

/// A graded submission, as written to disk and handed to renderers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradingReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// One analysis per graded course, in input order.
    pub courses: Vec<CourseAnalysis>,
}

impl GradingReport {
    pub fn new(courses: Vec<CourseAnalysis>) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            courses,
        }
    }

    /// Find a course by name (case-insensitive).
    pub fn course(&self, name: &str) -> Option<&CourseAnalysis> {
        self.courses
            .iter()
            .find(|c| c.course_name.to_lowercase() == name.to_lowercase())
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: GradingReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }
}

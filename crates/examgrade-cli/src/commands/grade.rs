//! The `examgrade grade` command.

use std::path::PathBuf;

use anyhow::Result;

use examgrade_core::engine::ProgressReporter;
use examgrade_core::model::CourseAnalysis;
use examgrade_core::parser;
use examgrade_core::{assemble, GradingReport};
use examgrade_report::html::write_html_report;
use examgrade_report::sheet::write_workbook;

use crate::config::load_config_from;
use crate::store::DraftStore;

/// Console progress reporter.
struct ConsoleReporter;

impl ProgressReporter for ConsoleReporter {
    fn on_course_start(&self, course: &str, students: usize, questions: usize) {
        eprintln!("  Grading: {course} ({students} students x {questions} questions)");
    }

    fn on_course_skipped(&self, index: usize) {
        eprintln!("  Skipped: course #{} is blank", index + 1);
    }

    fn on_course_complete(&self, analysis: &CourseAnalysis) {
        let avg = &analysis.overall_averages;
        eprintln!(
            "  Done: {} [correct {:.1} / wrong {:.1} / not answered {:.1}]",
            analysis.course_name, avg.correct, avg.wrong, avg.not_answered
        );
    }

    fn on_run_complete(&self, graded: usize, skipped: usize) {
        eprintln!("\nComplete: {graded} course(s) graded, {skipped} blank skipped");
    }
}

pub fn execute(
    input: Option<PathBuf>,
    last: bool,
    output: Option<PathBuf>,
    format: Option<String>,
    config_path: Option<PathBuf>,
    no_save_draft: bool,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let store = DraftStore::new(&config.draft_path);

    let submission = match (&input, last) {
        (Some(path), _) => parser::load_submission(path)?,
        (None, true) => {
            tracing::info!("re-grading last submission from {}", store.path().display());
            store.load()?
        }
        (None, false) => anyhow::bail!("either --input or --last is required"),
    };

    for w in parser::validate_submission(&submission) {
        let prefix = w
            .course
            .as_ref()
            .map(|c| format!("[{c}] "))
            .unwrap_or_default();
        eprintln!("  WARNING: {prefix}{}", w.message);
    }

    let courses = assemble(&submission, &ConsoleReporter);
    if courses.is_empty() {
        tracing::warn!("no gradable courses in submission");
    }
    let report = GradingReport::new(courses);

    print_summary(&report);

    if input.is_some() && config.save_draft && !no_save_draft {
        store.save(&submission)?;
    }

    let output = output.unwrap_or(config.output_dir);
    let format = format.unwrap_or(config.formats);
    std::fs::create_dir_all(&output)?;
    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H%M%S");

    let formats: Vec<&str> = if format == "all" {
        vec!["json", "html", "sheet"]
    } else {
        format.split(',').map(str::trim).collect()
    };

    for fmt in &formats {
        match *fmt {
            "json" => {
                let path = output.join(format!("report-{timestamp}.json"));
                report.save_json(&path)?;
                eprintln!("Results saved to: {}", path.display());
            }
            "html" => {
                let path = output.join(format!("report-{timestamp}.html"));
                write_html_report(&report, &path)?;
                eprintln!("HTML report: {}", path.display());
            }
            "sheet" | "sheets" => {
                let dir = output.join(format!("sheets-{timestamp}"));
                let written = write_workbook(&report, &dir)?;
                eprintln!("Workbook: {} ({} sheet(s))", dir.display(), written.len());
            }
            _ => {
                eprintln!("Unknown format: {fmt}");
            }
        }
    }

    Ok(())
}

fn print_summary(report: &GradingReport) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec![
        "Course",
        "Students",
        "Questions",
        "Avg correct",
        "Avg wrong",
        "Avg not answered",
    ]);

    for course in &report.courses {
        let avg = &course.overall_averages;
        table.add_row(vec![
            Cell::new(&course.course_name),
            Cell::new(course.num_students),
            Cell::new(course.total_questions),
            Cell::new(format!("{:.1}", avg.correct)),
            Cell::new(format!("{:.1}", avg.wrong)),
            Cell::new(format!("{:.1}", avg.not_answered)),
        ]);
    }

    println!("{table}");
}

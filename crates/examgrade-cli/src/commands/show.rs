//! The `examgrade show` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use examgrade_core::model::{CourseAnalysis, Outcome};
use examgrade_core::GradingReport;

pub fn execute(report_path: PathBuf, course: Option<String>) -> Result<()> {
    let report = GradingReport::load_json(&report_path)?;

    let courses: Vec<&CourseAnalysis> = match &course {
        Some(name) => vec![report
            .course(name)
            .ok_or_else(|| anyhow::anyhow!("course '{name}' not found in report"))?],
        None => report.courses.iter().collect(),
    };

    for course in courses {
        print_course(course);
    }

    Ok(())
}

fn print_course(course: &CourseAnalysis) {
    let avg = &course.overall_averages;
    println!(
        "{} ({} students, {} questions)",
        course.course_name, course.num_students, course.total_questions
    );
    println!(
        "Averages: correct {:.1}, wrong {:.1}, not answered {:.1}",
        avg.correct, avg.wrong, avg.not_answered
    );

    let mut table = Table::new();
    table.set_header(vec![
        "#",
        "Topic",
        "Correct",
        "Wrong",
        "Not answered",
        "Not answered by",
    ]);

    for (q, qa) in course.questions_analysis.iter().enumerate() {
        table.add_row(vec![
            Cell::new(q + 1),
            Cell::new(course.topic(q).unwrap_or("-")),
            Cell::new(qa.correct_count),
            Cell::new(qa.wrong_count),
            Cell::new(qa.not_answered_count),
            Cell::new(qa.students(Outcome::NotAnswered).join(", ")),
        ]);
    }

    println!("{table}\n");
}

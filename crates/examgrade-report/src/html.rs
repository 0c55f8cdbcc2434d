//! HTML drill-down report.
//!
//! Produces a self-contained HTML file with all CSS/JS inlined: one section per
//! course, a stacked outcome chart, and a collapsible block per question.

use anyhow::{Context, Result};
use std::path::Path;

use examgrade_core::model::{CourseAnalysis, Outcome, QuestionAnalysis};
use examgrade_core::statistics::percentage;
use examgrade_core::GradingReport;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

const OUTCOMES: [(Outcome, &str, &str); 3] = [
    (Outcome::Correct, "Correct", "correct"),
    (Outcome::Wrong, "Wrong", "wrong"),
    (Outcome::NotAnswered, "Not answered", "blank"),
];

/// Generate an HTML report from a grading report.
pub fn generate_html(report: &GradingReport) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str("<title>examgrade report</title>\n");
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    html.push_str("<header>\n");
    html.push_str("<h1>Exam analysis</h1>\n");
    html.push_str(&format!(
        "<p class=\"meta\">{} course(s) | {}</p>\n",
        report.courses.len(),
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("<button onclick=\"toggleAll(true)\">Expand all</button> ");
    html.push_str("<button onclick=\"toggleAll(false)\">Collapse all</button>\n");
    html.push_str("</header>\n");

    if report.courses.is_empty() {
        html.push_str("<p class=\"meta\">No courses were graded.</p>\n");
    }

    for course in &report.courses {
        html.push_str(&course_section(course));
    }

    html.push_str("<script>\n");
    html.push_str(JS);
    html.push_str("</script>\n");

    html.push_str("</body>\n</html>");
    html
}

fn course_section(course: &CourseAnalysis) -> String {
    let mut html = String::new();
    let avg = &course.overall_averages;

    html.push_str("<section class=\"course\">\n");
    html.push_str(&format!("<h2>{}</h2>\n", html_escape(&course.course_name)));
    html.push_str(&format!(
        "<p class=\"meta\">{} students | {} questions</p>\n",
        course.num_students, course.total_questions
    ));

    html.push_str("<table class=\"summary\">\n");
    html.push_str("<thead><tr><th>Avg correct</th><th>Avg wrong</th><th>Avg not answered</th></tr></thead>\n");
    html.push_str(&format!(
        "<tbody><tr><td class=\"correct\">{:.1}</td><td class=\"wrong\">{:.1}</td><td class=\"blank\">{:.1}</td></tr></tbody>\n",
        avg.correct, avg.wrong, avg.not_answered
    ));
    html.push_str("</table>\n");

    if !course.questions_analysis.is_empty() && course.num_students > 0 {
        html.push_str(&outcome_chart(course));
    }

    for (q, qa) in course.questions_analysis.iter().enumerate() {
        html.push_str(&question_block(course, q, qa));
    }

    html.push_str("</section>\n");
    html
}

fn question_block(course: &CourseAnalysis, q: usize, qa: &QuestionAnalysis) -> String {
    let mut html = String::new();
    let topic = course
        .topic(q)
        .map(|t| format!(" &middot; {}", html_escape(t)))
        .unwrap_or_default();

    html.push_str("<details class=\"question\">\n");
    html.push_str(&format!(
        "<summary>Question {}{} <span class=\"counts\">{} / {} / {}</span></summary>\n",
        q + 1,
        topic,
        qa.correct_count,
        qa.wrong_count,
        qa.not_answered_count
    ));

    html.push_str("<div class=\"columns\">\n");
    for (outcome, label, class) in OUTCOMES {
        let count = qa.count(outcome);
        html.push_str(&format!("<div class=\"column {class}\">\n"));
        html.push_str(&format!(
            "<h4>{label}: {count} ({:.1}%)</h4>\n<ul>\n",
            percentage(count, course.num_students)
        ));
        for name in qa.students(outcome) {
            html.push_str(&format!("<li>{}</li>\n", html_escape(name)));
        }
        html.push_str("</ul>\n</div>\n");
    }
    html.push_str("</div>\n</details>\n");
    html
}

/// One horizontal stacked bar per question: correct, wrong, not answered.
fn outcome_chart(course: &CourseAnalysis) -> String {
    let bar_height = 18;
    let max_width = 400;
    let padding = 6;
    let label_width = 60;

    let total_height = course.questions_analysis.len() * (bar_height + padding) + padding;

    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        label_width + max_width + 20,
        total_height
    );

    for (q, qa) in course.questions_analysis.iter().enumerate() {
        let y = q * (bar_height + padding) + padding;
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" text-anchor=\"end\" dominant-baseline=\"middle\">Q{}</text>\n",
            label_width - 8,
            y + bar_height / 2,
            q + 1
        ));

        let mut x = label_width;
        for (outcome, color) in [
            (Outcome::Correct, "#22c55e"),
            (Outcome::Wrong, "#ef4444"),
            (Outcome::NotAnswered, "#9ca3af"),
        ] {
            let width = qa.count(outcome) * max_width / course.num_students;
            if width > 0 {
                svg.push_str(&format!(
                    "  <rect x=\"{x}\" y=\"{y}\" width=\"{width}\" height=\"{bar_height}\" fill=\"{color}\"/>\n"
                ));
            }
            x += width;
        }
    }

    svg.push_str("</svg>\n");
    svg
}

/// Write an HTML report to a file.
pub fn write_html_report(report: &GradingReport, path: &Path) -> Result<()> {
    let html = generate_html(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)
        .with_context(|| format!("failed to write HTML report to {}", path.display()))?;
    Ok(())
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --correct: #dcfce7; --wrong: #fde2e2; --blank: #f3f4f6; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --correct: #064e3b; --wrong: #7f1d1d; --blank: #1f2937; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
table { border-collapse: collapse; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); }
.correct { background: var(--correct); }
.wrong { background: var(--wrong); }
.blank { background: var(--blank); }
details.question { margin: 0.5rem 0; border: 1px solid var(--border); border-radius: 8px; padding: 0.5rem 1rem; }
summary { cursor: pointer; font-weight: bold; }
.counts { font-weight: normal; color: #6b7280; margin-left: 1rem; }
.columns { display: grid; grid-template-columns: repeat(3, 1fr); gap: 1rem; margin-top: 0.5rem; }
.column { border-radius: 6px; padding: 0.25rem 1rem; }
svg { margin: 1rem 0; }
"#;

const JS: &str = r#"
function toggleAll(open) {
  document.querySelectorAll('details.question').forEach(d => { d.open = open; });
}
"#;

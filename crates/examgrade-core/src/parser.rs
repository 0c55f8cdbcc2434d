//! Text-block parsing and submission loading.
//!
//! `parse_lines` and `parse_answer_slots` never fail. File loading is the only
//! fallible part and lives at the I/O boundary.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};

use crate::model::{CourseSheet, Roster, Submission, Variant};
use crate::resolver::parse_reference_entry;

/// Split a text block into trimmed, non-empty lines, preserving order.
pub fn parse_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Split one student's answer line into physical answer slots.
///
/// Each character is one slot; a whitespace character trims to a blank slot.
pub fn parse_answer_slots(line: &str) -> Vec<Option<char>> {
    line.chars()
        .map(|c| (!c.is_whitespace()).then_some(c))
        .collect()
}

/// Load a submission from a `.toml` or `.json` file.
pub fn load_submission(path: &Path) -> Result<Submission> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read submission file: {}", path.display()))?;

    parse_submission_str(&content, path)
}

/// Parse submission text; the format is picked from `source_path`'s extension.
pub fn parse_submission_str(content: &str, source_path: &Path) -> Result<Submission> {
    match source_path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => serde_json::from_str(content)
            .with_context(|| format!("failed to parse JSON: {}", source_path.display())),
        Some("toml") | None => toml::from_str(content)
            .with_context(|| format!("failed to parse TOML: {}", source_path.display())),
        Some(other) => anyhow::bail!(
            "unsupported submission format '.{other}': {}",
            source_path.display()
        ),
    }
}

/// Load every `.toml`/`.json` submission in a directory (recursively).
///
/// Files that fail to parse are skipped with a warning.
pub fn load_submission_directory(dir: &Path) -> Result<Vec<(String, Submission)>> {
    let mut submissions = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut paths = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    paths.sort();

    for path in paths {
        if path.is_dir() {
            submissions.extend(load_submission_directory(&path)?);
        } else if path
            .extension()
            .is_some_and(|ext| ext == "toml" || ext == "json")
        {
            match load_submission(&path) {
                Ok(submission) => submissions.push((path.display().to_string(), submission)),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(submissions)
}

/// A warning from submission validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The course name (if the warning is course-scoped).
    pub course: Option<String>,
    /// Warning message.
    pub message: String,
}

impl ValidationWarning {
    fn submission(message: impl Into<String>) -> Self {
        Self {
            course: None,
            message: message.into(),
        }
    }
}

/// Check a submission for shape problems that grading would silently absorb.
pub fn validate_submission(submission: &Submission) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let roster = Roster::from_submission(submission);
    let variant_tokens = parse_lines(&submission.exam_variant);

    if roster.is_empty() {
        warnings.push(ValidationWarning::submission("no student names given"));
    }

    if !variant_tokens.is_empty() && variant_tokens.len() != roster.len() {
        warnings.push(ValidationWarning::submission(format!(
            "{} exam variant(s) for {} student(s); missing variants default to A",
            variant_tokens.len(),
            roster.len()
        )));
    }

    for (i, token) in variant_tokens.iter().enumerate() {
        if token.parse::<Variant>().is_err() {
            warnings.push(ValidationWarning::submission(format!(
                "line {}: unrecognised exam variant '{token}', treated as A",
                i + 1
            )));
        }
    }

    let mut seen = HashSet::new();
    for entry in &roster.entries {
        if !seen.insert(entry.name.as_str()) {
            warnings.push(ValidationWarning::submission(format!(
                "duplicate student name: {}",
                entry.name
            )));
        }
    }

    let has_variant_b = roster.entries.iter().any(|e| e.variant == Variant::B);

    for (index, input) in submission.courses.iter().enumerate() {
        if input.is_blank() {
            continue;
        }
        let sheet = CourseSheet::parse(input);
        let label = if sheet.course_name.is_empty() {
            format!("course #{}", index + 1)
        } else {
            sheet.course_name.clone()
        };
        let mut warn = |message: String| {
            warnings.push(ValidationWarning {
                course: Some(label.clone()),
                message,
            })
        };

        if sheet.course_name.is_empty() {
            warn("course name is empty".into());
        }

        let total = sheet.total_questions();
        if total == 0 {
            warn("answer key is empty; no questions will be graded".into());
        }

        for (q, key) in sheet.answer_key.iter().enumerate() {
            if key.chars().count() > 1 {
                warn(format!(
                    "answer key line {} has more than one character: '{key}'",
                    q + 1
                ));
            }
        }

        if sheet.answer_lines.len() != roster.len() {
            warn(format!(
                "{} answer line(s) for {} student(s)",
                sheet.answer_lines.len(),
                roster.len()
            ));
        }

        if !sheet.topics.is_empty() && sheet.topics.len() != total {
            warn(format!(
                "{} topic(s) for {} question(s)",
                sheet.topics.len(),
                total
            ));
        }

        if has_variant_b && sheet.reference_map.len() != total {
            warn(format!(
                "question reference map has {} entr(ies) for {} question(s); \
                 unmapped variant B questions use their canonical position",
                sheet.reference_map.len(),
                total
            ));
        }

        for (q, entry) in sheet.reference_map.iter().enumerate() {
            if parse_reference_entry(entry).is_none() {
                warn(format!(
                    "question reference line {} is not a position: '{entry}'",
                    q + 1
                ));
            }
        }

        let max_reference = sheet
            .reference_map
            .iter()
            .filter_map(|entry| parse_reference_entry(entry))
            .max()
            .unwrap_or(0);

        for student in roster.students(&sheet.answer_lines) {
            let needed = match student.variant {
                Variant::A => total,
                Variant::B => total.max(max_reference),
            };
            if student.raw_answers.len() < needed {
                warn(format!(
                    "{} (variant {}) has {} answer(s), {} expected",
                    student.name,
                    student.variant,
                    student.raw_answers.len(),
                    needed
                ));
            }
        }
    }

    warnings
}

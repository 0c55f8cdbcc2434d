//! Draft snapshot storage: a single JSON file holding the last submission.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use examgrade_core::draft::SubmissionDraft;
use examgrade_core::model::Submission;

pub struct DraftStore {
    path: PathBuf,
}

impl DraftStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the stored snapshot with `submission`.
    pub fn save(&self, submission: &Submission) -> Result<()> {
        let draft = SubmissionDraft::new(submission.clone());
        let json = serde_json::to_string_pretty(&draft).context("failed to serialize draft")?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, json)
            .with_context(|| format!("failed to write draft to {}", self.path.display()))?;
        tracing::debug!("draft saved to {}", self.path.display());
        Ok(())
    }

    /// Load the stored submission verbatim.
    pub fn load(&self) -> Result<Submission> {
        let content = std::fs::read_to_string(&self.path).with_context(|| {
            format!(
                "no saved submission at {} (grade one with --input first)",
                self.path.display()
            )
        })?;
        let draft: SubmissionDraft =
            serde_json::from_str(&content).context("failed to parse draft JSON")?;
        tracing::debug!("loaded draft saved at {}", draft.saved_at);
        Ok(draft.into_submission()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use examgrade_core::model::CourseInput;

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = DraftStore::new(dir.path().join("state/exam-data.json"));
        let submission = Submission {
            student_names: "Ali".into(),
            exam_variant: "B".into(),
            courses: vec![CourseInput {
                course_name: "Matematik".into(),
                answer_key: "A".into(),
                ..Default::default()
            }],
        };

        store.save(&submission).unwrap();
        assert_eq!(store.load().unwrap(), submission);
    }

    #[test]
    fn missing_draft_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = DraftStore::new(dir.path().join("absent.json"));
        let err = store.load().unwrap_err();
        assert!(format!("{err:#}").contains("no saved submission"));
    }

    #[test]
    fn future_version_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("exam-data.json");
        std::fs::write(
            &path,
            r#"{"version": 9, "saved_at": "2025-01-01T00:00:00Z", "submission": {"studentNames": "Ali"}}"#,
        )
        .unwrap();
        let err = DraftStore::new(&path).load().unwrap_err();
        assert!(err.to_string().contains("unsupported draft version 9"));
    }
}

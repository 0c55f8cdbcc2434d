//! Versioned snapshot of the last submitted input.
//!
//! The snapshot is plain data; storing and loading it is the caller's job.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DraftError;
use crate::model::Submission;

/// Current snapshot format version.
pub const CURRENT_VERSION: u32 = 1;

/// The last submitted input, stored verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionDraft {
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    pub submission: Submission,
}

impl SubmissionDraft {
    pub fn new(submission: Submission) -> Self {
        Self {
            version: CURRENT_VERSION,
            saved_at: Utc::now(),
            submission,
        }
    }

    /// Recover the stored submission, rejecting unknown versions.
    pub fn into_submission(self) -> Result<Submission, DraftError> {
        if self.version != CURRENT_VERSION {
            return Err(DraftError::UnsupportedVersion {
                found: self.version,
                expected: CURRENT_VERSION,
            });
        }

        let submission = self.submission;
        let has_courses = submission.courses.iter().any(|c| !c.is_blank());
        if submission.student_names.trim().is_empty() && !has_courses {
            return Err(DraftError::Empty);
        }

        Ok(submission)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CourseInput;

    fn sample() -> Submission {
        Submission {
            student_names: "Ali\nAyse".into(),
            exam_variant: "A\nB".into(),
            courses: vec![CourseInput {
                course_name: "İngilizce".into(),
                answer_key: "A\nB".into(),
                ..Default::default()
            }],
        }
    }

    #[test]
    fn roundtrip_is_verbatim() {
        let draft = SubmissionDraft::new(sample());
        let json = serde_json::to_string(&draft).unwrap();
        let restored: SubmissionDraft = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.version, CURRENT_VERSION);
        assert_eq!(restored.into_submission().unwrap(), sample());
    }

    #[test]
    fn rejects_other_versions() {
        let mut draft = SubmissionDraft::new(sample());
        draft.version = 7;
        let err = draft.into_submission().unwrap_err();
        assert!(matches!(
            err,
            DraftError::UnsupportedVersion {
                found: 7,
                expected: 1
            }
        ));
    }

    #[test]
    fn rejects_empty_snapshot() {
        let draft = SubmissionDraft::new(Submission::default());
        assert!(matches!(draft.into_submission(), Err(DraftError::Empty)));
    }
}

//! Draft snapshot error types.
//!
//! Grading itself never fails; these errors only arise when a stored draft
//! snapshot cannot be turned back into a submission.

use thiserror::Error;

/// Errors that can occur when restoring a stored draft.
#[derive(Debug, Error)]
pub enum DraftError {
    /// The snapshot was written by an incompatible format version.
    #[error("unsupported draft version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    /// The snapshot carries no student names and no course data.
    #[error("draft snapshot is empty")]
    Empty,
}

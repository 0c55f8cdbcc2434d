//! The `examgrade validate` command.

use std::path::PathBuf;

use anyhow::Result;

use examgrade_core::model::Roster;
use examgrade_core::parser;

pub fn execute(input: PathBuf) -> Result<()> {
    let submissions = if input.is_dir() {
        parser::load_submission_directory(&input)?
    } else {
        vec![(
            input.display().to_string(),
            parser::load_submission(&input)?,
        )]
    };

    let mut total_warnings = 0;

    for (source, submission) in &submissions {
        let gradable = submission.courses.iter().filter(|c| !c.is_blank()).count();
        println!(
            "Submission: {} ({} students, {} course(s))",
            source,
            Roster::from_submission(submission).len(),
            gradable
        );

        let warnings = parser::validate_submission(submission);
        for w in &warnings {
            let prefix = w
                .course
                .as_ref()
                .map(|c| format!("  [{c}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All submissions valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}

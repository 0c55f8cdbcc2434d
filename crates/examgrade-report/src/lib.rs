//! examgrade-report: renderers for graded submissions.
//!
//! Everything here consumes a finished `GradingReport`; nothing feeds back
//! into grading.

pub mod html;
pub mod sheet;

pub use html::{generate_html, write_html_report};
pub use sheet::{build_workbook, write_workbook, Sheet};

//! examgrade-core: answer-sheet parsing, variant resolution and grading.
//!
//! This crate defines the request and analysis data model, the pure grading
//! pipeline, and the versioned draft snapshot the CLI persists between runs.

pub mod draft;
pub mod engine;
pub mod error;
pub mod model;
pub mod parser;
pub mod report;
pub mod resolver;
pub mod statistics;

pub use report::{assemble, grade, GradingReport};

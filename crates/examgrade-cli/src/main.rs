//! examgrade CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod store;

#[derive(Parser)]
#[command(name = "examgrade", version, about = "Multiple-choice exam grader with A/B sheet variants")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Grade a submission and write reports
    Grade {
        /// Path to a .toml or .json submission
        #[arg(long, conflicts_with = "last", required_unless_present = "last")]
        input: Option<PathBuf>,

        /// Re-grade the last saved submission
        #[arg(long)]
        last: bool,

        /// Output directory
        #[arg(long)]
        output: Option<PathBuf>,

        /// Output format: json, html, sheet, all (comma-separated)
        #[arg(long)]
        format: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Do not store this submission as the new draft
        #[arg(long)]
        no_save_draft: bool,
    },

    /// Check submission files for shape problems
    Validate {
        /// Path to a submission file or directory
        #[arg(long)]
        input: PathBuf,
    },

    /// Print per-question results from a saved JSON report
    Show {
        /// Report JSON written by `grade`
        #[arg(long)]
        report: PathBuf,

        /// Only show this course
        #[arg(long)]
        course: Option<String>,
    },

    /// Create starter config and example submission
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("examgrade=info,examgrade_core=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Grade {
            input,
            last,
            output,
            format,
            config,
            no_save_draft,
        } => commands::grade::execute(input, last, output, format, config, no_save_draft),
        Commands::Validate { input } => commands::validate::execute(input),
        Commands::Show { report, course } => commands::show::execute(report, course),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

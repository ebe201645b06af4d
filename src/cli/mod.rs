//! CLI argument parsing for pydelta.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Pydelta: line counting and change detection for Python sources.
///
/// Builds a statement tree for each file without executing or importing it,
/// counts physical and logical lines, checks a small coding standard, and
/// compares two versions of a file statement by statement.
#[derive(Parser, Debug)]
#[command(name = "pydelta")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Config file (defaults to ./pydelta.yaml when present).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for pydelta.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compare two versions of a file.
    ///
    /// Reports added, deleted and modified statements, writes annotated
    /// copies next to both inputs, and records metrics for both files.
    Compare(CompareArgs),

    /// Count physical and logical lines of a file.
    ///
    /// Fails with exit code 3 when the file breaks the coding standard.
    Count(CountArgs),

    /// Print the statement tree of a file.
    Tree(FileArgs),

    /// Check a file against the coding standard.
    Check(FileArgs),

    /// Show recorded metrics.
    Metrics(MetricsArgs),
}

/// Arguments for the `compare` command.
#[derive(Parser, Debug)]
pub struct CompareArgs {
    /// Original version.
    pub original: PathBuf,

    /// New version.
    pub new: PathBuf,

    /// Similarity (0.0 to 1.0) at which two statements pair as a modification.
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Print the metrics table for both files.
    #[arg(long)]
    pub table: bool,

    /// Print the metrics table for every recorded file.
    #[arg(long)]
    pub all: bool,

    /// Print added/modified/deleted counts.
    #[arg(long)]
    pub count_changes: bool,

    /// Do not write annotated copies.
    #[arg(long)]
    pub no_annotate: bool,

    /// Print the full change list as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `count` command.
#[derive(Parser, Debug)]
pub struct CountArgs {
    /// Source file to count.
    pub file: PathBuf,

    /// Do not store the result in the metrics store.
    #[arg(long)]
    pub no_record: bool,
}

/// A single source file.
#[derive(Parser, Debug)]
pub struct FileArgs {
    pub file: PathBuf,
}

/// Arguments for the `metrics` command.
#[derive(Parser, Debug)]
pub struct MetricsArgs {
    /// Only show this file name.
    #[arg(long)]
    pub file: Option<String>,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

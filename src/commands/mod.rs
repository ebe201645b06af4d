//! Command implementations for pydelta.
//!
//! The dispatcher resolves configuration once and routes each CLI command to
//! its handler. Handlers print their report to stdout; diagnostics go through
//! `tracing` to stderr.

mod check;
mod compare;
mod count;
mod metrics;
mod tree;


pub use compare::{CompareOutcome, compare};
pub use count::count;

use crate::cli::{Cli, Command};
use crate::config::{Config, DEFAULT_CONFIG_FILE};
use crate::error::{PydeltaError, Result};
use crate::format::wrap_lines;
use crate::source::{read_lines, validate_source};
use crate::standard::check_tree;
use crate::tree::{SyntaxTree, build_tree};
use std::path::Path;
use tracing::{debug, warn};

/// Dispatch a parsed command line to its implementation.
pub fn dispatch(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Compare(args) => compare::cmd_compare(&config, args),
        Command::Count(args) => count::cmd_count(&config, args),
        Command::Tree(args) => tree::cmd_tree(&config, args),
        Command::Check(args) => check::cmd_check(&config, args),
        Command::Metrics(args) => metrics::cmd_metrics(&config, args),
    }
}

/// An explicit `--config` must exist; the implicit `pydelta.yaml` may not.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    match explicit {
        Some(path) => Config::load_or_default(path, true),
        None => Config::load_or_default(DEFAULT_CONFIG_FILE, false),
    }
}

/// Validates, reads, wraps and parses one source file.
///
/// The returned lines are the wrapped ones the tree's line map points into.
pub(crate) fn load_source(path: &Path, config: &Config) -> Result<(Vec<String>, SyntaxTree)> {
    validate_source(path, &config.normalized_extensions())?;
    let lines = wrap_lines(&read_lines(path)?, config.max_line_length);
    let tree = build_tree(&lines);
    debug!(path = %path.display(), lines = lines.len(), nodes = tree.count_nodes(), "loaded source");
    Ok((lines, tree))
}

/// Rejects a file that breaks the coding standard; warnings are only logged.
pub(crate) fn enforce_standard(
    path: &Path,
    tree: &SyntaxTree,
    lines: &[String],
    config: &Config,
) -> Result<()> {
    let standard = check_tree(tree, lines, config.max_line_length)?;
    for warning in &standard.warnings {
        warn!(file = %path.display(), "{}", warning);
    }
    if standard.passed() {
        return Ok(());
    }
    Err(PydeltaError::StandardViolation(format!(
        "{}\n{}",
        path.display(),
        standard.format_error()
    )))
}

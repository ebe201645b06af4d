//! Implementation of the `pydelta check` command.

use super::load_source;
use crate::cli::FileArgs;
use crate::config::Config;
use crate::error::{PydeltaError, Result};
use crate::report;
use crate::standard::{StandardReport, check_tree};

/// Execute the `pydelta check` command.
///
/// Prints every violation and warning, then fails with the standard
/// violation exit code if there was any violation.
pub fn cmd_check(config: &Config, args: FileArgs) -> Result<()> {
    let standard = check(config, &args)?;
    print!("{}", report::standard_report(&args.file.display().to_string(), &standard));

    if standard.passed() {
        Ok(())
    } else {
        Err(PydeltaError::StandardViolation(format!(
            "{} violation(s) in {}",
            standard.violations.len(),
            args.file.display()
        )))
    }
}

pub(crate) fn check(config: &Config, args: &FileArgs) -> Result<StandardReport> {
    let (lines, tree) = load_source(&args.file, config)?;
    check_tree(&tree, &lines, config.max_line_length)
}

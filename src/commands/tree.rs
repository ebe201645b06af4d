//! Implementation of the `pydelta tree` command.

use super::load_source;
use crate::cli::FileArgs;
use crate::config::Config;
use crate::error::Result;
use crate::report;

pub fn cmd_tree(config: &Config, args: FileArgs) -> Result<()> {
    let (_, tree) = load_source(&args.file, config)?;
    print!("{}", report::tree_outline(&tree));
    Ok(())
}

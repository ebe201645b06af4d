//! Implementation of the `pydelta count` command.

use super::{enforce_standard, load_source};
use crate::cli::CountArgs;
use crate::config::Config;
use crate::counters::FileMetrics;
use crate::error::Result;
use crate::history::{Event, EventAction, append_event};
use crate::metrics::MetricsStore;
use crate::report;
use crate::source::file_name;
use serde_json::json;

/// Execute the `pydelta count` command.
pub fn cmd_count(config: &Config, args: CountArgs) -> Result<()> {
    let metrics = count(config, &args)?;
    print!("{}", report::file_metrics(&metrics));
    Ok(())
}

/// Counts one file after checking it against the standard.
///
/// Files that break the standard are rejected before anything is recorded.
pub fn count(config: &Config, args: &CountArgs) -> Result<FileMetrics> {
    let (lines, tree) = load_source(&args.file, config)?;

    enforce_standard(&args.file, &tree, &lines, config)?;

    let metrics = FileMetrics::from_tree(file_name(&args.file), &tree);

    if !args.no_record {
        MetricsStore::load(&config.metrics_path)?.record(metrics.clone())?;
    }

    let event = Event::new(EventAction::Count).with_details(json!({
        "file": args.file.display().to_string(),
        "physical_lines": metrics.physical_lines,
        "logical_lines": metrics.logical_lines,
        "recorded": !args.no_record,
    }));
    append_event(&config.history_path, &event)?;

    Ok(metrics)
}

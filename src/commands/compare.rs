//! Implementation of the `pydelta compare` command.

use super::{enforce_standard, load_source};
use crate::annotate::{annotate, write_annotated};
use crate::cli::CompareArgs;
use crate::config::Config;
use crate::counters::FileMetrics;
use crate::diff::{Change, ChangeSummary, DiffSession};
use crate::error::{PydeltaError, Result};
use crate::history::{Event, EventAction, append_event};
use crate::metrics::MetricsStore;
use crate::report;
use crate::source::file_name;
use serde::Serialize;
use serde_json::json;
use std::path::PathBuf;
use tracing::info;

/// Everything a comparison produced.
#[derive(Debug, Serialize)]
pub struct CompareOutcome {
    pub original: FileMetrics,
    pub new: FileMetrics,
    pub summary: ChangeSummary,
    pub changes: Vec<Change>,
    /// Annotated copies of the original and new file, when written.
    pub annotated: Option<(PathBuf, PathBuf)>,
}

/// Execute the `pydelta compare` command.
pub fn cmd_compare(config: &Config, args: CompareArgs) -> Result<()> {
    let outcome = compare(config, &args)?;

    if args.json {
        let json = serde_json::to_string_pretty(&outcome).map_err(|e| {
            PydeltaError::UserError(format!("failed to serialize comparison: {}", e))
        })?;
        println!("{}", json);
        return Ok(());
    }

    println!(
        "{}",
        report::change_summary_line(
            &outcome.original.file_name,
            &outcome.new.file_name,
            &outcome.summary
        )
    );
    if let Some((original, new)) = &outcome.annotated {
        println!("Annotated: {}", original.display());
        println!("Annotated: {}", new.display());
    }

    if args.count_changes {
        println!();
        print!("{}", report::change_counts(&outcome.summary));
    }
    if args.table {
        println!();
        print!("{}", report::metrics_table([&outcome.original, &outcome.new]));
    }
    if args.all {
        let store = MetricsStore::load(&config.metrics_path)?;
        println!();
        print!(
            "{}",
            report::metrics_table(store.all().into_iter().map(|entry| &entry.metrics))
        );
    }

    Ok(())
}

/// Runs a comparison: diff, annotated copies, metrics and history.
///
/// Both files must pass the coding standard before anything is diffed or
/// written.
pub fn compare(config: &Config, args: &CompareArgs) -> Result<CompareOutcome> {
    let config = config.clone().with_threshold(args.threshold)?;

    let (original_lines, original_tree) = load_source(&args.original, &config)?;
    let (new_lines, new_tree) = load_source(&args.new, &config)?;
    enforce_standard(&args.original, &original_tree, &original_lines, &config)?;
    enforce_standard(&args.new, &new_tree, &new_lines, &config)?;

    let changes =
        DiffSession::new(&original_tree, &new_tree, config.similarity_threshold).run();
    let summary = ChangeSummary::from_changes(&changes);
    info!(
        original = %args.original.display(),
        new = %args.new.display(),
        changes = changes.len(),
        "compared sources"
    );

    let annotated = if args.no_annotate {
        None
    } else {
        let (marked_original, marked_new) = annotate(
            &original_lines,
            original_tree.line_map(),
            &new_lines,
            new_tree.line_map(),
            &changes,
        );
        Some((
            write_annotated(&args.original, &config.annotated_suffix, &marked_original)?,
            write_annotated(&args.new, &config.annotated_suffix, &marked_new)?,
        ))
    };

    let original = FileMetrics::from_tree(file_name(&args.original), &original_tree);
    let new = FileMetrics::from_tree(file_name(&args.new), &new_tree);
    let mut store = MetricsStore::load(&config.metrics_path)?;
    store.record(original.clone())?;
    store.record(new.clone())?;

    let event = Event::new(EventAction::Compare).with_details(json!({
        "original": args.original.display().to_string(),
        "new": args.new.display().to_string(),
        "threshold": config.similarity_threshold,
        "added_new": summary.added_new,
        "added_modified": summary.added_modified,
        "deleted": summary.deleted,
    }));
    append_event(&config.history_path, &event)?;

    Ok(CompareOutcome {
        original,
        new,
        summary,
        changes,
        annotated,
    })
}

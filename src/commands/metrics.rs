//! Implementation of the `pydelta metrics` command.

use crate::cli::MetricsArgs;
use crate::config::Config;
use crate::error::{PydeltaError, Result};
use crate::metrics::MetricsStore;
use crate::report;

pub fn cmd_metrics(config: &Config, args: MetricsArgs) -> Result<()> {
    let store = MetricsStore::load(&config.metrics_path)?;

    match args.file {
        Some(name) => {
            let entry = store.get(&name).ok_or_else(|| {
                PydeltaError::UserError(format!(
                    "no metrics recorded for '{}' in '{}'",
                    name,
                    store.path().display()
                ))
            })?;
            print!("{}", report::file_metrics(&entry.metrics));
            println!("  Updated: {}", entry.updated_at.to_rfc3339());
        }
        None if store.is_empty() => {
            println!("No metrics recorded yet.");
        }
        None => {
            print!(
                "{}",
                report::metrics_table(store.all().into_iter().map(|entry| &entry.metrics))
            );
        }
    }

    Ok(())
}

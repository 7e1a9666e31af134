//! Stats command implementation

use crate::cli::output::{format_stats_json, format_stats_table};
use crate::cli::StatsArgs;
use crate::stats::StatsTracker;
use crate::storage::Storage;
use std::sync::Arc;

/// Handle `pethotel-chat stats` command
pub fn handle_stats(
    args: &StatsArgs,
    storage: Arc<dyn Storage>,
    stats_key: &str,
) -> Result<String, Box<dyn std::error::Error>> {
    let mut tracker = StatsTracker::restore(storage, stats_key);

    if args.reset {
        tracker.reset()?;
        return Ok("✓ Statistics cleared".to_string());
    }

    let snapshot = tracker.snapshot();
    if args.json {
        Ok(format_stats_json(&snapshot)?)
    } else {
        Ok(format_stats_table(&snapshot))
    }
}

//! Progress logging utilities.

use log::info;

use crate::error_handling::ImportStats;

/// Logs progress of the running import.
///
/// # Arguments
///
/// * `stats` - Counters of the running job
/// * `pending` - Inserts currently in flight
/// * `total_records` - Non-blank lines counted before the import started
pub fn log_progress(stats: &ImportStats, pending: usize, total_records: usize) {
    let elapsed_secs = stats.elapsed().as_secs_f64();
    let completed = stats.completed();
    let rate = if elapsed_secs > 0.0 {
        completed as f64 / elapsed_secs
    } else {
        0.0
    };
    info!(
        "Inserted {} elements ({} failed, {} in flight) from {} lines in {:.2} seconds (~{:.2} inserts/sec)",
        stats.successful(),
        stats.failed(),
        pending,
        total_records,
        elapsed_secs,
        rate
    );
}

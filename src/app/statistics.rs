//! Final statistics printing.

use log::{info, warn};

use crate::run::ImportReport;

/// Prints error and warning counts of a finished import to the log.
pub fn print_import_statistics(report: &ImportReport) {
    info!(
        "Import statistics: successful={}, failed={}, retries={}",
        report.successful, report.failed, report.retries
    );

    if report.failed > 0 {
        info!("Error Counts ({} total):", report.failed);
        for (error_type, count) in &report.errors {
            info!("   {}: {}", error_type.as_str(), count);
        }
    }

    if !report.warnings.is_empty() {
        let total: usize = report.warnings.iter().map(|(_, count)| count).sum();
        warn!("Warning Counts ({} total):", total);
        for (message, count) in &report.warnings {
            warn!("   {} (x{})", message, count);
        }
    }
}

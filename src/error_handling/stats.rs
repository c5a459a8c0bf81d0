//! Import job statistics.
//!
//! Tracks the outcome of every insert of one job, plus the warnings raised
//! while building queries. The job runs on a single task, so the counters
//! are plain fields updated through `&mut self`.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use strum::IntoEnumIterator;

use super::types::{ClientError, ErrorType};
use crate::run::ImportReport;

/// Deduplicated warning messages with their occurrence counts.
#[derive(Debug, Default)]
pub struct WarningTally {
    counts: HashMap<String, usize>,
}

impl WarningTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, message: impl Into<String>) {
        *self.counts.entry(message.into()).or_insert(0) += 1;
    }

    pub fn get_count(&self, message: &str) -> usize {
        self.counts.get(message).copied().unwrap_or(0)
    }

    /// Number of warnings recorded, duplicates included.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Messages sorted by descending count, then lexicographically.
    pub fn sorted(&self) -> Vec<(String, usize)> {
        let mut result: Vec<(String, usize)> = self
            .counts
            .iter()
            .map(|(message, count)| (message.clone(), *count))
            .collect();
        result.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        result
    }
}

/// Counters of one import job.
///
/// # Categories
///
/// - **Successes**: inserts acknowledged by the store
/// - **Errors**: inserts the store rejected, by `ErrorType`
/// - **Retries**: extra attempts spent on transient conflicts
/// - **Warnings**: query-building notices (e.g. renamed properties)
#[derive(Debug)]
pub struct ImportStats {
    started_at: DateTime<Utc>,
    started: Instant,
    successful: usize,
    retries: usize,
    errors: HashMap<ErrorType, usize>,
    warnings: WarningTally,
}

impl ImportStats {
    pub fn new() -> Self {
        let mut errors = HashMap::new();
        for error in ErrorType::iter() {
            errors.insert(error, 0);
        }

        ImportStats {
            started_at: Utc::now(),
            started: Instant::now(),
            successful: 0,
            retries: 0,
            errors,
            warnings: WarningTally::new(),
        }
    }

    pub fn record_success(&mut self, retries: usize) {
        self.successful += 1;
        self.retries += retries;
    }

    pub fn record_failure(&mut self, error: &ClientError, retries: usize) {
        *self.errors.entry(error.error_type()).or_insert(0) += 1;
        self.retries += retries;
    }

    pub fn warnings_mut(&mut self) -> &mut WarningTally {
        &mut self.warnings
    }

    pub fn warnings(&self) -> &WarningTally {
        &self.warnings
    }

    pub fn successful(&self) -> usize {
        self.successful
    }

    pub fn failed(&self) -> usize {
        self.errors.values().sum()
    }

    pub fn retries(&self) -> usize {
        self.retries
    }

    /// Inserts that have finished, whatever their outcome.
    pub fn completed(&self) -> usize {
        self.successful + self.failed()
    }

    pub fn get_error_count(&self, error: ErrorType) -> usize {
        self.errors.get(&error).copied().unwrap_or(0)
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Freezes the counters into the job's final report.
    pub fn into_report(self) -> ImportReport {
        let errors = ErrorType::iter()
            .map(|error| (error, self.get_error_count(error)))
            .filter(|(_, count)| *count > 0)
            .collect();

        ImportReport {
            successful: self.successful,
            failed: self.failed(),
            retries: self.retries,
            errors,
            warnings: self.warnings.sorted(),
            started_at: self.started_at,
            finished_at: Utc::now(),
            elapsed: self.started.elapsed(),
        }
    }
}

impl Default for ImportStats {
    fn default() -> Self {
        Self::new()
    }
}

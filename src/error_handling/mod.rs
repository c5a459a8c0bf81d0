//! Error handling and import statistics.
//!
//! This module provides:
//! - The fatal error taxonomy of an import job
//! - Per-record client failures and their categories
//! - Job statistics (successes, failures, retries, warnings)
//! - Failure classification and the retry strategy

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::{classify_failure, get_retry_strategy};
pub use stats::{ImportStats, WarningTally};
pub use types::{
    ClientError, ConfigurationError, ErrorType, ImportError, InitializationError,
    TransactionError, TypeCoercionError,
};

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_import_stats_initialization() {
        let stats = ImportStats::new();
        for error_type in ErrorType::iter() {
            assert_eq!(stats.get_error_count(error_type), 0);
        }
        assert_eq!(stats.successful(), 0);
        assert_eq!(stats.failed(), 0);
        assert!(stats.warnings().is_empty());
    }

    #[test]
    fn test_import_stats_counts_by_category() {
        let mut stats = ImportStats::new();
        stats.record_success(0);
        stats.record_success(2);
        stats.record_failure(&ClientError::Server("boom".into()), 0);
        stats.record_failure(&ClientError::Transient("persistence".into()), 3);

        assert_eq!(stats.successful(), 2);
        assert_eq!(stats.failed(), 2);
        assert_eq!(stats.completed(), 4);
        assert_eq!(stats.retries(), 5);
        assert_eq!(stats.get_error_count(ErrorType::FatalServerError), 1);
        assert_eq!(stats.get_error_count(ErrorType::TransientServerError), 1);
        assert_eq!(stats.get_error_count(ErrorType::TransportError), 0);
    }

    #[test]
    fn test_warning_tally_deduplicates() {
        let mut tally = WarningTally::new();
        tally.record("renamed class");
        tally.record("renamed class");
        tally.record("renamed in");

        assert_eq!(tally.get_count("renamed class"), 2);
        assert_eq!(tally.get_count("renamed in"), 1);
        assert_eq!(tally.get_count("never seen"), 0);
        assert_eq!(tally.total(), 3);
        assert_eq!(
            tally.sorted(),
            vec![
                ("renamed class".to_string(), 2),
                ("renamed in".to_string(), 1)
            ]
        );
    }

    #[test]
    fn test_warning_tally_sort_ties_by_message() {
        let mut tally = WarningTally::new();
        tally.record("b");
        tally.record("a");
        let sorted = tally.sorted();
        assert_eq!(sorted[0].0, "a");
        assert_eq!(sorted[1].0, "b");
    }

    #[test]
    fn test_report_keeps_only_nonzero_error_categories() {
        let mut stats = ImportStats::new();
        stats.record_success(0);
        stats.record_failure(&ClientError::Decode("not json".into()), 0);
        stats.warnings_mut().record("renamed class");

        let report = stats.into_report();
        assert_eq!(report.successful, 1);
        assert_eq!(report.failed, 1);
        assert_eq!(report.errors, vec![(ErrorType::MalformedResponse, 1)]);
        assert_eq!(report.warnings, vec![("renamed class".to_string(), 1)]);
        assert!(report.finished_at >= report.started_at);
    }

    #[test]
    fn test_client_error_categories() {
        assert_eq!(
            ClientError::Transient(String::new()).error_type(),
            ErrorType::TransientServerError
        );
        assert_eq!(
            ClientError::Server(String::new()).error_type(),
            ErrorType::FatalServerError
        );
        assert!(ClientError::Transient(String::new()).is_transient());
        assert!(!ClientError::Server(String::new()).is_transient());
    }
}

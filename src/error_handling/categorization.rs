//! Failure classification and retry strategy.
//!
//! The store reports failures as free text; conflicts between concurrent
//! writers in one transaction surface as serialization or persistence
//! errors and are the only ones worth retrying.

use std::time::Duration;
use tokio_retry::strategy::ExponentialBackoff;

use super::types::ClientError;
use crate::config::TRANSIENT_FAILURE_MARKERS;

/// Creates an exponential backoff retry strategy.
///
/// Returns a retry strategy configured with:
/// - Initial delay: `RETRY_INITIAL_DELAY_MS` times `RETRY_FACTOR` milliseconds
/// - Maximum delay: `RETRY_MAX_DELAY_SECS` seconds
/// - At most `max_retries` retries after the first attempt
pub fn get_retry_strategy(max_retries: usize) -> impl Iterator<Item = Duration> {
    ExponentialBackoff::from_millis(crate::config::RETRY_INITIAL_DELAY_MS)
        .factor(crate::config::RETRY_FACTOR)
        .max_delay(Duration::from_secs(crate::config::RETRY_MAX_DELAY_SECS))
        .take(max_retries)
}

/// Whether a failure payload describes a transient write conflict.
fn is_transient_failure(payload: &str) -> bool {
    let payload = payload.to_lowercase();
    TRANSIENT_FAILURE_MARKERS
        .iter()
        .any(|marker| payload.contains(marker))
}

/// Classifies a failure payload reported by the store.
pub fn classify_failure(payload: impl Into<String>) -> ClientError {
    let payload = payload.into();
    if is_transient_failure(&payload) {
        ClientError::Transient(payload)
    } else {
        ClientError::Server(payload)
    }
}

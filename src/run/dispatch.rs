//! The dispatch loop.
//!
//! One task reads units, builds their queries and keeps inserts in flight in
//! a `FuturesUnordered`. The admission controller decides when reading
//! pauses; completions are always polled first so that a paused source is
//! resumed as soon as possible.

use futures::future::BoxFuture;
use futures::stream::FuturesUnordered;
use futures::{FutureExt, StreamExt};
use log::{debug, warn};
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use super::admission::{AdmissionController, Transition};
use crate::app::log_progress;
use crate::client::{execute_with_retry, GraphClient, InsertOutcome};
use crate::config::{Config, LOGGING_INTERVAL};
use crate::error_handling::{ImportError, ImportStats};
use crate::query::build_query;
use crate::source::UnitSource;

type InFlight<'a> = FuturesUnordered<BoxFuture<'a, (usize, InsertOutcome)>>;

fn log_transition(transition: Transition, pending: usize) {
    match transition {
        Transition::Paused => debug!("Pausing input: {pending} inserts in flight"),
        Transition::Resumed => debug!("Resuming input: {pending} inserts in flight"),
        Transition::Unchanged => {}
    }
}

fn record_outcome(stats: &mut ImportStats, line: usize, outcome: InsertOutcome) {
    match outcome.result {
        Ok(_) => stats.record_success(outcome.retries),
        Err(e) => {
            warn!("Insert from line {line} failed: {e}");
            stats.record_failure(&e, outcome.retries);
        }
    }
}

/// Streams every unit of `source` into the store.
///
/// Returns once the source is exhausted and no insert is in flight. Store
/// failures of single inserts are counted in `stats` and do not stop the
/// stream. A fatal error stops reading; inserts already in flight are still
/// awaited and counted before it is returned.
pub async fn pump(
    source: &mut dyn UnitSource,
    client: &dyn GraphClient,
    config: &Config,
    stats: &mut ImportStats,
    total_records: usize,
) -> Result<(), ImportError> {
    let mut admission = AdmissionController::new(config.high_watermark, config.low_watermark);
    let mut in_flight: InFlight<'_> = FuturesUnordered::new();
    let mut exhausted = false;
    let mut fatal: Option<ImportError> = None;

    let mut ticker = interval_at(Instant::now() + LOGGING_INTERVAL, LOGGING_INTERVAL);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    while !(exhausted && in_flight.is_empty()) {
        tokio::select! {
            biased;

            Some((line, outcome)) = in_flight.next(), if !in_flight.is_empty() => {
                record_outcome(stats, line, outcome);
                log_transition(admission.on_complete(), admission.pending());
            }

            unit = source.next_unit(), if !exhausted && !admission.is_paused() => {
                let unit = match unit {
                    Ok(Some(unit)) => unit,
                    Ok(None) => {
                        debug!("Input exhausted, waiting for {} inserts", admission.pending());
                        exhausted = true;
                        continue;
                    }
                    Err(e) => {
                        exhausted = true;
                        fatal = Some(e);
                        continue;
                    }
                };
                match build_query(&unit, &config.prefix, stats.warnings_mut()) {
                    Ok(query) => {
                        let line = unit.line();
                        let max_retries = config.max_retries;
                        in_flight.push(
                            async move {
                                let outcome = execute_with_retry(client, &query, max_retries).await;
                                (line, outcome)
                            }
                            .boxed(),
                        );
                        log_transition(admission.on_dispatch(), admission.pending());
                    }
                    Err(e) => {
                        exhausted = true;
                        fatal = Some(e);
                    }
                }
            }

            _ = ticker.tick() => {
                log_progress(stats, admission.pending(), total_records);
            }
        }
    }

    match fatal {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

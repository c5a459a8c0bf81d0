//! Import job orchestration.
//!
//! A job runs in this order:
//! 1. Validate the configuration
//! 2. Count the input's records (edge files must hold whole blocks)
//! 3. Open the transaction
//! 4. Stream every unit into the store under backpressure
//! 5. Commit once everything is drained, or roll back on a fatal error

mod admission;
mod dispatch;
mod transaction;

use std::time::Duration;

use chrono::{DateTime, Utc};
use log::{error, info};

use crate::app::print_import_statistics;
use crate::client::{GraphClient, GremlinHttpClient};
use crate::config::{ComponentKind, Config};
use crate::error_handling::{ConfigurationError, ErrorType, ImportError, ImportStats};
use crate::initialization::init_client;
use crate::source::{count_records, open_source};

pub use admission::{AdmissionController, Transition};
pub use dispatch::pump;
pub use transaction::Transaction;

/// Results of an import job.
#[derive(Debug, Clone)]
pub struct ImportReport {
    /// Inserts acknowledged by the store
    pub successful: usize,
    /// Inserts the store rejected
    pub failed: usize,
    /// Extra attempts spent on transient conflicts
    pub retries: usize,
    /// Failed inserts per category; categories with no failure are omitted
    pub errors: Vec<(ErrorType, usize)>,
    /// Query-building warnings with their occurrence counts, most frequent first
    pub warnings: Vec<(String, usize)>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub elapsed: Duration,
}

/// Checks the record count before anything is sent to the store.
fn check_record_count(component: ComponentKind, count: usize) -> Result<(), ConfigurationError> {
    match component {
        ComponentKind::Edge if count % 3 != 0 => {
            Err(ConfigurationError::EdgeRecordCount { count })
        }
        ComponentKind::Vertex if count < 2 => {
            Err(ConfigurationError::MissingTypeDeclaration { records: count })
        }
        _ => Ok(()),
    }
}

/// Runs an import against the Gremlin server named in `config`.
///
/// This is the main entry point for the library.
///
/// # Errors
///
/// Returns an `ImportError` if the configuration or input is invalid, the
/// HTTP client cannot be built, or the transaction cannot be opened or
/// committed. Individual rejected inserts are not errors; they are counted
/// in the report.
///
/// # Example
///
/// ```no_run
/// use gremlin_import::{run_import, ComponentKind, Config};
/// use std::path::PathBuf;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Config {
///     file: PathBuf::from("cities.tsv"),
///     component: ComponentKind::Vertex,
///     ..Default::default()
/// };
/// let report = run_import(config).await?;
/// println!("Inserted {} elements", report.successful);
/// # Ok(())
/// # }
/// ```
pub async fn run_import(config: Config) -> Result<ImportReport, ImportError> {
    config.validate()?;
    let http = init_client(&config)?;
    let client = GremlinHttpClient::new(http, config.endpoint());
    info!(
        "Importing {} ({}) into {}",
        config.file.display(),
        config.component,
        client.endpoint()
    );
    run_import_with_client(&config, &client).await
}

/// Runs an import through an arbitrary `GraphClient`.
pub async fn run_import_with_client(
    config: &Config,
    client: &dyn GraphClient,
) -> Result<ImportReport, ImportError> {
    config.validate()?;

    let total_records = count_records(&config.file).await?;
    check_record_count(config.component, total_records)?;
    info!("Total records in file: {}", total_records);

    let transaction = Transaction::open(client, &config.prefix).await?;

    let mut stats = ImportStats::new();
    let streamed = match open_source(config).await {
        Ok(mut source) => pump(source.as_mut(), client, config, &mut stats, total_records).await,
        Err(e) => Err(e),
    };

    if let Err(e) = streamed {
        error!(
            "Import aborted after {} inserts ({} failed): {e}",
            stats.successful(),
            stats.failed()
        );
        transaction.rollback(client).await;
        return Err(e);
    }

    transaction.commit(client).await?;

    let report = stats.into_report();
    print_import_statistics(&report);
    Ok(report)
}

//! gremlin_import library: streaming graph imports into Gremlin servers
//!
//! This library reads vertices or edges from a delimited text file and
//! inserts them into a Gremlin-compatible graph store. Every value is bound
//! out of band, the whole import runs inside one server-side transaction,
//! and the number of inserts in flight is bounded by a pair of watermarks.
//!
//! # Example
//!
//! ```no_run
//! use gremlin_import::{run_import, ComponentKind, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     file: std::path::PathBuf::from("edges.tsv"),
//!     component: ComponentKind::Edge,
//!     port: 8182,
//!     ..Default::default()
//! };
//!
//! let report = run_import(config).await?;
//! println!("Inserted {} elements, {} errors", report.successful, report.failed);
//! # Ok(())
//! # }
//! ```
//!
//! # Input layout
//!
//! A vertex file starts with a header row and a type row (`numeric`, `date`,
//! `boolean`, `string` or `label`), followed by one row per vertex. An edge
//! file is a sequence of three-row blocks: `name, type, value` triples
//! matching the source vertex, triples matching the target vertex, and
//! `direction, label` followed by triples for the edge's properties.
//!
//! # Requirements
//!
//! This library requires a Tokio runtime.

mod app;
pub mod client;
pub mod config;
mod error_handling;
pub mod initialization;
pub mod query;
mod run;
pub mod schema;
pub mod source;

// Re-export public API
pub use client::{GraphClient, GremlinHttpClient};
pub use config::{ComponentKind, Config, LogFormat, LogLevel, SourceFormat};
pub use error_handling::{
    ClientError, ConfigurationError, ErrorType, ImportError, ImportStats, InitializationError,
    TransactionError, TypeCoercionError, WarningTally,
};
pub use query::Query;
pub use run::{
    run_import, run_import_with_client, AdmissionController, ImportReport, Transaction,
    Transition,
};

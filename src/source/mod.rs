//! Streaming input.
//!
//! This module provides:
//! - `DelimitedReader`, which turns lines into field lists
//! - `VertexGrouper` and `EdgeGrouper`, which turn records into import units
//! - `count_records`, the pre-pass run before any network call

mod grouper;
mod reader;
mod record;

pub use grouper::{EdgeGrouper, UnitSource, VertexGrouper};
pub use reader::{count_records, DelimitedReader};
pub use record::{EdgeUnit, ImportUnit, RawRecord, VertexRecord};

use crate::config::{ComponentKind, Config};
use crate::error_handling::ImportError;

/// Opens the configured input as a stream of import units.
pub async fn open_source(config: &Config) -> Result<Box<dyn UnitSource>, ImportError> {
    let reader = DelimitedReader::from_path(&config.file, config.delimiter).await?;
    Ok(match config.component {
        ComponentKind::Vertex => Box::new(VertexGrouper::new(reader)),
        ComponentKind::Edge => Box::new(EdgeGrouper::new(reader)),
    })
}

//! Grouping of raw records into import units.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::io::AsyncBufRead;

use super::reader::DelimitedReader;
use super::record::{EdgeUnit, ImportUnit, RawRecord, VertexRecord};
use crate::error_handling::{ConfigurationError, ImportError};
use crate::schema::TypeRegistry;

/// A stream of import units pulled by the dispatcher.
///
/// Implementations must be cancel safe: dropping a pending `next_unit` future
/// loses no record.
#[async_trait]
pub trait UnitSource: Send {
    /// Returns the next unit, `None` once the input is exhausted.
    async fn next_unit(&mut self) -> Result<Option<ImportUnit>, ImportError>;
}

/// Reads the header and type rows, then yields one vertex per data row.
pub struct VertexGrouper<R> {
    reader: DelimitedReader<R>,
    headers: Option<RawRecord>,
    registry: Option<Arc<TypeRegistry>>,
}

impl<R: AsyncBufRead + Unpin + Send> VertexGrouper<R> {
    pub fn new(reader: DelimitedReader<R>) -> Self {
        VertexGrouper {
            reader,
            headers: None,
            registry: None,
        }
    }

    /// The registry, once the declaration rows have been read.
    pub fn registry(&self) -> Option<&Arc<TypeRegistry>> {
        self.registry.as_ref()
    }
}

/// Pairs a data row with the declared columns.
fn to_vertex(registry: &Arc<TypeRegistry>, record: RawRecord) -> Result<ImportUnit, ImportError> {
    let RawRecord { line, mut fields } = record;
    if fields.len() > registry.len() {
        if fields[registry.len()..].iter().any(|f| !f.trim().is_empty()) {
            return Err(ConfigurationError::MalformedRecord {
                line,
                reason: format!(
                    "{} fields for {} declared columns",
                    fields.len(),
                    registry.len()
                ),
            }
            .into());
        }
        fields.truncate(registry.len());
    }
    Ok(ImportUnit::Vertex(VertexRecord::new(
        line,
        Arc::clone(registry),
        fields,
    )))
}

#[async_trait]
impl<R: AsyncBufRead + Unpin + Send> UnitSource for VertexGrouper<R> {
    async fn next_unit(&mut self) -> Result<Option<ImportUnit>, ImportError> {
        loop {
            let Some(record) = self.reader.next_record().await? else {
                if self.registry.is_none() {
                    let records = usize::from(self.headers.is_some());
                    return Err(ConfigurationError::MissingTypeDeclaration { records }.into());
                }
                return Ok(None);
            };

            if let Some(registry) = &self.registry {
                return to_vertex(registry, record).map(Some);
            }

            match self.headers.take() {
                None => self.headers = Some(record),
                Some(headers) => {
                    let registry = TypeRegistry::from_declaration(&headers.fields, &record.fields)?;
                    log::debug!(
                        "Declared {} columns: {}",
                        registry.len(),
                        registry
                            .columns()
                            .iter()
                            .map(|c| format!("{}:{}", c.name, c.ty))
                            .collect::<Vec<_>>()
                            .join(", ")
                    );
                    self.registry = Some(Arc::new(registry));
                }
            }
        }
    }
}

/// Groups consecutive records into (source, target, edge) blocks.
pub struct EdgeGrouper<R> {
    reader: DelimitedReader<R>,
    pending: Vec<RawRecord>,
}

impl<R: AsyncBufRead + Unpin + Send> EdgeGrouper<R> {
    pub fn new(reader: DelimitedReader<R>) -> Self {
        EdgeGrouper {
            reader,
            pending: Vec::with_capacity(3),
        }
    }
}

#[async_trait]
impl<R: AsyncBufRead + Unpin + Send> UnitSource for EdgeGrouper<R> {
    async fn next_unit(&mut self) -> Result<Option<ImportUnit>, ImportError> {
        while self.pending.len() < 3 {
            match self.reader.next_record().await? {
                Some(record) => self.pending.push(record),
                None if self.pending.is_empty() => return Ok(None),
                None => {
                    return Err(ConfigurationError::IncompleteEdgeUnit {
                        records: self.pending.len(),
                    }
                    .into())
                }
            }
        }

        let mut block = std::mem::take(&mut self.pending).into_iter();
        let (Some(source), Some(target), Some(edge)) = (block.next(), block.next(), block.next())
        else {
            return Ok(None);
        };
        Ok(Some(ImportUnit::Edge(EdgeUnit {
            line: source.line,
            source: source.fields,
            target: target.fields,
            edge: edge.fields,
        })))
    }
}

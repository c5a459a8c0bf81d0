//! Line-oriented delimited reader.

use std::path::Path;

use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};

use super::record::RawRecord;
use crate::error_handling::{ConfigurationError, ImportError};

/// Reads one record per physical line, skipping blank lines.
///
/// Fields are split with the `csv` crate, so quoted fields may contain the
/// delimiter. A quoted field cannot span lines.
pub struct DelimitedReader<R> {
    lines: Lines<R>,
    line: usize,
    delimiter: u8,
}

impl DelimitedReader<BufReader<File>> {
    /// Opens `path` for streaming.
    pub async fn from_path(path: &Path, delimiter: u8) -> Result<Self, ImportError> {
        let file = File::open(path).await?;
        Ok(DelimitedReader::new(BufReader::new(file), delimiter))
    }
}

impl<R: AsyncBufRead + Unpin + Send> DelimitedReader<R> {
    pub fn new(reader: R, delimiter: u8) -> Self {
        DelimitedReader {
            lines: reader.lines(),
            line: 0,
            delimiter,
        }
    }

    /// Returns the next non-blank record, or `None` at end of input.
    ///
    /// Cancel safe: the only await point is the line read, and no record
    /// state lives across it.
    pub async fn next_record(&mut self) -> Result<Option<RawRecord>, ImportError> {
        while let Some(text) = self.lines.next_line().await? {
            self.line += 1;
            if text.trim().is_empty() {
                continue;
            }
            let fields = split_fields(&text, self.delimiter, self.line)?;
            return Ok(Some(RawRecord {
                line: self.line,
                fields,
            }));
        }
        Ok(None)
    }
}

/// Splits a single line into its fields.
fn split_fields(text: &str, delimiter: u8, line: usize) -> Result<Vec<String>, ConfigurationError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(text.as_bytes());

    match reader.records().next() {
        Some(Ok(record)) => Ok(record.iter().map(str::to_string).collect()),
        Some(Err(e)) => Err(ConfigurationError::MalformedRecord {
            line,
            reason: e.to_string(),
        }),
        None => Ok(Vec::new()),
    }
}

/// Counts the non-blank lines of `path`.
///
/// Runs before any network call; edge files are validated against it and
/// progress is reported relative to it.
pub async fn count_records(path: &Path) -> Result<usize, ImportError> {
    let file = File::open(path).await?;
    let mut lines = BufReader::new(file).lines();
    let mut count = 0usize;
    while let Some(line) = lines.next_line().await? {
        if !line.trim().is_empty() {
            count += 1;
        }
    }
    Ok(count)
}

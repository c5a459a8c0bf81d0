//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    DEFAULT_DELIMITER, DEFAULT_HOST, DEFAULT_MAX_RETRIES, DEFAULT_PORT, DEFAULT_PREFIX,
    DEFAULT_TIMEOUT_SECS, HIGH_WATERMARK, LOW_WATERMARK,
};
use crate::error_handling::ConfigurationError;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Input file format.
///
/// Only `Csv` (any single-byte delimiter) is implemented; the others are
/// recognised so that selecting them fails with a clear configuration error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum SourceFormat {
    /// Delimited text
    Csv,
    /// Spreadsheet (not implemented)
    Xlsx,
    /// Graph Exchange XML (not implemented)
    Gexf,
    /// Graphviz description (not implemented)
    Dot,
}

/// Kind of graph component stored in the input file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum ComponentKind {
    /// Header row, type row, then one vertex per row
    #[value(alias = "v")]
    Vertex,
    /// Blocks of three rows: source match, target match, edge
    #[value(alias = "e")]
    Edge,
}

/// Import configuration.
///
/// Parsed from the command line by the binary, or constructed
/// programmatically by library users.
///
/// # Examples
///
/// ```no_run
/// use gremlin_import::{ComponentKind, Config};
/// use std::path::PathBuf;
///
/// let config = Config {
///     file: PathBuf::from("cities.tsv"),
///     component: ComponentKind::Vertex,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "gremlin_import",
    version,
    about = "Imports vertices or edges from a delimited file into a Gremlin server."
)]
pub struct Config {
    /// File to import
    #[arg(value_parser)]
    pub file: PathBuf,

    /// Gremlin server host name or IP address
    #[arg(long = "host", short = 'H', default_value = DEFAULT_HOST)]
    pub host: String,

    /// Gremlin server port
    #[arg(long, short = 'p', default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Input file format: csv|xlsx|gexf|dot
    #[arg(long, short = 'f', value_enum, default_value_t = SourceFormat::Csv)]
    pub format: SourceFormat,

    /// Kind of components contained in the file: vertex (v) or edge (e)
    #[arg(long = "type", short = 't', value_enum)]
    pub component: ComponentKind,

    /// Field delimiter (a single character; `\t` or `tab` for tabs)
    #[arg(long, short = 'd', default_value = "\\t", value_parser = parse_delimiter)]
    pub delimiter: u8,

    /// Traversal source prefix, e.g. g or graph
    #[arg(long, default_value = DEFAULT_PREFIX)]
    pub prefix: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// Pause reading when more inserts than this are in flight
    #[arg(long, default_value_t = HIGH_WATERMARK)]
    pub high_watermark: usize,

    /// Resume reading when fewer inserts than this are in flight
    #[arg(long, default_value_t = LOW_WATERMARK)]
    pub low_watermark: usize,

    /// Retries for transient (serialization/persistence) failures; 0 disables
    #[arg(long, default_value_t = DEFAULT_MAX_RETRIES)]
    pub max_retries: usize,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file: PathBuf::from("graph.csv"),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            format: SourceFormat::Csv,
            component: ComponentKind::Vertex,
            delimiter: DEFAULT_DELIMITER,
            prefix: DEFAULT_PREFIX.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            high_watermark: HIGH_WATERMARK,
            low_watermark: LOW_WATERMARK,
            max_retries: DEFAULT_MAX_RETRIES,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}

impl Config {
    /// Checks the settings the pipeline relies on.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigurationError` for an unimplemented format, an invalid
    /// traversal prefix, or watermarks that would stall the dispatcher.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.format != SourceFormat::Csv {
            return Err(ConfigurationError::UnsupportedFormat(self.format));
        }
        let prefix_ok = self
            .prefix
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
            && self
                .prefix
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !prefix_ok {
            return Err(ConfigurationError::InvalidSetting(format!(
                "traversal prefix \"{}\" is not a valid identifier",
                self.prefix
            )));
        }
        if self.low_watermark == 0 || self.low_watermark >= self.high_watermark {
            return Err(ConfigurationError::InvalidSetting(format!(
                "watermarks must satisfy 0 < low < high (low={}, high={})",
                self.low_watermark, self.high_watermark
            )));
        }
        if self.delimiter == b'"' || self.delimiter == b'\n' || self.delimiter == b'\r' {
            return Err(ConfigurationError::InvalidSetting(format!(
                "{:?} cannot be used as a field delimiter",
                self.delimiter as char
            )));
        }
        Ok(())
    }

    /// Base URL of the Gremlin server's HTTP endpoint.
    pub fn endpoint(&self) -> String {
        format!("http://{}:{}/", self.host, self.port)
    }
}

/// Parses a delimiter argument into a single byte.
///
/// Accepts one ASCII character, or the escapes `\t`/`tab` for a tab.
pub fn parse_delimiter(raw: &str) -> Result<u8, String> {
    match raw {
        "\\t" | "tab" | "\t" => Ok(b'\t'),
        _ => {
            let mut chars = raw.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii() => Ok(c as u8),
                _ => Err(format!(
                    "delimiter must be a single ASCII character, got \"{raw}\""
                )),
            }
        }
    }
}

//! Error type definitions.
//!
//! This module defines the fatal error taxonomy of an import job, the
//! per-record client failures, and the categories used to count them.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

use crate::config::SourceFormat;
use crate::schema::ColumnType;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Fatal errors that abort an import job.
///
/// Per-record store failures are not part of this enum: they are counted in
/// the job statistics and never stop the stream.
#[derive(Error, Debug)]
pub enum ImportError {
    /// Bad settings or badly shaped input.
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// A declared type is unsupported or a value does not parse as its type.
    #[error("Type error: {0}")]
    TypeCoercion(#[from] TypeCoercionError),

    /// The enclosing transaction could not be opened or committed.
    #[error("Transaction error: {0}")]
    Transaction(#[from] TransactionError),

    /// The input file could not be read.
    #[error("Input error: {0}")]
    Io(#[from] std::io::Error),

    /// The HTTP client could not be built.
    #[error("Initialization error: {0}")]
    Initialization(#[from] InitializationError),
}

/// Settings or input layout that make the job impossible to run.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("Format \"{0}\" is not implemented; supported formats are: csv")]
    UnsupportedFormat(SourceFormat),

    #[error("{0}")]
    InvalidSetting(String),

    #[error(
        "The number of records in an edge file must be divisible by 3 (found {count}), \
         i.e. the edge file is in the wrong format"
    )]
    EdgeRecordCount { count: usize },

    #[error(
        "A vertex file needs a header row and a type row before its data \
         (found {records} record(s))"
    )]
    MissingTypeDeclaration { records: usize },

    #[error("Input ended inside an edge block ({records} of 3 records)")]
    IncompleteEdgeUnit { records: usize },

    #[error("Column {position} has an empty name")]
    EmptyColumnName { position: usize },

    #[error("Columns \"{first}\" and \"{second}\" both map to \"{key}\"")]
    DuplicateColumn {
        first: String,
        second: String,
        key: String,
    },

    #[error("Columns \"{first}\" and \"{second}\" are both typed label; a vertex has one label")]
    MultipleLabelColumns { first: String, second: String },

    #[error("Property name \"{name}\" is empty once punctuation is removed")]
    EmptyPropertyName { name: String },

    #[error("Malformed record on line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    #[error(
        "Direction \"{0}\" not supported. Supported edge directions are: in(incoming), out(outgoing)"
    )]
    UnsupportedDirection(String),

    #[error("Edge block starting on line {line} has no edge label")]
    MissingEdgeLabel { line: usize },

    #[error("Edge block starting on line {line} has no usable {side} match triples")]
    EmptyMatch { line: usize, side: &'static str },

    #[error("Edge block starting on line {line} has an incomplete {side} triple")]
    IncompleteTriple { line: usize, side: &'static str },
}

/// A column type that is unknown or a value that does not parse as its type.
#[derive(Error, Debug)]
pub enum TypeCoercionError {
    #[error(
        "Column \"{column}\" does not have a supported type: \"{declared}\", supported types are: {}",
        ColumnType::supported_list()
    )]
    UnsupportedType { column: String, declared: String },

    #[error("Column \"{column}\" value \"{value}\" is not a valid {ty}")]
    InvalidValue {
        column: String,
        ty: ColumnType,
        value: String,
    },

    #[error("Column \"{column}\" is typed label, which is only valid on a vertex label column")]
    LabelNotAllowed { column: String },
}

/// Failures of the transaction enclosing the import.
#[derive(Error, Debug)]
pub enum TransactionError {
    #[error("Failed to open transaction: {0}")]
    Open(#[source] ClientError),

    #[error("Failed to commit transaction: {0}")]
    Commit(#[source] ClientError),

    #[error("Failed to roll back transaction: {0}")]
    Rollback(#[source] ClientError),
}

/// Failure of a single round trip to the graph store.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Serialization or persistence conflict; worth retrying.
    #[error("Transient server error: {0}")]
    Transient(String),

    /// Any other failure reported by the store.
    #[error("Server error: {0}")]
    Server(String),

    /// The request never produced a response.
    #[error("Transport error: {0}")]
    Transport(#[from] ReqwestError),

    /// The store answered with something that is not a Gremlin response.
    #[error("Malformed server response: {0}")]
    Decode(String),
}

impl ClientError {
    /// Whether the failure is a conflict that may succeed when retried.
    pub fn is_transient(&self) -> bool {
        matches!(self, ClientError::Transient(_))
    }

    /// Statistics category for this failure.
    pub fn error_type(&self) -> ErrorType {
        match self {
            ClientError::Transient(_) => ErrorType::TransientServerError,
            ClientError::Server(_) => ErrorType::FatalServerError,
            ClientError::Transport(_) => ErrorType::TransportError,
            ClientError::Decode(_) => ErrorType::MalformedResponse,
        }
    }
}

/// Categories of per-record insert failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
#[allow(clippy::enum_variant_names)]
pub enum ErrorType {
    TransientServerError, // still conflicting after every retry
    FatalServerError,
    TransportError,
    MalformedResponse,
}

impl ErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::TransientServerError => "Transient server error (retries exhausted)",
            ErrorType::FatalServerError => "Server error",
            ErrorType::TransportError => "Transport error",
            ErrorType::MalformedResponse => "Malformed server response",
        }
    }
}

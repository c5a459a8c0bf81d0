//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (defaults, watermarks, retry backoff)
//! - CLI option types and parsing

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{parse_delimiter, ComponentKind, Config, LogFormat, LogLevel, SourceFormat};

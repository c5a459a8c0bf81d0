//! Main application modules.
//!
//! This module provides progress logging and statistics printing used while
//! an import runs and once it has finished.

pub mod logging;
pub mod statistics;

// Re-export public API
pub use logging::log_progress;
pub use statistics::print_import_statistics;

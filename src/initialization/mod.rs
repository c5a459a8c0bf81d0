//! Application initialization.
//!
//! This module provides functions to initialize the shared resources of a run:
//! - The logger (plain or JSON)
//! - The HTTP client used to reach the Gremlin server
//!
//! All initialization functions return `InitializationError` on failure.

mod client;
mod logger;

// Re-export public API
pub use client::init_client;
pub use logger::init_logger_with;

//! Configuration constants.
//!
//! This module defines the defaults and operational parameters used throughout
//! the importer: connection defaults, backpressure watermarks, retry backoff
//! and logging cadence.

use std::time::Duration;

/// Default Gremlin server host.
pub const DEFAULT_HOST: &str = "localhost";
/// Default Gremlin server port.
pub const DEFAULT_PORT: u16 = 8182;
/// Default traversal source prefix (the `g` in `g.V()`).
pub const DEFAULT_PREFIX: &str = "g";
/// Default field delimiter (tab).
pub const DEFAULT_DELIMITER: u8 = b'\t';

/// Per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// Backpressure watermarks
/// Pause reading once more than this many inserts are in flight.
pub const HIGH_WATERMARK: usize = 10;
/// Resume reading once fewer than this many inserts are in flight.
pub const LOW_WATERMARK: usize = 5;

// Retry strategy (transient server errors only)
/// Base of the exponential backoff in milliseconds
pub const RETRY_INITIAL_DELAY_MS: u64 = 10;
/// Factor applied to every backoff step
pub const RETRY_FACTOR: u64 = 5;
/// Maximum delay between retries in seconds
pub const RETRY_MAX_DELAY_SECS: u64 = 2;
/// Default number of retries for a transient failure (0 disables retrying)
pub const DEFAULT_MAX_RETRIES: usize = 3;

/// Interval between progress log lines while importing.
pub const LOGGING_INTERVAL: Duration = Duration::from_secs(5);

/// Substrings of a store failure that mark it as a transient conflict.
pub const TRANSIENT_FAILURE_MARKERS: &[&str] = &["serialization", "persistence"];

/// User-Agent sent with every request to the Gremlin server.
pub const USER_AGENT: &str = concat!("gremlin_import/", env!("CARGO_PKG_VERSION"));

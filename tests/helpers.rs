// Shared test helpers: an in-memory graph client and input file builders.
//
// This module provides common utilities used across multiple test files to reduce duplication.
#![allow(dead_code)] // Not every test file uses every helper

use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use gremlin_import::{ClientError, ComponentKind, Config, GraphClient, LogLevel, Query};
use serde_json::Value;
use tempfile::NamedTempFile;

/// Failure injected by `RecordingClient` for a given insert index.
pub type FailureFn = dyn Fn(usize, &Query) -> Option<ClientError> + Send + Sync;

/// What the client saw when a transaction query arrived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxEvent {
    pub text: String,
    /// Inserts started before this query
    pub inserts_started: usize,
    /// Inserts still running when this query arrived
    pub inserts_in_flight: usize,
}

/// A `GraphClient` that records every query instead of talking to a server.
///
/// Inserts sleep for a per-call delay so that completions arrive out of
/// order; the highest number of concurrently running inserts is tracked.
pub struct RecordingClient {
    queries: Mutex<Vec<Query>>,
    tx_events: Mutex<Vec<TxEvent>>,
    inserts_started: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    delay: fn(usize) -> Duration,
    failure: Box<FailureFn>,
}

impl RecordingClient {
    pub fn new() -> Self {
        Self::with_delay(|_| Duration::ZERO)
    }

    pub fn with_delay(delay: fn(usize) -> Duration) -> Self {
        RecordingClient {
            queries: Mutex::new(Vec::new()),
            tx_events: Mutex::new(Vec::new()),
            inserts_started: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            delay,
            failure: Box::new(|_, _| None),
        }
    }

    /// Delays that vary per call, so later inserts often finish first.
    pub fn jittered() -> Self {
        Self::with_delay(|index| Duration::from_millis(((index * 7) % 11) as u64 + 1))
    }

    pub fn failing_with(
        mut self,
        failure: impl Fn(usize, &Query) -> Option<ClientError> + Send + Sync + 'static,
    ) -> Self {
        self.failure = Box::new(failure);
        self
    }

    /// Every query executed, in submission order.
    pub fn queries(&self) -> Vec<Query> {
        self.queries.lock().unwrap().clone()
    }

    /// Insert queries only (transaction control filtered out).
    pub fn inserts(&self) -> Vec<Query> {
        self.queries()
            .into_iter()
            .filter(|q| !is_tx(q))
            .collect()
    }

    pub fn tx_events(&self) -> Vec<TxEvent> {
        self.tx_events.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.queries.lock().unwrap().len()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

fn is_tx(query: &Query) -> bool {
    query.text().contains(".tx().")
}

#[async_trait]
impl GraphClient for RecordingClient {
    async fn execute(&self, query: &Query) -> Result<Value, ClientError> {
        self.queries.lock().unwrap().push(query.clone());

        if is_tx(query) {
            self.tx_events.lock().unwrap().push(TxEvent {
                text: query.text().to_string(),
                inserts_started: self.inserts_started.load(Ordering::SeqCst),
                inserts_in_flight: self.in_flight.load(Ordering::SeqCst),
            });
            return Ok(Value::Null);
        }

        let index = self.inserts_started.fetch_add(1, Ordering::SeqCst);
        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(running, Ordering::SeqCst);

        let delay = (self.delay)(index);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        match (self.failure)(index, query) {
            Some(e) => Err(e),
            None => Ok(Value::Array(vec![])),
        }
    }
}

/// Writes `contents` to a temporary input file.
pub fn write_input(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write input");
    file.flush().expect("Failed to flush file");
    file
}

/// Creates a Config for a tab-delimited input file.
pub fn create_test_config(file: PathBuf, component: ComponentKind) -> Config {
    Config {
        file,
        component,
        log_level: LogLevel::Error, // Reduce noise in tests
        ..Default::default()
    }
}

/// Builds a vertex file with `rows` data rows.
pub fn vertex_file(rows: usize) -> String {
    let mut contents = String::from("name\tindex\tkind\nstring\tnumeric\tlabel\n");
    for i in 0..rows {
        contents.push_str(&format!("node{i}\t{i}\tNode\n"));
    }
    contents
}

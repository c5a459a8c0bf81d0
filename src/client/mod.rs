//! Graph store client.
//!
//! `GraphClient` is the seam between the dispatcher and the store: one call
//! submits one query and resolves with the store's result or a classified
//! failure. `GremlinHttpClient` is the implementation used by the binary.

mod http;

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::Value;
use tokio_retry::RetryIf;

use crate::error_handling::{get_retry_strategy, ClientError};
use crate::query::Query;

pub use http::GremlinHttpClient;

/// Submits queries to a Gremlin-compatible store.
#[async_trait]
pub trait GraphClient: Send + Sync {
    /// Executes one query with its bindings.
    ///
    /// # Errors
    ///
    /// Returns a `ClientError` describing why the store did not apply the query.
    async fn execute(&self, query: &Query) -> Result<Value, ClientError>;
}

/// Result of one insert, after retries.
#[derive(Debug)]
pub struct InsertOutcome {
    pub result: Result<Value, ClientError>,
    /// Retries made after the first attempt.
    pub retries: usize,
}

/// Executes `query`, retrying transient failures up to `max_retries` times.
///
/// Non-transient failures are returned after the first attempt.
pub async fn execute_with_retry(
    client: &dyn GraphClient,
    query: &Query,
    max_retries: usize,
) -> InsertOutcome {
    let attempts = AtomicUsize::new(0);
    let result = RetryIf::start(
        get_retry_strategy(max_retries),
        || {
            attempts.fetch_add(1, Ordering::Relaxed);
            client.execute(query)
        },
        |e: &ClientError| {
            if e.is_transient() {
                log::debug!("Retrying after transient failure: {e}");
            }
            e.is_transient()
        },
    )
    .await;

    InsertOutcome {
        result,
        retries: attempts.load(Ordering::Relaxed).saturating_sub(1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Fails with the queued errors, then succeeds.
    struct ScriptedClient {
        failures: Mutex<Vec<ClientError>>,
        calls: AtomicUsize,
    }

    impl ScriptedClient {
        fn new(failures: Vec<ClientError>) -> Self {
            ScriptedClient {
                failures: Mutex::new(failures),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl GraphClient for ScriptedClient {
        async fn execute(&self, _query: &Query) -> Result<Value, ClientError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.failures.lock().unwrap().pop() {
                Some(e) => Err(e),
                None => Ok(Value::Array(vec![])),
            }
        }
    }

    fn transient() -> ClientError {
        ClientError::Transient("Could not commit transaction due to serialization".into())
    }

    #[tokio::test]
    async fn test_transient_failure_is_retried() {
        let client = ScriptedClient::new(vec![transient(), transient()]);
        let outcome = execute_with_retry(&client, &Query::new("g.addV()"), 3).await;

        assert!(outcome.result.is_ok());
        assert_eq!(outcome.retries, 2);
        assert_eq!(client.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_retries_are_bounded() {
        let client = ScriptedClient::new(vec![transient(), transient(), transient()]);
        let outcome = execute_with_retry(&client, &Query::new("g.addV()"), 2).await;

        assert!(matches!(outcome.result, Err(ClientError::Transient(_))));
        assert_eq!(outcome.retries, 2);
        assert_eq!(client.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_server_error_is_not_retried() {
        let client = ScriptedClient::new(vec![ClientError::Server("No such property".into())]);
        let outcome = execute_with_retry(&client, &Query::new("g.addV()"), 3).await;

        assert!(matches!(outcome.result, Err(ClientError::Server(_))));
        assert_eq!(outcome.retries, 0);
        assert_eq!(client.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_zero_retries_disables_retrying() {
        let client = ScriptedClient::new(vec![transient()]);
        let outcome = execute_with_retry(&client, &Query::new("g.addV()"), 0).await;

        assert!(outcome.result.is_err());
        assert_eq!(client.calls.load(Ordering::SeqCst), 1);
    }
}

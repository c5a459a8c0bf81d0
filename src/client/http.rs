//! Gremlin server HTTP endpoint client.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::GraphClient;
use crate::error_handling::{classify_failure, ClientError};
use crate::query::Query;

/// Posts scripts to the Gremlin server's HTTP endpoint.
///
/// Each call is one `POST` of `{"gremlin", "bindings", "language"}`. A 2xx
/// response resolves to `result.data`; anything else is classified from the
/// server's error message.
#[derive(Clone)]
pub struct GremlinHttpClient {
    client: Arc<reqwest::Client>,
    endpoint: String,
}

impl GremlinHttpClient {
    pub fn new(client: Arc<reqwest::Client>, endpoint: impl Into<String>) -> Self {
        GremlinHttpClient {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Extracts the failure text from an error response body.
///
/// Gremlin server reports `{"message": ..., "Exception-Class": ...}`; both
/// parts are kept so that conflicts named only by the exception class are
/// still recognised as transient.
fn failure_payload(status: reqwest::StatusCode, body: &str) -> String {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return format!("HTTP {status}: {}", body.trim());
    };
    let message = value
        .get("message")
        .or_else(|| value.pointer("/status/message"))
        .and_then(Value::as_str)
        .unwrap_or_default();
    match value.get("Exception-Class").and_then(Value::as_str) {
        Some(class) => format!("HTTP {status}: {message} ({class})"),
        None if !message.is_empty() => format!("HTTP {status}: {message}"),
        None => format!("HTTP {status}: {}", body.trim()),
    }
}

#[async_trait]
impl GraphClient for GremlinHttpClient {
    async fn execute(&self, query: &Query) -> Result<Value, ClientError> {
        let body = json!({
            "gremlin": query.text(),
            "bindings": query.bindings_json(),
            "language": "gremlin-groovy",
        });

        let response = self.client.post(&self.endpoint).json(&body).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(classify_failure(failure_payload(status, &text)));
        }

        let value: Value = serde_json::from_str(&text)
            .map_err(|e| ClientError::Decode(format!("invalid JSON response: {e}")))?;
        match value.get("result") {
            Some(result) => Ok(result.get("data").cloned().unwrap_or(Value::Null)),
            None => Err(ClientError::Decode(format!(
                "response has no result field: {}",
                text.chars().take(200).collect::<String>()
            ))),
        }
    }
}

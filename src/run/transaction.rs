//! The transaction enclosing an import.

use log::{debug, warn};

use crate::client::GraphClient;
use crate::error_handling::TransactionError;
use crate::query::Query;

/// An open server-side transaction.
///
/// `commit` and `rollback` consume the value, so a transaction is closed at
/// most once.
#[derive(Debug)]
pub struct Transaction {
    prefix: String,
}

impl Transaction {
    /// Executes `<prefix>.tx().open()`.
    pub async fn open(client: &dyn GraphClient, prefix: &str) -> Result<Self, TransactionError> {
        client
            .execute(&Query::new(format!("{prefix}.tx().open()")))
            .await
            .map_err(TransactionError::Open)?;
        debug!("Transaction opened on {prefix}");
        Ok(Transaction {
            prefix: prefix.to_string(),
        })
    }

    /// Executes `<prefix>.tx().commit()`.
    pub async fn commit(self, client: &dyn GraphClient) -> Result<(), TransactionError> {
        client
            .execute(&Query::new(format!("{}.tx().commit()", self.prefix)))
            .await
            .map_err(TransactionError::Commit)?;
        debug!("Transaction committed on {}", self.prefix);
        Ok(())
    }

    /// Executes `<prefix>.tx().rollback()`. Failures are logged, not returned.
    pub async fn rollback(self, client: &dyn GraphClient) {
        let query = Query::new(format!("{}.tx().rollback()", self.prefix));
        match client.execute(&query).await {
            Ok(_) => debug!("Transaction rolled back on {}", self.prefix),
            Err(e) => warn!("{}", TransactionError::Rollback(e)),
        }
    }
}

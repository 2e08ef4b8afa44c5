// Batch reconciliation for PUT /api/trades: every element of the batch is
// either a delete (isDeleted) or an upsert, keyed by (tx_hash, evt_index).
// Rows are independent, so all store operations are dispatched at once and
// joined; the batch is not atomic, and rows that succeed stay persisted
// even when the batch as a whole reports failure.

use futures::future::join_all;
use thiserror::Error;
use tracing::warn;

use crate::db::trades::TradeStore;
use crate::db::StoreError;
use crate::models::{TradeKey, TradeRowEdit};
use crate::validation::{self, ValidationError};

#[derive(Error, Debug)]
pub enum RowFailure {
    #[error("row {index}: {source}")]
    InvalidKey {
        index: usize,
        source: ValidationError,
    },

    #[error("row {index} {key}: {source}")]
    Store {
        index: usize,
        key: TradeKey,
        source: StoreError,
    },
}

#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Rows whose store operation completed.
    pub applied: usize,
    pub failures: Vec<RowFailure>,
}

impl BatchOutcome {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Applies one batch of edited rows against the store. Key-less rows fail
/// validation without any store contact; the rest fan out concurrently and
/// every operation settles before the outcome is returned.
pub async fn apply_batch<S: TradeStore>(store: &S, rows: Vec<TradeRowEdit>) -> BatchOutcome {
    let operations = rows.into_iter().enumerate().map(|(index, row)| async move {
        let key = match validation::require_trade_key(&row) {
            Ok(key) => key,
            Err(source) => return Err(RowFailure::InvalidKey { index, source }),
        };

        let result = if row.is_deleted {
            store.delete(&key).await
        } else {
            store.upsert(&row.into_record(key.clone())).await
        };

        result.map_err(|source| RowFailure::Store { index, key, source })
    });

    let mut outcome = BatchOutcome::default();
    for result in join_all(operations).await {
        match result {
            Ok(()) => outcome.applied += 1,
            Err(failure) => {
                warn!("batch row failed: {failure}");
                outcome.failures.push(failure);
            }
        }
    }

    outcome
}

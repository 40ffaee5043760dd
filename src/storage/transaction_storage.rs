use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::models::{Transaction, TransactionFilter};
use crate::storage::{GatewayError, TransactionGateway};
use crate::types::TransactionId;

/// In-memory transaction store keyed by transaction id.
///
/// Pages are ordered by transaction id so that limit/offset paging is consistent across calls
/// as long as nothing is written in between.
pub struct TransactionStorage {
    records: Arc<DashMap<TransactionId, Transaction>>
}

impl TransactionStorage {
    pub fn new() -> Self {
        Self {
            records: Arc::new(DashMap::new())
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn load(&self, transaction_id: TransactionId) -> Option<Transaction> {
        self.records.get(&transaction_id).map(|entry| entry.value().clone())
    }
}

impl Default for TransactionStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TransactionGateway for TransactionStorage {
    async fn get_page(&self, filter: &TransactionFilter, limit: usize, offset: usize) -> Result<Vec<Transaction>, GatewayError> {
        let mut ids: Vec<TransactionId> = self.records.iter()
            .filter(|entry| filter.matches(entry.value()))
            .map(|entry| *entry.key())
            .collect();

        ids.sort_unstable();

        Ok(ids.into_iter()
            .skip(offset)
            .take(limit)
            .filter_map(|transaction_id| self.load(transaction_id))
            .collect())
    }

    async fn write_batch(&self, batch: &[Transaction]) -> Result<(), GatewayError> {
        let mut seen = HashSet::with_capacity(batch.len());

        //NOTE: The whole batch is checked before anything is inserted
        for transaction in batch {
            if !seen.insert(transaction.transaction_id) || self.records.contains_key(&transaction.transaction_id) {
                return Err(GatewayError::DuplicateTransaction(transaction.transaction_id))
            }
        }

        for transaction in batch {
            self.records.insert(transaction.transaction_id, transaction.clone());
        }

        Ok(())
    }
}

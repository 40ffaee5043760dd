mod errors;
#[cfg(test)]
mod tests;
mod transaction_storage;

use async_trait::async_trait;

use crate::models::{Transaction, TransactionFilter};

pub use errors::GatewayError;
pub use transaction_storage::TransactionStorage;

/// The persistence contract the import and export pipelines are written against.
#[async_trait]
pub trait TransactionGateway: Send + Sync + 'static {
    /// Returns at most `limit` matching transactions starting at `offset`, in a stable order.
    /// An empty page means there is nothing at or beyond `offset`.
    async fn get_page(&self, filter: &TransactionFilter, limit: usize, offset: usize) -> Result<Vec<Transaction>, GatewayError>;

    /// Persists a batch as a unit: either every transaction is stored or none is.
    async fn write_batch(&self, batch: &[Transaction]) -> Result<(), GatewayError>;
}

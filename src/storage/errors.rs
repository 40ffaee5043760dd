use thiserror::Error;

use crate::types::TransactionId;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Transaction [{0}] already exists")]
    DuplicateTransaction(TransactionId),
    #[cfg(test)]
    #[error("Storage is unavailable: {0}")]
    Unavailable(String)
}

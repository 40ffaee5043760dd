mod errors;
mod filter;
mod transaction;

pub use errors::FilterError;
pub use filter::{FilterParams, TransactionFilter};
pub use transaction::Transaction;

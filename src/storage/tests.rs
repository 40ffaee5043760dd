use super::{GatewayError, TransactionGateway, TransactionStorage};

use anyhow::{anyhow, Result};

use crate::models::{Transaction, TransactionFilter};

fn ids(page: &[Transaction]) -> Vec<i64> {
    page.iter().map(|transaction| transaction.transaction_id).collect()
}

#[tokio::test]
async fn test_storage_basic_write_and_load_operations() -> Result<()> {
    let storage = TransactionStorage::new();

    assert!(storage.is_empty());
    assert!(storage.load(99).is_none());

    storage.write_batch(&[Transaction::new(1, "accepted"), Transaction::new(2, "declined")]).await?;

    let retrieved = storage.load(2).ok_or_else(|| anyhow!("Transaction not found in storage"))?;

    assert_eq!(storage.len(), 2);
    assert_eq!(retrieved.status, "declined");

    Ok(())
}

#[tokio::test]
async fn test_pages_are_ordered_by_id_and_bounded_by_limit() -> Result<()> {
    let storage = TransactionStorage::new();
    let filter = TransactionFilter::new();

    storage.write_batch(&[Transaction::new(5, "accepted"), Transaction::new(1, "accepted")]).await?;
    storage.write_batch(&[Transaction::new(3, "accepted")]).await?;

    assert_eq!(ids(&storage.get_page(&filter, 2, 0).await?), vec![1, 3]);
    assert_eq!(ids(&storage.get_page(&filter, 2, 2).await?), vec![5]);
    assert!(storage.get_page(&filter, 2, 4).await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_pages_only_contain_matching_transactions() -> Result<()> {
    let storage = TransactionStorage::new();

    storage.write_batch(&[
        Transaction::new(1, "accepted"),
        Transaction::new(2, "declined"),
        Transaction::new(3, "accepted")
    ]).await?;

    let page = storage.get_page(&TransactionFilter::new().with_status("accepted"), 10, 0).await?;

    assert_eq!(ids(&page), vec![1, 3]);

    Ok(())
}

#[tokio::test]
async fn test_duplicate_batch_is_rejected_without_partial_write() -> Result<()> {
    let storage = TransactionStorage::new();

    storage.write_batch(&[Transaction::new(1, "accepted")]).await?;

    let result = storage.write_batch(&[Transaction::new(2, "accepted"), Transaction::new(1, "accepted")]).await;

    assert!(matches!(result, Err(GatewayError::DuplicateTransaction(1))));
    assert!(storage.load(2).is_none());

    let result = storage.write_batch(&[Transaction::new(7, "accepted"), Transaction::new(7, "declined")]).await;

    assert!(matches!(result, Err(GatewayError::DuplicateTransaction(7))));
    assert_eq!(storage.len(), 1);

    Ok(())
}

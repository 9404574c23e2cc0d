// Flush Queue Use Case

use crate::domain::QueueId;
use crate::error::{AppError, Result};
use crate::port::TransactionalQueueRepository;
use tracing::info;

/// Remove every entry of a queue (all statuses, left included), keeping the
/// queue itself
///
/// Runs inside one transaction: the whole batch of entries existing at the
/// commit point is removed, or none is. Readers never observe a partial
/// flush.
pub async fn execute(tx_repo: &dyn TransactionalQueueRepository, queue_id: &QueueId) -> Result<u64> {
    let mut tx = tx_repo.begin_transaction().await?;

    if !tx.queue_exists(queue_id).await? {
        tx.rollback().await?;
        return Err(AppError::NotFound(format!("Queue {} not found", queue_id)));
    }

    let removed = tx.delete_entries(queue_id).await?;
    tx.commit().await?;

    info!(queue_id = %queue_id, entries_removed = removed, "Queue flushed");
    Ok(removed)
}

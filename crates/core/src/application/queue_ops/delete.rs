// Delete Queue Use Case

use crate::domain::QueueId;
use crate::error::{AppError, Result};
use crate::port::QueueRepository;
use tracing::info;

/// Delete a queue and cascade-delete all its entries
///
/// The cascade runs as a single statement against the store, so there is no
/// window where the queue is gone but entries remain.
pub async fn execute(repo: &dyn QueueRepository, queue_id: &QueueId) -> Result<()> {
    let removed = repo.delete_queue(queue_id).await?;
    if removed == 0 {
        return Err(AppError::NotFound(format!("Queue {} not found", queue_id)));
    }

    info!(queue_id = %queue_id, "Queue deleted");
    Ok(())
}

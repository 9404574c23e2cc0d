// Leave Queue Use Case

use crate::domain::QueueId;
use crate::error::{AppError, Result};
use crate::port::QueueRepository;
use tracing::info;

/// Mark the caller's active entry as left (row retained for history)
///
/// Resolves the most recently joined active entry for the msisdn, then flips
/// its `left` flag. Fails with NotInQueue if the caller has no active entry.
pub async fn execute(repo: &dyn QueueRepository, queue_id: &QueueId, msisdn: &str) -> Result<()> {
    let entry = repo
        .find_active_entry(queue_id, msisdn)
        .await?
        .ok_or_else(|| AppError::NotInQueue(format!("{} is not in queue {}", msisdn, queue_id)))?;

    // The entry may have been flushed between lookup and update
    if !repo.mark_left(&entry.id).await? {
        return Err(AppError::NotInQueue(format!(
            "{} is not in queue {}",
            msisdn, queue_id
        )));
    }

    info!(entry_id = %entry.id, queue_id = %queue_id, "Caller left queue");
    Ok(())
}

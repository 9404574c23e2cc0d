// Position Use Case - the ordering engine

use crate::domain::QueueId;
use crate::error::{AppError, Result};
use crate::port::QueueRepository;

/// Compute the caller's 1-based rank among active entries
///
/// Rank is the entry's index in the single ordered snapshot of active
/// entries (ascending `joined_at`, insertion order as the clock-resolution
/// tie-break), so positions always form a dense 1..N with no gaps or
/// duplicates. One query gives a consistent snapshot: a concurrently
/// committing join is either fully visible or not at all.
pub async fn execute(repo: &dyn QueueRepository, queue_id: &QueueId, msisdn: &str) -> Result<i64> {
    let entries = repo.list_active_entries(queue_id).await?;

    // Most recently joined active entry wins when an msisdn appears twice
    let index = entries
        .iter()
        .rposition(|e| e.msisdn == msisdn)
        .ok_or_else(|| AppError::NotInQueue(format!("{} is not in queue {}", msisdn, queue_id)))?;

    Ok(index as i64 + 1)
}

// Status Use Cases - the status machine

use crate::domain::{EntryStatus, QueueEntry, QueueId};
use crate::error::{AppError, Result};
use crate::port::{QueueRepository, TimeProvider};
use tracing::info;

fn not_in_queue(queue_id: &QueueId, msisdn: &str) -> AppError {
    AppError::NotInQueue(format!("{} is not in queue {}", msisdn, queue_id))
}

/// Current status and timestamps of the caller's active entry
pub async fn get(
    repo: &dyn QueueRepository,
    queue_id: &QueueId,
    msisdn: &str,
) -> Result<QueueEntry> {
    repo.find_active_entry(queue_id, msisdn)
        .await?
        .ok_or_else(|| not_in_queue(queue_id, msisdn))
}

/// Apply a status transition to the caller's active entry
///
/// Transitions are permissive: the new status is written unconditionally,
/// including backward moves. Timestamp stamping is idempotent and atomic
/// with the status write - the store sets `started_at`/`served_at` only if
/// currently null, inside the same statement, so racing transitions cannot
/// double-stamp.
pub async fn update(
    repo: &dyn QueueRepository,
    time_provider: &dyn TimeProvider,
    queue_id: &QueueId,
    msisdn: &str,
    new_status: &str,
) -> Result<QueueEntry> {
    let status: EntryStatus = new_status.parse().map_err(AppError::Domain)?;

    let entry = repo
        .find_active_entry(queue_id, msisdn)
        .await?
        .ok_or_else(|| not_in_queue(queue_id, msisdn))?;

    let updated = repo
        .apply_status(&entry.id, status, time_provider.now_millis())
        .await?
        // Entry may have been flushed between lookup and update
        .ok_or_else(|| not_in_queue(queue_id, msisdn))?;

    info!(
        entry_id = %updated.id,
        queue_id = %queue_id,
        status = %updated.status,
        "Entry status updated"
    );
    Ok(updated)
}

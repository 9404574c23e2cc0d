// Queue Repository Port (Interface)

use crate::domain::{EntryId, EntryStatus, Queue, QueueEntry, QueueId};
use crate::error::Result;
use async_trait::async_trait;

/// Repository interface for Queue and QueueEntry persistence
#[async_trait]
pub trait QueueRepository: Send + Sync {
    /// Insert a new queue
    async fn insert_queue(&self, queue: &Queue) -> Result<()>;

    /// Find queue by ID
    async fn find_queue(&self, id: &QueueId) -> Result<Option<Queue>>;

    /// Delete a queue and cascade-delete its entries.
    /// Returns the number of queue rows removed (0 if absent).
    async fn delete_queue(&self, id: &QueueId) -> Result<u64>;

    /// Insert a new entry
    async fn insert_entry(&self, entry: &QueueEntry) -> Result<()>;

    /// Find the active (not-left) entry for an msisdn in a queue.
    /// When duplicates share an msisdn, the most recently joined wins.
    async fn find_active_entry(
        &self,
        queue_id: &QueueId,
        msisdn: &str,
    ) -> Result<Option<QueueEntry>>;

    /// Set `left = true` on an entry. Returns false if no row was updated.
    async fn mark_left(&self, entry_id: &EntryId) -> Result<bool>;

    /// Set the entry status and stamp `started_at`/`served_at` if currently
    /// null, as one atomic statement. Returns the updated entry, or None if
    /// the row no longer exists.
    async fn apply_status(
        &self,
        entry_id: &EntryId,
        status: EntryStatus,
        now_millis: i64,
    ) -> Result<Option<QueueEntry>>;

    /// All active entries of a queue, ascending `joined_at` with insertion
    /// order as tie-break
    async fn list_active_entries(&self, queue_id: &QueueId) -> Result<Vec<QueueEntry>>;

    /// Every queue paired with all of its entries (left and served included)
    async fn list_queues_with_entries(&self) -> Result<Vec<(Queue, Vec<QueueEntry>)>>;
}

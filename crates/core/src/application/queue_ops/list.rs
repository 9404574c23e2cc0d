// List All Queues Use Case
//
// Read-only reporting over the entry store's query contract; not coupled to
// the engine's write path.

use crate::domain::{Queue, QueueEntry};
use crate::error::Result;
use crate::port::QueueRepository;

/// Every queue paired with all of its entries, left and served included
pub async fn execute(repo: &dyn QueueRepository) -> Result<Vec<(Queue, Vec<QueueEntry>)>> {
    repo.list_queues_with_entries().await
}

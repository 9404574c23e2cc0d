// Transaction port for atomic operations

use crate::error::Result;
use async_trait::async_trait;

/// Transaction trait for atomic multi-step operations
#[async_trait]
pub trait Transaction: Send {
    /// Commit the transaction
    async fn commit(self: Box<Self>) -> Result<()>;

    /// Rollback the transaction
    async fn rollback(self: Box<Self>) -> Result<()>;
}

/// Transactional QueueRepository operations
#[async_trait]
pub trait TransactionalQueueRepository: Send + Sync {
    /// Begin a new transaction
    async fn begin_transaction(&self) -> Result<Box<dyn QueueRepositoryTransaction>>;
}

/// QueueRepository operations within a transaction
///
/// Covers the multi-statement write paths: join (queue-exists check plus
/// entry insert) and flush (queue-exists check plus bulk delete).
#[async_trait]
pub trait QueueRepositoryTransaction: Transaction {
    /// Check queue existence (within transaction)
    async fn queue_exists(&mut self, queue_id: &crate::domain::QueueId) -> Result<bool>;

    /// Insert entry (within transaction)
    async fn insert_entry(&mut self, entry: &crate::domain::QueueEntry) -> Result<()>;

    /// Delete all entries of a queue (within transaction).
    /// Returns the number of entries removed.
    async fn delete_entries(&mut self, queue_id: &crate::domain::QueueId) -> Result<u64>;
}

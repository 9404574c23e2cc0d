// Queue Service - Core use cases for queue and entry management

pub mod create;
pub mod delete;
pub mod flush;
pub mod join;
pub mod leave;
pub mod list;
pub mod position;
pub mod status;

pub use create::CreateQueueRequest;
pub use join::JoinQueueRequest;

use crate::domain::{Queue, QueueEntry, QueueId};
use crate::error::Result;
use crate::port::{IdProvider, QueueRepository, TimeProvider, TransactionalQueueRepository};
use std::sync::Arc;

/// Queue Service facade over the use cases, with injected dependencies
pub struct QueueService {
    repo: Arc<dyn QueueRepository>,
    tx_repo: Arc<dyn TransactionalQueueRepository>,
    queue_ids: Arc<dyn IdProvider>,
    entry_ids: Arc<dyn IdProvider>,
    time_provider: Arc<dyn TimeProvider>,
}

impl QueueService {
    pub fn new(
        repo: Arc<dyn QueueRepository>,
        tx_repo: Arc<dyn TransactionalQueueRepository>,
        queue_ids: Arc<dyn IdProvider>,
        entry_ids: Arc<dyn IdProvider>,
        time_provider: Arc<dyn TimeProvider>,
    ) -> Self {
        Self {
            repo,
            tx_repo,
            queue_ids,
            entry_ids,
            time_provider,
        }
    }

    /// Create a new queue
    pub async fn create_queue(&self, req: CreateQueueRequest) -> Result<Queue> {
        create::execute(
            self.repo.as_ref(),
            self.queue_ids.as_ref(),
            self.time_provider.as_ref(),
            req,
        )
        .await
    }

    /// Delete a queue and all its entries
    pub async fn delete_queue(&self, queue_id: &QueueId) -> Result<()> {
        delete::execute(self.repo.as_ref(), queue_id).await
    }

    /// Remove all entries of a queue, keeping the queue itself
    pub async fn flush_queue(&self, queue_id: &QueueId) -> Result<u64> {
        flush::execute(self.tx_repo.as_ref(), queue_id).await
    }

    /// Join a queue as a new active entry
    pub async fn join_queue(&self, req: JoinQueueRequest) -> Result<QueueEntry> {
        join::execute(
            self.tx_repo.as_ref(),
            self.entry_ids.as_ref(),
            self.time_provider.as_ref(),
            req,
        )
        .await
    }

    /// Leave a queue (entry row is retained)
    pub async fn leave_queue(&self, queue_id: &QueueId, msisdn: &str) -> Result<()> {
        leave::execute(self.repo.as_ref(), queue_id, msisdn).await
    }

    /// Current status and timestamps of the caller's active entry
    pub async fn get_status(&self, queue_id: &QueueId, msisdn: &str) -> Result<QueueEntry> {
        status::get(self.repo.as_ref(), queue_id, msisdn).await
    }

    /// Update the status of the caller's active entry
    pub async fn update_status(
        &self,
        queue_id: &QueueId,
        msisdn: &str,
        new_status: &str,
    ) -> Result<QueueEntry> {
        status::update(
            self.repo.as_ref(),
            self.time_provider.as_ref(),
            queue_id,
            msisdn,
            new_status,
        )
        .await
    }

    /// 1-based rank of the caller among active entries
    pub async fn position(&self, queue_id: &QueueId, msisdn: &str) -> Result<i64> {
        position::execute(self.repo.as_ref(), queue_id, msisdn).await
    }

    /// Every queue with all of its entries
    pub async fn list_all_queues(&self) -> Result<Vec<(Queue, Vec<QueueEntry>)>> {
        list::execute(self.repo.as_ref()).await
    }
}

//! RPC Request/Response Types
//!
//! Defines the JSON-RPC method parameters and results.

use serde::{Deserialize, Serialize};
use waitline_core::domain::{Queue, QueueEntry};

/// Serialized view of a queue entry
#[derive(Debug, Clone, Serialize)]
pub struct EntryView {
    pub entry_id: String,
    pub msisdn: String,
    pub full_name: Option<String>,
    pub status: String,
    pub joined_at: i64,
    pub started_at: Option<i64>,
    pub served_at: Option<i64>,
    pub left: bool,
}

impl From<QueueEntry> for EntryView {
    fn from(entry: QueueEntry) -> Self {
        Self {
            entry_id: entry.id,
            msisdn: entry.msisdn,
            full_name: entry.full_name,
            status: entry.status.to_string(),
            joined_at: entry.joined_at,
            started_at: entry.started_at,
            served_at: entry.served_at,
            left: entry.left,
        }
    }
}

/// Serialized view of a queue with all its entries
#[derive(Debug, Clone, Serialize)]
pub struct QueueView {
    pub queue_id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: i64,
    pub entries: Vec<EntryView>,
}

impl QueueView {
    pub fn new(queue: Queue, entries: Vec<QueueEntry>) -> Self {
        Self {
            queue_id: queue.id,
            name: queue.name,
            description: queue.description,
            created_at: queue.created_at,
            entries: entries.into_iter().map(EntryView::from).collect(),
        }
    }
}

/// queue.create.v1 - Create a queue
#[derive(Debug, Deserialize)]
pub struct CreateQueueRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateQueueResponse {
    pub queue_id: String,
    pub created_at: i64,
}

/// queue.delete.v1 - Delete a queue and all its entries
#[derive(Debug, Deserialize)]
pub struct DeleteQueueRequest {
    pub queue_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteQueueResponse {
    pub queue_id: String,
    pub deleted: bool,
}

/// queue.flush.v1 - Remove all entries, keep the queue
#[derive(Debug, Deserialize)]
pub struct FlushQueueRequest {
    pub queue_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FlushQueueResponse {
    pub queue_id: String,
    pub entries_removed: u64,
}

/// queue.join.v1 - Join a queue
#[derive(Debug, Deserialize)]
pub struct JoinQueueRequest {
    pub queue_id: String,
    pub msisdn: String,
    #[serde(default)]
    pub full_name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct JoinQueueResponse {
    pub entry_id: String,
    pub status: String,
}

/// queue.leave.v1 - Leave a queue (entry retained)
#[derive(Debug, Deserialize)]
pub struct LeaveQueueRequest {
    pub queue_id: String,
    pub msisdn: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LeaveQueueResponse {
    pub queue_id: String,
    pub left: bool,
}

/// queue.status.v1 - Current status of the caller's active entry
#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub queue_id: String,
    pub msisdn: String,
}

/// queue.updateStatus.v1 - Transition the caller's active entry
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub queue_id: String,
    pub msisdn: String,
    pub status: String,
}

/// queue.position.v1 - 1-based rank among active entries
#[derive(Debug, Deserialize)]
pub struct PositionRequest {
    pub queue_id: String,
    pub msisdn: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PositionResponse {
    pub queue_id: String,
    pub msisdn: String,
    pub position: i64,
}

/// queue.listAll.v1 - All queues with their entries
#[derive(Debug, Deserialize)]
pub struct ListAllRequest {
    // No parameters needed
}

#[derive(Debug, Clone, Serialize)]
pub struct ListAllResponse {
    pub queues: Vec<QueueView>,
}

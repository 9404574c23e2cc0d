// Queue Domain Model

use serde::{Deserialize, Serialize};

/// Queue identifier (opaque, generated by an IdProvider)
pub type QueueId = String;

/// A named waiting line owning a set of entries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Queue {
    pub id: QueueId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: i64, // epoch ms
}

impl Queue {
    /// Create a new queue
    ///
    /// # Arguments
    ///
    /// * `id` - Unique queue ID (injected, not generated)
    /// * `name` - Display name
    /// * `description` - Optional free text
    /// * `created_at` - Creation timestamp in epoch ms (injected, not system time)
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: Option<String>,
        created_at: i64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description,
            created_at,
        }
    }
}

// Create Queue Use Case

use crate::domain::Queue;
use crate::error::{AppError, Result};
use crate::port::{IdProvider, QueueRepository, TimeProvider};
use serde::{Deserialize, Serialize};
use tracing::info;

const MAX_NAME_LEN: usize = 255;

/// Create queue request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateQueueRequest {
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,
}

fn validate_request(req: &CreateQueueRequest) -> Result<()> {
    if req.name.trim().is_empty() {
        return Err(AppError::Validation("Queue name must not be empty".into()));
    }
    if req.name.len() > MAX_NAME_LEN {
        return Err(AppError::Validation(format!(
            "Queue name too long ({} > {} chars)",
            req.name.len(),
            MAX_NAME_LEN
        )));
    }
    Ok(())
}

/// Execute create-queue use case
///
/// # Arguments
///
/// * `repo` - Queue repository
/// * `id_provider` - Queue ID generator (injected for determinism)
/// * `time_provider` - Time provider (injected for determinism)
/// * `req` - Create request
pub async fn execute(
    repo: &dyn QueueRepository,
    id_provider: &dyn IdProvider,
    time_provider: &dyn TimeProvider,
    req: CreateQueueRequest,
) -> Result<Queue> {
    validate_request(&req)?;

    let queue = Queue::new(
        id_provider.generate_id(),
        req.name,
        req.description,
        time_provider.now_millis(),
    );

    repo.insert_queue(&queue).await?;

    info!(queue_id = %queue.id, name = %queue.name, "Queue created");
    Ok(queue)
}

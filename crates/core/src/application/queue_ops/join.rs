// Join Queue Use Case

use crate::domain::QueueEntry;
use crate::error::{AppError, Result};
use crate::port::{IdProvider, TimeProvider, TransactionalQueueRepository};
use serde::{Deserialize, Serialize};
use tracing::info;

const MAX_MSISDN_LEN: usize = 15;
const MAX_FULL_NAME_LEN: usize = 255;

/// Join queue request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinQueueRequest {
    pub queue_id: String,
    pub msisdn: String,

    #[serde(default)]
    pub full_name: Option<String>,
}

fn validate_request(req: &JoinQueueRequest) -> Result<()> {
    if req.queue_id.trim().is_empty() {
        return Err(AppError::Validation("Queue id must not be empty".into()));
    }
    if req.msisdn.is_empty() {
        return Err(AppError::Validation("msisdn must not be empty".into()));
    }
    if req.msisdn.len() > MAX_MSISDN_LEN {
        return Err(AppError::Validation(format!(
            "msisdn too long ({} > {} chars)",
            req.msisdn.len(),
            MAX_MSISDN_LEN
        )));
    }
    let digits = req.msisdn.strip_prefix('+').unwrap_or(&req.msisdn);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AppError::Validation(
            "msisdn must be a phone number (digits with optional leading +)".into(),
        ));
    }
    if let Some(name) = &req.full_name {
        if name.len() > MAX_FULL_NAME_LEN {
            return Err(AppError::Validation(format!(
                "full_name too long ({} > {} chars)",
                name.len(),
                MAX_FULL_NAME_LEN
            )));
        }
    }
    Ok(())
}

/// Execute join use case (with transaction for atomicity)
///
/// The queue-exists check and the entry insert commit together, so a join
/// racing a queue delete either lands before the cascade or fails with
/// NotFound. Duplicate active entries for the same msisdn are permitted.
///
/// # Arguments
///
/// * `tx_repo` - Transactional queue repository
/// * `id_provider` - Entry ID generator (injected for determinism)
/// * `time_provider` - Time provider (injected for determinism)
/// * `req` - Join request
pub async fn execute(
    tx_repo: &dyn TransactionalQueueRepository,
    id_provider: &dyn IdProvider,
    time_provider: &dyn TimeProvider,
    req: JoinQueueRequest,
) -> Result<QueueEntry> {
    validate_request(&req)?;

    let mut tx = tx_repo.begin_transaction().await?;

    if !tx.queue_exists(&req.queue_id).await? {
        tx.rollback().await?;
        return Err(AppError::NotFound(format!(
            "Queue {} not found",
            req.queue_id
        )));
    }

    // joined_at is assigned here and committed with the row, so position
    // reads never observe an entry before its ordering key is durable
    let entry = QueueEntry::new(
        id_provider.generate_id(),
        req.queue_id,
        req.msisdn,
        req.full_name,
        time_provider.now_millis(),
    );

    tx.insert_entry(&entry).await?;
    tx.commit().await?;

    info!(entry_id = %entry.id, queue_id = %entry.queue_id, "Caller joined queue");
    Ok(entry)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(msisdn: &str) -> JoinQueueRequest {
        JoinQueueRequest {
            queue_id: "Q1".to_string(),
            msisdn: msisdn.to_string(),
            full_name: None,
        }
    }

    #[test]
    fn test_validate_empty_msisdn() {
        let result = validate_request(&request(""));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("empty"));
    }

    #[test]
    fn test_validate_msisdn_too_long() {
        let result = validate_request(&request("2547000000000001"));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("too long"));
    }

    #[test]
    fn test_validate_msisdn_not_a_number() {
        let result = validate_request(&request("call-me"));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("phone number"));
    }

    #[test]
    fn test_validate_accepts_plus_prefix() {
        assert!(validate_request(&request("+254700000001")).is_ok());
        assert!(validate_request(&request("0700000001")).is_ok());
    }

    #[test]
    fn test_validate_rejects_bare_plus() {
        assert!(validate_request(&request("+")).is_err());
    }
}

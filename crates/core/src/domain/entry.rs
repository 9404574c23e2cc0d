// Queue Entry Domain Model

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::error::DomainError;
use crate::domain::queue::QueueId;

/// Entry ID (opaque, generated by an IdProvider)
pub type EntryId = String;

/// Caller identifier (phone-number-shaped string)
pub type Msisdn = String;

/// Service status of a queue entry
///
/// Transitions are deliberately unrestricted: an operator may move an entry
/// backward (e.g. served -> in_progress) and the engine accepts it. Only the
/// timestamp stamping is guarded, see [`QueueEntry::apply_status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
    Waiting,
    InProgress,
    Served,
}

impl std::fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryStatus::Waiting => write!(f, "waiting"),
            EntryStatus::InProgress => write!(f, "in_progress"),
            EntryStatus::Served => write!(f, "served"),
        }
    }
}

impl FromStr for EntryStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "waiting" => Ok(EntryStatus::Waiting),
            "in_progress" => Ok(EntryStatus::InProgress),
            "served" => Ok(EntryStatus::Served),
            other => Err(DomainError::InvalidStatus(other.to_string())),
        }
    }
}

/// One caller's occupancy of a queue, from join until removal
///
/// `joined_at` is the sole ordering key for position ranking and never
/// changes after creation. `left` excludes the entry from active counts but
/// keeps the row for history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueEntry {
    pub id: EntryId,
    pub queue_id: QueueId,
    pub msisdn: Msisdn,
    pub full_name: Option<String>,
    pub joined_at: i64, // epoch ms
    pub left: bool,
    pub status: EntryStatus,
    pub started_at: Option<i64>,
    pub served_at: Option<i64>,
}

impl QueueEntry {
    /// Create a new active entry in `waiting` status
    ///
    /// # Arguments
    ///
    /// * `id` - Unique entry ID (injected, not generated)
    /// * `queue_id` - Owning queue
    /// * `msisdn` - Caller phone identifier
    /// * `full_name` - Optional display name
    /// * `joined_at` - Join timestamp in epoch ms (injected, not system time)
    pub fn new(
        id: impl Into<String>,
        queue_id: impl Into<String>,
        msisdn: impl Into<String>,
        full_name: Option<String>,
        joined_at: i64,
    ) -> Self {
        Self {
            id: id.into(),
            queue_id: queue_id.into(),
            msisdn: msisdn.into(),
            full_name,
            joined_at,
            left: false,
            status: EntryStatus::Waiting,
            started_at: None,
            served_at: None,
        }
    }

    /// Whether this entry counts toward position ranking
    pub fn is_active(&self) -> bool {
        !self.left
    }

    /// Apply a status change with idempotent timestamp stamping
    ///
    /// The status itself is set unconditionally. `started_at` is stamped only
    /// on the first transition into `in_progress`, `served_at` only on the
    /// first transition into `served`; re-entering a visited state never
    /// re-stamps. The persistence layer mirrors this rule as a set-if-null
    /// conditional update so it also holds under concurrent writers.
    pub fn apply_status(&mut self, new_status: EntryStatus, now_millis: i64) {
        self.status = new_status;
        match new_status {
            EntryStatus::InProgress if self.started_at.is_none() => {
                self.started_at = Some(now_millis);
            }
            EntryStatus::Served if self.served_at.is_none() => {
                self.served_at = Some(now_millis);
            }
            _ => {}
        }
    }

    /// Mark the caller as having left the queue (row is retained)
    pub fn mark_left(&mut self) {
        self.left = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_round_trip() {
        for s in ["waiting", "in_progress", "served"] {
            let status: EntryStatus = s.parse().unwrap();
            assert_eq!(status.to_string(), s);
        }
    }

    #[test]
    fn test_status_parse_rejects_unknown() {
        let err = "done".parse::<EntryStatus>().unwrap_err();
        assert!(matches!(err, DomainError::InvalidStatus(_)));
    }

    #[test]
    fn test_new_entry_defaults() {
        let entry = QueueEntry::new("e-1", "q-1", "254700000001", None, 1000);
        assert!(entry.is_active());
        assert_eq!(entry.status, EntryStatus::Waiting);
        assert!(entry.started_at.is_none());
        assert!(entry.served_at.is_none());
    }

    #[test]
    fn test_apply_status_stamps_once() {
        let mut entry = QueueEntry::new("e-1", "q-1", "254700000001", None, 1000);

        entry.apply_status(EntryStatus::InProgress, 2000);
        assert_eq!(entry.started_at, Some(2000));

        entry.apply_status(EntryStatus::Served, 3000);
        assert_eq!(entry.served_at, Some(3000));

        // Backward transition is allowed but must not re-stamp
        entry.apply_status(EntryStatus::InProgress, 4000);
        assert_eq!(entry.status, EntryStatus::InProgress);
        assert_eq!(entry.started_at, Some(2000));
        assert_eq!(entry.served_at, Some(3000));
    }

    #[test]
    fn test_mark_left_retains_row_state() {
        let mut entry = QueueEntry::new("e-1", "q-1", "254700000001", None, 1000);
        entry.apply_status(EntryStatus::InProgress, 2000);
        entry.mark_left();
        assert!(!entry.is_active());
        assert_eq!(entry.status, EntryStatus::InProgress);
        assert_eq!(entry.started_at, Some(2000));
    }
}

// SQLite QueueRepository Implementation

use crate::SqliteQueueTransaction;
use async_trait::async_trait;
use sqlx::SqlitePool;
use std::collections::HashMap;
use waitline_core::domain::{EntryId, EntryStatus, Queue, QueueEntry, QueueId};
use waitline_core::error::{AppError, Result};
use waitline_core::port::{QueueRepository, QueueRepositoryTransaction, TransactionalQueueRepository};

// Helper to convert sqlx::Error to AppError with structured information
pub(crate) fn map_sqlx_error(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) => {
            // Extract database-specific error code and message
            if let Some(code) = db_err.code() {
                let code_str = code.as_ref();

                // SQLite error codes: https://www.sqlite.org/rescode.html
                match code_str {
                    "2067" | "1555" => AppError::Database(format!(
                        "Unique constraint violation: {} ({})",
                        db_err.message(),
                        code_str
                    )),
                    "787" | "3850" => AppError::Database(format!(
                        "Foreign key constraint violation: {} ({})",
                        db_err.message(),
                        code_str
                    )),
                    "5" => {
                        // SQLITE_BUSY - a competing writer held the lock past
                        // the busy timeout
                        AppError::Conflict(format!(
                            "Database locked (SQLITE_BUSY): {}",
                            db_err.message()
                        ))
                    }
                    "13" => {
                        // SQLITE_FULL - database or disk is full
                        AppError::Database(format!("Database full: {}", db_err.message()))
                    }
                    _ => AppError::Database(format!(
                        "Database error [{}]: {}",
                        code_str,
                        db_err.message()
                    )),
                }
            } else {
                AppError::Database(format!("Database error: {}", db_err.message()))
            }
        }
        sqlx::Error::RowNotFound => AppError::Database("Row not found".to_string()),
        sqlx::Error::ColumnNotFound(col) => {
            AppError::Database(format!("Column not found: {}", col))
        }
        _ => {
            // Connection, pool, protocol errors
            AppError::Database(err.to_string())
        }
    }
}

pub struct SqliteQueueRepository {
    pool: SqlitePool,
}

impl SqliteQueueRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QueueRepository for SqliteQueueRepository {
    async fn insert_queue(&self, queue: &Queue) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO queues (id, name, description, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&queue.id)
        .bind(&queue.name)
        .bind(&queue.description)
        .bind(queue.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn find_queue(&self, id: &QueueId) -> Result<Option<Queue>> {
        let row = sqlx::query_as::<_, QueueRow>("SELECT * FROM queues WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.map(|r| r.into_queue()))
    }

    async fn delete_queue(&self, id: &QueueId) -> Result<u64> {
        // Entries go with the queue via ON DELETE CASCADE, so the cascade is
        // atomic with the queue row removal
        let result = sqlx::query("DELETE FROM queues WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected())
    }

    async fn insert_entry(&self, entry: &QueueEntry) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO queue_entries (
                id, queue_id, msisdn, full_name, joined_at,
                "left", status, started_at, served_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&entry.id)
        .bind(&entry.queue_id)
        .bind(&entry.msisdn)
        .bind(&entry.full_name)
        .bind(entry.joined_at)
        .bind(if entry.left { 1 } else { 0 })
        .bind(entry.status.to_string())
        .bind(entry.started_at)
        .bind(entry.served_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn find_active_entry(
        &self,
        queue_id: &QueueId,
        msisdn: &str,
    ) -> Result<Option<QueueEntry>> {
        // Most recently joined active entry wins when duplicates share an
        // msisdn; rowid breaks clock-resolution ties by insertion order
        let row = sqlx::query_as::<_, EntryRow>(
            r#"
            SELECT * FROM queue_entries
            WHERE queue_id = ? AND msisdn = ? AND "left" = 0
            ORDER BY joined_at DESC, rowid DESC
            LIMIT 1
            "#,
        )
        .bind(queue_id)
        .bind(msisdn)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(|r| r.into_entry()))
    }

    async fn mark_left(&self, entry_id: &EntryId) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE queue_entries
            SET "left" = 1
            WHERE id = ? AND "left" = 0
            "#,
        )
        .bind(entry_id)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn apply_status(
        &self,
        entry_id: &EntryId,
        status: EntryStatus,
        now_millis: i64,
    ) -> Result<Option<QueueEntry>> {
        // Status is written unconditionally; the stamps are set-if-null in
        // the same statement, so racing transitions cannot double-stamp
        let row = sqlx::query_as::<_, EntryRow>(
            r#"
            UPDATE queue_entries
            SET status = ?1,
                started_at = CASE
                    WHEN ?1 = 'in_progress' AND started_at IS NULL THEN ?2
                    ELSE started_at
                END,
                served_at = CASE
                    WHEN ?1 = 'served' AND served_at IS NULL THEN ?2
                    ELSE served_at
                END
            WHERE id = ?3
            RETURNING *
            "#,
        )
        .bind(status.to_string())
        .bind(now_millis)
        .bind(entry_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(|r| r.into_entry()))
    }

    async fn list_active_entries(&self, queue_id: &QueueId) -> Result<Vec<QueueEntry>> {
        let rows: Vec<EntryRow> = sqlx::query_as(
            r#"
            SELECT * FROM queue_entries
            WHERE queue_id = ? AND "left" = 0
            ORDER BY joined_at ASC, rowid ASC
            "#,
        )
        .bind(queue_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(|row| row.into_entry()).collect())
    }

    async fn list_queues_with_entries(&self) -> Result<Vec<(Queue, Vec<QueueEntry>)>> {
        let queues: Vec<QueueRow> = sqlx::query_as("SELECT * FROM queues ORDER BY created_at ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        let entries: Vec<EntryRow> = sqlx::query_as(
            "SELECT * FROM queue_entries ORDER BY joined_at ASC, rowid ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        let mut by_queue: HashMap<String, Vec<QueueEntry>> = HashMap::new();
        for row in entries {
            let entry = row.into_entry();
            by_queue.entry(entry.queue_id.clone()).or_default().push(entry);
        }

        Ok(queues
            .into_iter()
            .map(|row| {
                let queue = row.into_queue();
                let entries = by_queue.remove(&queue.id).unwrap_or_default();
                (queue, entries)
            })
            .collect())
    }
}

#[async_trait]
impl TransactionalQueueRepository for SqliteQueueRepository {
    async fn begin_transaction(&self) -> Result<Box<dyn QueueRepositoryTransaction>> {
        // Writers must take the write lock up front. A deferred BEGIN would
        // snapshot on the exists-check and the later write upgrade fails with
        // SQLITE_BUSY immediately, bypassing the busy timeout.
        let tx = self
            .pool
            .begin_with("BEGIN IMMEDIATE")
            .await
            .map_err(map_sqlx_error)?;
        Ok(Box::new(SqliteQueueTransaction::new(tx)))
    }
}

/// SQLite row representation of a queue
#[derive(Debug, sqlx::FromRow)]
struct QueueRow {
    id: String,
    name: String,
    description: Option<String>,
    created_at: i64,
}

impl QueueRow {
    fn into_queue(self) -> Queue {
        Queue {
            id: self.id,
            name: self.name,
            description: self.description,
            created_at: self.created_at,
        }
    }
}

/// SQLite row representation of a queue entry
#[derive(Debug, sqlx::FromRow)]
struct EntryRow {
    id: String,
    queue_id: String,
    msisdn: String,
    full_name: Option<String>,
    joined_at: i64,
    left: i32, // SQLite boolean as integer
    status: String,
    started_at: Option<i64>,
    served_at: Option<i64>,
}

impl EntryRow {
    fn into_entry(self) -> QueueEntry {
        let status = self.status.parse().unwrap_or(EntryStatus::Waiting);

        QueueEntry {
            id: self.id,
            queue_id: self.queue_id,
            msisdn: self.msisdn,
            full_name: self.full_name,
            joined_at: self.joined_at,
            left: self.left != 0,
            status,
            started_at: self.started_at,
            served_at: self.served_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_pool, run_migrations};

    async fn setup_test_db() -> SqlitePool {
        let pool = create_pool("sqlite::memory:").await.unwrap();
        run_migrations(&pool).await.unwrap();
        pool
    }

    async fn insert_test_queue(repo: &SqliteQueueRepository, id: &str) {
        let queue = Queue::new(id, "Test queue", None, 1000);
        repo.insert_queue(&queue).await.unwrap();
    }

    #[tokio::test]
    async fn test_insert_and_find_queue() {
        let repo = SqliteQueueRepository::new(setup_test_db().await);

        let queue = Queue::new("Q1", "Front desk", Some("walk-ins".to_string()), 1000);
        repo.insert_queue(&queue).await.unwrap();

        let found = repo.find_queue(&"Q1".to_string()).await.unwrap().unwrap();
        assert_eq!(found.name, "Front desk");
        assert_eq!(found.description.as_deref(), Some("walk-ins"));
        assert_eq!(found.created_at, 1000);
    }

    #[tokio::test]
    async fn test_delete_queue_cascades() {
        let repo = SqliteQueueRepository::new(setup_test_db().await);
        insert_test_queue(&repo, "Q1").await;

        let entry = QueueEntry::new("E1", "Q1", "254700000001", None, 2000);
        repo.insert_entry(&entry).await.unwrap();

        let removed = repo.delete_queue(&"Q1".to_string()).await.unwrap();
        assert_eq!(removed, 1);

        assert!(repo.find_queue(&"Q1".to_string()).await.unwrap().is_none());
        let orphan = repo
            .find_active_entry(&"Q1".to_string(), "254700000001")
            .await
            .unwrap();
        assert!(orphan.is_none());
    }

    #[tokio::test]
    async fn test_delete_missing_queue_reports_zero() {
        let repo = SqliteQueueRepository::new(setup_test_db().await);
        let removed = repo.delete_queue(&"nope".to_string()).await.unwrap();
        assert_eq!(removed, 0);
    }

    #[tokio::test]
    async fn test_find_active_entry_prefers_most_recent() {
        let repo = SqliteQueueRepository::new(setup_test_db().await);
        insert_test_queue(&repo, "Q1").await;

        let older = QueueEntry::new("E1", "Q1", "254700000001", None, 1000);
        let newer = QueueEntry::new("E2", "Q1", "254700000001", None, 2000);
        repo.insert_entry(&older).await.unwrap();
        repo.insert_entry(&newer).await.unwrap();

        let found = repo
            .find_active_entry(&"Q1".to_string(), "254700000001")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, "E2");
    }

    #[tokio::test]
    async fn test_find_active_entry_skips_left() {
        let repo = SqliteQueueRepository::new(setup_test_db().await);
        insert_test_queue(&repo, "Q1").await;

        let entry = QueueEntry::new("E1", "Q1", "254700000001", None, 1000);
        repo.insert_entry(&entry).await.unwrap();
        assert!(repo.mark_left(&"E1".to_string()).await.unwrap());

        let found = repo
            .find_active_entry(&"Q1".to_string(), "254700000001")
            .await
            .unwrap();
        assert!(found.is_none());

        // Second mark is a no-op
        assert!(!repo.mark_left(&"E1".to_string()).await.unwrap());
    }

    #[tokio::test]
    async fn test_apply_status_stamps_once() {
        let repo = SqliteQueueRepository::new(setup_test_db().await);
        insert_test_queue(&repo, "Q1").await;

        let entry = QueueEntry::new("E1", "Q1", "254700000001", None, 1000);
        repo.insert_entry(&entry).await.unwrap();

        let id = "E1".to_string();
        let updated = repo
            .apply_status(&id, EntryStatus::InProgress, 2000)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.status, EntryStatus::InProgress);
        assert_eq!(updated.started_at, Some(2000));

        // Re-entering the state must not re-stamp
        let again = repo
            .apply_status(&id, EntryStatus::InProgress, 9999)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(again.started_at, Some(2000));

        let served = repo
            .apply_status(&id, EntryStatus::Served, 3000)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(served.served_at, Some(3000));
        assert_eq!(served.started_at, Some(2000));
    }

    #[tokio::test]
    async fn test_apply_status_missing_entry() {
        let repo = SqliteQueueRepository::new(setup_test_db().await);
        let result = repo
            .apply_status(&"ghost".to_string(), EntryStatus::Served, 1000)
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_list_active_entries_ordering() {
        let repo = SqliteQueueRepository::new(setup_test_db().await);
        insert_test_queue(&repo, "Q1").await;

        // Same joined_at for E2/E3: insertion order must break the tie
        for (id, msisdn, joined_at) in [
            ("E1", "100", 1000),
            ("E2", "200", 2000),
            ("E3", "300", 2000),
            ("E4", "400", 3000),
        ] {
            let entry = QueueEntry::new(id, "Q1", msisdn, None, joined_at);
            repo.insert_entry(&entry).await.unwrap();
        }
        repo.mark_left(&"E4".to_string()).await.unwrap();

        let active = repo.list_active_entries(&"Q1".to_string()).await.unwrap();
        let ids: Vec<&str> = active.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["E1", "E2", "E3"]);
    }

    #[tokio::test]
    async fn test_list_queues_with_entries_includes_left() {
        let repo = SqliteQueueRepository::new(setup_test_db().await);
        insert_test_queue(&repo, "Q1").await;
        insert_test_queue(&repo, "Q2").await;

        let entry = QueueEntry::new("E1", "Q1", "100", None, 1000);
        repo.insert_entry(&entry).await.unwrap();
        repo.mark_left(&"E1".to_string()).await.unwrap();

        let all = repo.list_queues_with_entries().await.unwrap();
        assert_eq!(all.len(), 2);

        let (_, q1_entries) = all.iter().find(|(q, _)| q.id == "Q1").unwrap();
        assert_eq!(q1_entries.len(), 1);
        assert!(q1_entries[0].left);

        let (_, q2_entries) = all.iter().find(|(q, _)| q.id == "Q2").unwrap();
        assert!(q2_entries.is_empty());
    }
}

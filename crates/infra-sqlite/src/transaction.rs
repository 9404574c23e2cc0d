// SQLite Transaction Implementation

use crate::queue_repository::map_sqlx_error;
use async_trait::async_trait;
use sqlx::{Sqlite, Transaction as SqlxTransaction};
use waitline_core::domain::{QueueEntry, QueueId};
use waitline_core::error::Result;
use waitline_core::port::{QueueRepositoryTransaction, Transaction};

pub struct SqliteQueueTransaction<'a> {
    tx: SqlxTransaction<'a, Sqlite>,
}

impl<'a> SqliteQueueTransaction<'a> {
    pub fn new(tx: SqlxTransaction<'a, Sqlite>) -> Self {
        Self { tx }
    }
}

#[async_trait]
impl Transaction for SqliteQueueTransaction<'_> {
    async fn commit(mut self: Box<Self>) -> Result<()> {
        self.tx.commit().await.map_err(map_sqlx_error)?;
        Ok(())
    }

    async fn rollback(mut self: Box<Self>) -> Result<()> {
        self.tx.rollback().await.map_err(map_sqlx_error)?;
        Ok(())
    }
}

#[async_trait]
impl QueueRepositoryTransaction for SqliteQueueTransaction<'_> {
    async fn queue_exists(&mut self, queue_id: &QueueId) -> Result<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM queues WHERE id = ?")
            .bind(queue_id)
            .fetch_one(&mut *self.tx)
            .await
            .map_err(map_sqlx_error)?;

        Ok(count > 0)
    }

    async fn insert_entry(&mut self, entry: &QueueEntry) -> Result<()> {
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
        .execute(&mut *self.tx)
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn delete_entries(&mut self, queue_id: &QueueId) -> Result<u64> {
        let result = sqlx::query("DELETE FROM queue_entries WHERE queue_id = ?")
            .bind(queue_id)
            .execute(&mut *self.tx)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected())
    }
}

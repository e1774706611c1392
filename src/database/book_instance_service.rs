//! BookInstance store - CRUD operations for the book_instances collection

use anyhow::{Context, Result};
use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::{BookInstance, InstanceStatus, InstanceWithBook};

/// Validated field set for a BookInstance write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInstance {
    pub book_id: Uuid,
    pub imprint: String,
    pub status: InstanceStatus,
    pub due_back: Option<NaiveDate>,
}

#[derive(Clone, Debug)]
pub struct BookInstanceService {
    pool: PgPool,
}

impl BookInstanceService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_instance(&self, fields: &NewInstance) -> Result<Uuid> {
        let instance_id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO book_instances (instance_id, book_id, imprint, status, due_back) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(instance_id)
        .bind(fields.book_id)
        .bind(&fields.imprint)
        .bind(fields.status.as_str())
        .bind(fields.due_back)
        .execute(&self.pool)
        .await
        .context("Failed to create BookInstance")?;
        info!(
            "Created BookInstance {} for Book {}",
            instance_id, fields.book_id
        );
        Ok(instance_id)
    }

    pub async fn get_instance(&self, instance_id: Uuid) -> Result<Option<BookInstance>> {
        sqlx::query_as::<_, BookInstance>(
            "SELECT instance_id, book_id, imprint, status, due_back \
             FROM book_instances WHERE instance_id = $1",
        )
        .bind(instance_id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to get BookInstance by ID")
    }

    /// Instance list rows with the book reference resolved inline. Imprint
    /// then identity ascending for deterministic page output.
    pub async fn list_instances_with_books(&self) -> Result<Vec<InstanceWithBook>> {
        sqlx::query_as::<_, InstanceWithBook>(
            "SELECT i.instance_id, i.book_id, i.imprint, i.status, i.due_back, b.title \
             FROM book_instances i LEFT JOIN books b ON b.book_id = i.book_id \
             ORDER BY i.imprint, i.instance_id",
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list BookInstances")
    }

    pub async fn list_instances_by_book(&self, book_id: Uuid) -> Result<Vec<BookInstance>> {
        sqlx::query_as::<_, BookInstance>(
            "SELECT instance_id, book_id, imprint, status, due_back \
             FROM book_instances WHERE book_id = $1 ORDER BY imprint, instance_id",
        )
        .bind(book_id)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list BookInstances by Book")
    }

    pub async fn update_instance(&self, instance_id: Uuid, fields: &NewInstance) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE book_instances SET book_id = $1, imprint = $2, status = $3, \
             due_back = $4 WHERE instance_id = $5",
        )
        .bind(fields.book_id)
        .bind(&fields.imprint)
        .bind(fields.status.as_str())
        .bind(fields.due_back)
        .bind(instance_id)
        .execute(&self.pool)
        .await
        .context("Failed to update BookInstance")?;
        if result.rows_affected() > 0 {
            info!("Updated BookInstance {}", instance_id);
        }
        Ok(result.rows_affected() > 0)
    }

    /// Unconditional delete; instances are leaf entities with no
    /// dependents.
    pub async fn delete_instance(&self, instance_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM book_instances WHERE instance_id = $1")
            .bind(instance_id)
            .execute(&self.pool)
            .await
            .context("Failed to delete BookInstance")?;
        if result.rows_affected() > 0 {
            info!("Deleted BookInstance {}", instance_id);
        }
        Ok(result.rows_affected() > 0)
    }

    pub async fn count_instances(&self) -> Result<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM book_instances")
            .fetch_one(&self.pool)
            .await
            .context("Failed to count BookInstances")
    }

    pub async fn count_available_instances(&self) -> Result<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM book_instances WHERE status = $1")
            .bind(InstanceStatus::Available.as_str())
            .fetch_one(&self.pool)
            .await
            .context("Failed to count available BookInstances")
    }

    pub async fn count_instances_by_book(&self, book_id: Uuid) -> Result<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM book_instances WHERE book_id = $1")
            .bind(book_id)
            .fetch_one(&self.pool)
            .await
            .context("Failed to count BookInstances by Book")
    }
}

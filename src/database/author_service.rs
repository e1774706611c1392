//! Author store - CRUD operations for the authors collection

use anyhow::{Context, Result};
use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::Author;

/// Validated field set for an Author write. Produced by the validation
/// layer; strings arrive trimmed and HTML-escaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAuthor {
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

#[derive(Clone, Debug)]
pub struct AuthorService {
    pool: PgPool,
}

impl AuthorService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_author(&self, fields: &NewAuthor) -> Result<Uuid> {
        let author_id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO authors (author_id, first_name, family_name, date_of_birth, date_of_death) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(author_id)
        .bind(&fields.first_name)
        .bind(&fields.family_name)
        .bind(fields.date_of_birth)
        .bind(fields.date_of_death)
        .execute(&self.pool)
        .await
        .context("Failed to create Author")?;
        info!("Created Author {} ('{}')", author_id, fields.family_name);
        Ok(author_id)
    }

    pub async fn get_author(&self, author_id: Uuid) -> Result<Option<Author>> {
        sqlx::query_as::<_, Author>(
            "SELECT author_id, first_name, family_name, date_of_birth, date_of_death \
             FROM authors WHERE author_id = $1",
        )
        .bind(author_id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to get Author by ID")
    }

    /// All authors, family name then first name ascending, for a
    /// deterministic list page.
    pub async fn list_authors(&self) -> Result<Vec<Author>> {
        sqlx::query_as::<_, Author>(
            "SELECT author_id, first_name, family_name, date_of_birth, date_of_death \
             FROM authors ORDER BY family_name, first_name",
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list Authors")
    }

    /// Full replace of the mutable fields; identity is preserved.
    pub async fn update_author(&self, author_id: Uuid, fields: &NewAuthor) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE authors SET first_name = $1, family_name = $2, \
             date_of_birth = $3, date_of_death = $4 WHERE author_id = $5",
        )
        .bind(&fields.first_name)
        .bind(&fields.family_name)
        .bind(fields.date_of_birth)
        .bind(fields.date_of_death)
        .bind(author_id)
        .execute(&self.pool)
        .await
        .context("Failed to update Author")?;
        if result.rows_affected() > 0 {
            info!("Updated Author {}", author_id);
        }
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_author(&self, author_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM authors WHERE author_id = $1")
            .bind(author_id)
            .execute(&self.pool)
            .await
            .context("Failed to delete Author")?;
        if result.rows_affected() > 0 {
            info!("Deleted Author {}", author_id);
        }
        Ok(result.rows_affected() > 0)
    }

    pub async fn count_authors(&self) -> Result<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM authors")
            .fetch_one(&self.pool)
            .await
            .context("Failed to count Authors")
    }
}

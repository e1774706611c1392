//! Genre store - CRUD operations for the genres collection

use anyhow::{Context, Result};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::Genre;

/// Validated field set for a Genre write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGenre {
    pub name: String,
}

#[derive(Clone, Debug)]
pub struct GenreService {
    pool: PgPool,
}

impl GenreService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_genre(&self, fields: &NewGenre) -> Result<Uuid> {
        let genre_id = Uuid::new_v4();
        sqlx::query("INSERT INTO genres (genre_id, name) VALUES ($1, $2)")
            .bind(genre_id)
            .bind(&fields.name)
            .execute(&self.pool)
            .await
            .context("Failed to create Genre")?;
        info!("Created Genre {} ('{}')", genre_id, fields.name);
        Ok(genre_id)
    }

    pub async fn get_genre(&self, genre_id: Uuid) -> Result<Option<Genre>> {
        sqlx::query_as::<_, Genre>("SELECT genre_id, name FROM genres WHERE genre_id = $1")
            .bind(genre_id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to get Genre by ID")
    }

    /// Case-insensitive name lookup, used by the duplicate check on create.
    /// The store collation stands in for locale-aware comparison.
    pub async fn find_genre_by_name(&self, name: &str) -> Result<Option<Genre>> {
        sqlx::query_as::<_, Genre>(
            "SELECT genre_id, name FROM genres WHERE LOWER(name) = LOWER($1)",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to get Genre by name")
    }

    pub async fn list_genres(&self) -> Result<Vec<Genre>> {
        sqlx::query_as::<_, Genre>("SELECT genre_id, name FROM genres ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .context("Failed to list Genres")
    }

    /// Resolve a reference set to full records, name ascending.
    pub async fn get_genres_by_ids(&self, genre_ids: &[Uuid]) -> Result<Vec<Genre>> {
        if genre_ids.is_empty() {
            return Ok(Vec::new());
        }
        sqlx::query_as::<_, Genre>(
            "SELECT genre_id, name FROM genres WHERE genre_id = ANY($1) ORDER BY name",
        )
        .bind(genre_ids)
        .fetch_all(&self.pool)
        .await
        .context("Failed to resolve Genre references")
    }

    pub async fn update_genre(&self, genre_id: Uuid, fields: &NewGenre) -> Result<bool> {
        let result = sqlx::query("UPDATE genres SET name = $1 WHERE genre_id = $2")
            .bind(&fields.name)
            .bind(genre_id)
            .execute(&self.pool)
            .await
            .context("Failed to update Genre")?;
        if result.rows_affected() > 0 {
            info!("Updated Genre {}", genre_id);
        }
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_genre(&self, genre_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM genres WHERE genre_id = $1")
            .bind(genre_id)
            .execute(&self.pool)
            .await
            .context("Failed to delete Genre")?;
        if result.rows_affected() > 0 {
            info!("Deleted Genre {}", genre_id);
        }
        Ok(result.rows_affected() > 0)
    }

    pub async fn count_genres(&self) -> Result<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM genres")
            .fetch_one(&self.pool)
            .await
            .context("Failed to count Genres")
    }
}

//! Book store - CRUD operations for the books collection
//!
//! The genre reference set persists as a UUID array on the book row, so a
//! book stays one document and genre membership queries reduce to an
//! `= ANY(genre_ids)` predicate.

use anyhow::{Context, Result};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::{Book, BookSummary, BookTitle, BookWithAuthor};

/// Validated field set for a Book write. The references are well-formed
/// identities; whether they resolve is the integrity layer's concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author_id: Uuid,
    pub summary: String,
    pub isbn: String,
    pub genre_ids: Vec<Uuid>,
}

#[derive(Clone, Debug)]
pub struct BookService {
    pool: PgPool,
}

impl BookService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_book(&self, fields: &NewBook) -> Result<Uuid> {
        let book_id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO books (book_id, title, author_id, summary, isbn, genre_ids) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(book_id)
        .bind(&fields.title)
        .bind(fields.author_id)
        .bind(&fields.summary)
        .bind(&fields.isbn)
        .bind(&fields.genre_ids)
        .execute(&self.pool)
        .await
        .context("Failed to create Book")?;
        info!("Created Book {} ('{}')", book_id, fields.title);
        Ok(book_id)
    }

    pub async fn get_book(&self, book_id: Uuid) -> Result<Option<Book>> {
        sqlx::query_as::<_, Book>(
            "SELECT book_id, title, author_id, summary, isbn, genre_ids \
             FROM books WHERE book_id = $1",
        )
        .bind(book_id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to get Book by ID")
    }

    /// Book list rows with the author reference resolved inline, title
    /// ascending. Left join: a dangling author renders blank rather than
    /// hiding the book.
    pub async fn list_books_with_authors(&self) -> Result<Vec<BookWithAuthor>> {
        sqlx::query_as::<_, BookWithAuthor>(
            "SELECT b.book_id, b.title, a.first_name, a.family_name \
             FROM books b LEFT JOIN authors a ON a.author_id = b.author_id \
             ORDER BY b.title",
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list Books")
    }

    /// Title + summary projection of every book referencing the author,
    /// title ascending.
    pub async fn list_books_by_author(&self, author_id: Uuid) -> Result<Vec<BookSummary>> {
        sqlx::query_as::<_, BookSummary>(
            "SELECT book_id, title, summary FROM books WHERE author_id = $1 ORDER BY title",
        )
        .bind(author_id)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list Books by Author")
    }

    /// Title + summary projection of every book whose reference set
    /// contains the genre, title ascending.
    pub async fn list_books_by_genre(&self, genre_id: Uuid) -> Result<Vec<BookSummary>> {
        sqlx::query_as::<_, BookSummary>(
            "SELECT book_id, title, summary FROM books WHERE $1 = ANY(genre_ids) ORDER BY title",
        )
        .bind(genre_id)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list Books by Genre")
    }

    pub async fn list_book_titles(&self) -> Result<Vec<BookTitle>> {
        sqlx::query_as::<_, BookTitle>("SELECT book_id, title FROM books ORDER BY title")
            .fetch_all(&self.pool)
            .await
            .context("Failed to list Book titles")
    }

    pub async fn update_book(&self, book_id: Uuid, fields: &NewBook) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE books SET title = $1, author_id = $2, summary = $3, isbn = $4, \
             genre_ids = $5 WHERE book_id = $6",
        )
        .bind(&fields.title)
        .bind(fields.author_id)
        .bind(&fields.summary)
        .bind(&fields.isbn)
        .bind(&fields.genre_ids)
        .bind(book_id)
        .execute(&self.pool)
        .await
        .context("Failed to update Book")?;
        if result.rows_affected() > 0 {
            info!("Updated Book {}", book_id);
        }
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_book(&self, book_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM books WHERE book_id = $1")
            .bind(book_id)
            .execute(&self.pool)
            .await
            .context("Failed to delete Book")?;
        if result.rows_affected() > 0 {
            info!("Deleted Book {}", book_id);
        }
        Ok(result.rows_affected() > 0)
    }

    pub async fn count_books(&self) -> Result<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await
            .context("Failed to count Books")
    }

    pub async fn count_books_by_author(&self, author_id: Uuid) -> Result<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM books WHERE author_id = $1")
            .bind(author_id)
            .fetch_one(&self.pool)
            .await
            .context("Failed to count Books by Author")
    }

    pub async fn count_books_by_genre(&self, genre_id: Uuid) -> Result<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM books WHERE $1 = ANY(genre_ids)")
            .bind(genre_id)
            .fetch_one(&self.pool)
            .await
            .context("Failed to count Books by Genre")
    }
}

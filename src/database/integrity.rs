//! Relational integrity layer
//!
//! References between collections are plain stored identities with no
//! database constraints behind them, so every destructive or
//! reference-creating operation goes through here. Deletes re-query their
//! dependents at execution time rather than trusting an earlier read; a
//! blocked delete is a no-op that hands back the blocking rows for the
//! confirmation view.

use anyhow::Result;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::{BookInstance, BookSummary};

use super::{
    AuthorService, BookInstanceService, BookService, GenreService, NewGenre,
};

/// Result of a dependency-guarded delete. `Deleted` also covers the
/// already-gone case: deleting a missing entity is idempotent and the
/// caller redirects to the list either way.
#[derive(Debug)]
pub enum DeleteOutcome<D> {
    Deleted,
    Blocked(Vec<D>),
}

impl<D> DeleteOutcome<D> {
    pub fn is_blocked(&self) -> bool {
        matches!(self, DeleteOutcome::Blocked(_))
    }
}

/// Result of the duplicate-checked genre create.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenreCreated {
    Inserted(Uuid),
    Existing(Uuid),
}

impl GenreCreated {
    /// Identity to redirect to; for a duplicate that is the existing
    /// record, never a second copy.
    pub fn genre_id(&self) -> Uuid {
        match self {
            GenreCreated::Inserted(id) | GenreCreated::Existing(id) => *id,
        }
    }
}

#[derive(Clone, Debug)]
pub struct RelationalIntegrity {
    authors: AuthorService,
    genres: GenreService,
    books: BookService,
    instances: BookInstanceService,
}

impl RelationalIntegrity {
    pub fn new(pool: PgPool) -> Self {
        Self {
            authors: AuthorService::new(pool.clone()),
            genres: GenreService::new(pool.clone()),
            books: BookService::new(pool.clone()),
            instances: BookInstanceService::new(pool),
        }
    }

    /// True iff zero Books reference this Author.
    pub async fn can_delete_author(&self, author_id: Uuid) -> Result<bool> {
        Ok(self.books.count_books_by_author(author_id).await? == 0)
    }

    /// True iff zero Books reference this Genre.
    pub async fn can_delete_genre(&self, genre_id: Uuid) -> Result<bool> {
        Ok(self.books.count_books_by_genre(genre_id).await? == 0)
    }

    /// True iff zero BookInstances reference this Book.
    pub async fn can_delete_book(&self, book_id: Uuid) -> Result<bool> {
        Ok(self.instances.count_instances_by_book(book_id).await? == 0)
    }

    pub async fn author_exists(&self, author_id: Uuid) -> Result<bool> {
        Ok(self.authors.get_author(author_id).await?.is_some())
    }

    pub async fn book_exists(&self, book_id: Uuid) -> Result<bool> {
        Ok(self.books.get_book(book_id).await?.is_some())
    }

    /// Delete an Author unless Books still reference it. The dependent
    /// query runs here, at execution time, so a stale confirmation page can
    /// not slip a delete past a Book created in between.
    pub async fn delete_author_checked(
        &self,
        author_id: Uuid,
    ) -> Result<DeleteOutcome<BookSummary>> {
        let dependents = self.books.list_books_by_author(author_id).await?;
        if !dependents.is_empty() {
            info!(
                "Delete of Author {} blocked by {} dependent Book(s)",
                author_id,
                dependents.len()
            );
            return Ok(DeleteOutcome::Blocked(dependents));
        }
        self.authors.delete_author(author_id).await?;
        Ok(DeleteOutcome::Deleted)
    }

    /// Delete a Genre unless Books still carry it in their reference sets.
    pub async fn delete_genre_checked(&self, genre_id: Uuid) -> Result<DeleteOutcome<BookSummary>> {
        let dependents = self.books.list_books_by_genre(genre_id).await?;
        if !dependents.is_empty() {
            info!(
                "Delete of Genre {} blocked by {} dependent Book(s)",
                genre_id,
                dependents.len()
            );
            return Ok(DeleteOutcome::Blocked(dependents));
        }
        self.genres.delete_genre(genre_id).await?;
        Ok(DeleteOutcome::Deleted)
    }

    /// Delete a Book unless BookInstances still reference it.
    pub async fn delete_book_checked(&self, book_id: Uuid) -> Result<DeleteOutcome<BookInstance>> {
        let dependents = self.instances.list_instances_by_book(book_id).await?;
        if !dependents.is_empty() {
            info!(
                "Delete of Book {} blocked by {} dependent BookInstance(s)",
                book_id,
                dependents.len()
            );
            return Ok(DeleteOutcome::Blocked(dependents));
        }
        self.books.delete_book(book_id).await?;
        Ok(DeleteOutcome::Deleted)
    }

    /// Create a Genre unless one with the same name (case-insensitively)
    /// already exists; a duplicate resolves to the existing identity so the
    /// caller redirects instead of inserting a second record.
    pub async fn create_genre_deduplicated(&self, fields: &NewGenre) -> Result<GenreCreated> {
        if let Some(existing) = self.genres.find_genre_by_name(&fields.name).await? {
            info!(
                "Genre '{}' already exists as {}; skipping insert",
                fields.name, existing.genre_id
            );
            return Ok(GenreCreated::Existing(existing.genre_id));
        }
        let genre_id = self.genres.create_genre(fields).await?;
        Ok(GenreCreated::Inserted(genre_id))
    }
}

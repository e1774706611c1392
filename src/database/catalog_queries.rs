//! Query/view assembly
//!
//! Composite reads backing the detail and summary pages. Independent reads
//! inside one composite are issued concurrently and joined fail-fast: if
//! any leg fails the whole composite fails, never a partial payload.

use anyhow::Result;
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Author, Book, BookInstance, BookSummary, BookTitle, Genre};

use super::{AuthorService, BookInstanceService, BookService, GenreService};

/// An Author plus every Book referencing it (title + summary projection,
/// title ascending).
#[derive(Debug, Serialize)]
pub struct AuthorAndBooks {
    pub author: Author,
    pub books: Vec<BookSummary>,
}

/// A Genre plus every Book whose reference set contains it.
#[derive(Debug, Serialize)]
pub struct GenreAndBooks {
    pub genre: Genre,
    pub books: Vec<BookSummary>,
}

/// A Book with both reference fields resolved inline plus its instances.
/// The author leg is optional: resolution is display-only and a dangling
/// reference must not sink the page.
#[derive(Debug, Serialize)]
pub struct BookDetail {
    pub book: Book,
    pub author: Option<Author>,
    pub genres: Vec<Genre>,
    pub instances: Vec<BookInstance>,
}

/// A BookInstance with its book reference resolved inline.
#[derive(Debug, Serialize)]
pub struct InstanceAndBook {
    pub instance: BookInstance,
    pub book: Option<Book>,
}

/// Five independent collection counts for the home page.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CatalogSummary {
    pub book_count: i64,
    pub book_instance_count: i64,
    pub book_instance_available_count: i64,
    pub author_count: i64,
    pub genre_count: i64,
}

/// Reference choices the Book create/update form offers.
#[derive(Debug, Serialize)]
pub struct BookFormChoices {
    pub authors: Vec<Author>,
    pub genres: Vec<Genre>,
}

#[derive(Clone, Debug)]
pub struct CatalogQueries {
    authors: AuthorService,
    genres: GenreService,
    books: BookService,
    instances: BookInstanceService,
}

impl CatalogQueries {
    pub fn new(pool: PgPool) -> Self {
        Self {
            authors: AuthorService::new(pool.clone()),
            genres: GenreService::new(pool.clone()),
            books: BookService::new(pool.clone()),
            instances: BookInstanceService::new(pool),
        }
    }

    pub async fn author_with_books(&self, author_id: Uuid) -> Result<Option<AuthorAndBooks>> {
        let (author, books) = tokio::try_join!(
            self.authors.get_author(author_id),
            self.books.list_books_by_author(author_id),
        )?;
        Ok(author.map(|author| AuthorAndBooks { author, books }))
    }

    pub async fn genre_with_books(&self, genre_id: Uuid) -> Result<Option<GenreAndBooks>> {
        let (genre, books) = tokio::try_join!(
            self.genres.get_genre(genre_id),
            self.books.list_books_by_genre(genre_id),
        )?;
        Ok(genre.map(|genre| GenreAndBooks { genre, books }))
    }

    pub async fn book_detail(&self, book_id: Uuid) -> Result<Option<BookDetail>> {
        let (book, instances) = tokio::try_join!(
            self.books.get_book(book_id),
            self.instances.list_instances_by_book(book_id),
        )?;
        let Some(book) = book else {
            return Ok(None);
        };
        let (author, genres) = tokio::try_join!(
            self.authors.get_author(book.author_id),
            self.genres.get_genres_by_ids(&book.genre_ids),
        )?;
        Ok(Some(BookDetail {
            book,
            author,
            genres,
            instances,
        }))
    }

    pub async fn instance_with_book(&self, instance_id: Uuid) -> Result<Option<InstanceAndBook>> {
        let Some(instance) = self.instances.get_instance(instance_id).await? else {
            return Ok(None);
        };
        let book = self.books.get_book(instance.book_id).await?;
        Ok(Some(InstanceAndBook { instance, book }))
    }

    /// The five counts are read-only and mutually independent, so they run
    /// concurrently against a single point-in-time view of the catalog.
    pub async fn catalog_summary(&self) -> Result<CatalogSummary> {
        let (book_count, book_instance_count, book_instance_available_count, author_count, genre_count) =
            tokio::try_join!(
                self.books.count_books(),
                self.instances.count_instances(),
                self.instances.count_available_instances(),
                self.authors.count_authors(),
                self.genres.count_genres(),
            )?;
        Ok(CatalogSummary {
            book_count,
            book_instance_count,
            book_instance_available_count,
            author_count,
            genre_count,
        })
    }

    pub async fn book_form_choices(&self) -> Result<BookFormChoices> {
        let (authors, genres) =
            tokio::try_join!(self.authors.list_authors(), self.genres.list_genres())?;
        Ok(BookFormChoices { authors, genres })
    }

    pub async fn instance_form_choices(&self) -> Result<Vec<BookTitle>> {
        self.books.list_book_titles().await
    }
}

//! Shared application state

use librarium::database::{
    AuthorService, BookInstanceService, BookService, CatalogQueries, GenreService,
    RelationalIntegrity,
};
use sqlx::PgPool;

/// Shared resources for every catalog handler.
#[derive(Clone)]
pub struct AppState {
    pub authors: AuthorService,
    pub genres: GenreService,
    pub books: BookService,
    pub instances: BookInstanceService,
    pub queries: CatalogQueries,
    pub integrity: RelationalIntegrity,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        Self {
            authors: AuthorService::new(pool.clone()),
            genres: GenreService::new(pool.clone()),
            books: BookService::new(pool.clone()),
            instances: BookInstanceService::new(pool.clone()),
            queries: CatalogQueries::new(pool.clone()),
            integrity: RelationalIntegrity::new(pool),
        }
    }
}

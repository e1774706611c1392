//! Route table
//!
//! The full catalog surface under `/catalog` plus the summary home page.
//! Static segments (`create`) are registered alongside the `:id` routes;
//! the router prefers the literal match.

use axum::routing::get;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub mod author;
pub mod book;
pub mod book_instance;
pub mod genre;
pub mod home;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home::index))
        .nest("/catalog", catalog_router())
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

fn catalog_router() -> Router<AppState> {
    Router::new()
        .route("/", get(home::catalog_redirect))
        // Author routes
        .route("/authors", get(author::list))
        .route("/author/create", get(author::create_form).post(author::create))
        .route("/author/:id", get(author::detail))
        .route("/author/:id/delete", get(author::delete_form).post(author::delete))
        .route("/author/:id/update", get(author::update_form).post(author::update))
        // Genre routes
        .route("/genres", get(genre::list))
        .route("/genre/create", get(genre::create_form).post(genre::create))
        .route("/genre/:id", get(genre::detail))
        .route("/genre/:id/delete", get(genre::delete_form).post(genre::delete))
        .route("/genre/:id/update", get(genre::update_form).post(genre::update))
        // Book routes
        .route("/books", get(book::list))
        .route("/book/create", get(book::create_form).post(book::create))
        .route("/book/:id", get(book::detail))
        .route("/book/:id/delete", get(book::delete_form).post(book::delete))
        .route("/book/:id/update", get(book::update_form).post(book::update))
        // BookInstance routes
        .route("/bookinstances", get(book_instance::list))
        .route(
            "/bookinstance/create",
            get(book_instance::create_form).post(book_instance::create),
        )
        .route("/bookinstance/:id", get(book_instance::detail))
        .route(
            "/bookinstance/:id/delete",
            get(book_instance::delete_form).post(book_instance::delete),
        )
        .route(
            "/bookinstance/:id/update",
            get(book_instance::update_form).post(book_instance::update),
        )
}

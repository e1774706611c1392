//! Book handlers
//!
//! Writes verify the author reference against the store and filter the
//! genre set to known records before anything is persisted.

use std::collections::HashSet;

use axum::extract::{RawForm, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use uuid::Uuid;

use librarium::database::{BookFormChoices, DeleteOutcome, NewBook};
use librarium::validation::{validate_book, BookEcho, FieldError};

use crate::error::WebError;
use crate::extract::CatalogId;
use crate::forms::{book_submission, FormFields};
use crate::pages;
use crate::state::AppState;

pub async fn list(State(state): State<AppState>) -> Result<Html<String>, WebError> {
    let books = state.books.list_books_with_authors().await?;
    Ok(Html(pages::book_list_page(&books)))
}

pub async fn detail(
    State(state): State<AppState>,
    CatalogId(id): CatalogId,
) -> Result<Html<String>, WebError> {
    let detail = state
        .queries
        .book_detail(id)
        .await?
        .ok_or(WebError::NotFound("Book"))?;
    Ok(Html(pages::book_detail_page(&detail)))
}

pub async fn create_form(State(state): State<AppState>) -> Result<Html<String>, WebError> {
    let choices = state.queries.book_form_choices().await?;
    Ok(Html(pages::book_form_page("Create Book", &choices, None, &[])))
}

/// Shared reference checks on the create/update POST paths: drop unknown
/// genre ids, and report a field error when the author reference does not
/// resolve.
async fn check_references(
    state: &AppState,
    choices: &BookFormChoices,
    fields: &mut NewBook,
) -> Result<Option<Vec<FieldError>>, WebError> {
    let known: HashSet<Uuid> = choices.genres.iter().map(|g| g.genre_id).collect();
    fields.genre_ids.retain(|id| known.contains(id));
    if !state.integrity.author_exists(fields.author_id).await? {
        return Ok(Some(vec![FieldError::new("author", "Author does not exist.")]));
    }
    Ok(None)
}

pub async fn create(
    State(state): State<AppState>,
    RawForm(body): RawForm,
) -> Result<Response, WebError> {
    let submission = book_submission(&FormFields::parse(&body));
    let choices = state.queries.book_form_choices().await?;
    match validate_book(&submission) {
        Ok(mut fields) => {
            if let Some(errors) = check_references(&state, &choices, &mut fields).await? {
                let echo = BookEcho::from(&fields);
                return Ok(Html(pages::book_form_page(
                    "Create Book",
                    &choices,
                    Some(&echo),
                    &errors,
                ))
                .into_response());
            }
            let book_id = state.books.create_book(&fields).await?;
            Ok(Redirect::to(&format!("/catalog/book/{book_id}")).into_response())
        }
        Err(invalid) => Ok(Html(pages::book_form_page(
            "Create Book",
            &choices,
            Some(&invalid.echo),
            &invalid.errors,
        ))
        .into_response()),
    }
}

pub async fn delete_form(
    State(state): State<AppState>,
    CatalogId(id): CatalogId,
) -> Result<Response, WebError> {
    let (book, instances) = tokio::try_join!(
        state.books.get_book(id),
        state.instances.list_instances_by_book(id),
    )?;
    match book {
        Some(book) => Ok(Html(pages::book_delete_page(&book, &instances)).into_response()),
        None => Ok(Redirect::to("/catalog/books").into_response()),
    }
}

pub async fn delete(
    State(state): State<AppState>,
    CatalogId(id): CatalogId,
) -> Result<Response, WebError> {
    match state.integrity.delete_book_checked(id).await? {
        DeleteOutcome::Deleted => Ok(Redirect::to("/catalog/books").into_response()),
        DeleteOutcome::Blocked(instances) => match state.books.get_book(id).await? {
            Some(book) => Ok(Html(pages::book_delete_page(&book, &instances)).into_response()),
            None => Ok(Redirect::to("/catalog/books").into_response()),
        },
    }
}

pub async fn update_form(
    State(state): State<AppState>,
    CatalogId(id): CatalogId,
) -> Result<Html<String>, WebError> {
    let (book, choices) = tokio::try_join!(
        state.books.get_book(id),
        state.queries.book_form_choices(),
    )?;
    let book = book.ok_or(WebError::NotFound("Book"))?;
    let echo = BookEcho::from(&book);
    Ok(Html(pages::book_form_page(
        "Update Book",
        &choices,
        Some(&echo),
        &[],
    )))
}

pub async fn update(
    State(state): State<AppState>,
    CatalogId(id): CatalogId,
    RawForm(body): RawForm,
) -> Result<Response, WebError> {
    let submission = book_submission(&FormFields::parse(&body));
    let choices = state.queries.book_form_choices().await?;
    match validate_book(&submission) {
        Ok(mut fields) => {
            if let Some(errors) = check_references(&state, &choices, &mut fields).await? {
                let echo = BookEcho::from(&fields);
                return Ok(Html(pages::book_form_page(
                    "Update Book",
                    &choices,
                    Some(&echo),
                    &errors,
                ))
                .into_response());
            }
            if !state.books.update_book(id, &fields).await? {
                return Err(WebError::NotFound("Book"));
            }
            Ok(Redirect::to(&format!("/catalog/book/{id}")).into_response())
        }
        Err(invalid) => Ok(Html(pages::book_form_page(
            "Update Book",
            &choices,
            Some(&invalid.echo),
            &invalid.errors,
        ))
        .into_response()),
    }
}

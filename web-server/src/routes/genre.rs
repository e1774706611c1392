//! Genre handlers
//!
//! Create runs the case-insensitive duplicate check and redirects to the
//! existing record on a hit. Both delete steps key the identity off the
//! path parameter.

use axum::extract::{RawForm, State};
use axum::response::{Html, IntoResponse, Redirect, Response};

use librarium::database::DeleteOutcome;
use librarium::validation::{validate_genre, GenreRule, GenreSubmission};

use crate::error::WebError;
use crate::extract::CatalogId;
use crate::forms::{genre_submission, FormFields};
use crate::pages;
use crate::state::AppState;

pub async fn list(State(state): State<AppState>) -> Result<Html<String>, WebError> {
    let genres = state.genres.list_genres().await?;
    Ok(Html(pages::genre_list_page(&genres)))
}

pub async fn detail(
    State(state): State<AppState>,
    CatalogId(id): CatalogId,
) -> Result<Html<String>, WebError> {
    let view = state
        .queries
        .genre_with_books(id)
        .await?
        .ok_or(WebError::NotFound("Genre"))?;
    Ok(Html(pages::genre_detail_page(&view.genre, &view.books)))
}

pub async fn create_form() -> Html<String> {
    Html(pages::genre_form_page("Create Genre", None, &[]))
}

pub async fn create(
    State(state): State<AppState>,
    RawForm(body): RawForm,
) -> Result<Response, WebError> {
    let submission = genre_submission(&FormFields::parse(&body));
    match validate_genre(&submission, GenreRule::Create) {
        Ok(fields) => {
            let created = state.integrity.create_genre_deduplicated(&fields).await?;
            Ok(Redirect::to(&format!("/catalog/genre/{}", created.genre_id())).into_response())
        }
        Err(invalid) => Ok(Html(pages::genre_form_page(
            "Create Genre",
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
    match state.queries.genre_with_books(id).await? {
        Some(view) => Ok(Html(pages::genre_delete_page(&view.genre, &view.books)).into_response()),
        None => Ok(Redirect::to("/catalog/genres").into_response()),
    }
}

pub async fn delete(
    State(state): State<AppState>,
    CatalogId(id): CatalogId,
) -> Result<Response, WebError> {
    match state.integrity.delete_genre_checked(id).await? {
        DeleteOutcome::Deleted => Ok(Redirect::to("/catalog/genres").into_response()),
        DeleteOutcome::Blocked(books) => match state.genres.get_genre(id).await? {
            Some(genre) => Ok(Html(pages::genre_delete_page(&genre, &books)).into_response()),
            None => Ok(Redirect::to("/catalog/genres").into_response()),
        },
    }
}

pub async fn update_form(
    State(state): State<AppState>,
    CatalogId(id): CatalogId,
) -> Result<Html<String>, WebError> {
    let genre = state
        .genres
        .get_genre(id)
        .await?
        .ok_or(WebError::NotFound("Genre"))?;
    let echo = GenreSubmission::from(&genre);
    Ok(Html(pages::genre_form_page("Update Genre", Some(&echo), &[])))
}

pub async fn update(
    State(state): State<AppState>,
    CatalogId(id): CatalogId,
    RawForm(body): RawForm,
) -> Result<Response, WebError> {
    let submission = genre_submission(&FormFields::parse(&body));
    match validate_genre(&submission, GenreRule::Update) {
        Ok(fields) => {
            if !state.genres.update_genre(id, &fields).await? {
                return Err(WebError::NotFound("Genre"));
            }
            Ok(Redirect::to(&format!("/catalog/genre/{id}")).into_response())
        }
        Err(invalid) => Ok(Html(pages::genre_form_page(
            "Update Genre",
            Some(&invalid.echo),
            &invalid.errors,
        ))
        .into_response()),
    }
}

//! Author handlers

use axum::extract::{RawForm, State};
use axum::response::{Html, IntoResponse, Redirect, Response};

use librarium::database::DeleteOutcome;
use librarium::validation::{validate_author, AuthorSubmission};

use crate::error::WebError;
use crate::extract::CatalogId;
use crate::forms::{author_submission, FormFields};
use crate::pages;
use crate::state::AppState;

pub async fn list(State(state): State<AppState>) -> Result<Html<String>, WebError> {
    let authors = state.authors.list_authors().await?;
    Ok(Html(pages::author_list_page(&authors)))
}

pub async fn detail(
    State(state): State<AppState>,
    CatalogId(id): CatalogId,
) -> Result<Html<String>, WebError> {
    let view = state
        .queries
        .author_with_books(id)
        .await?
        .ok_or(WebError::NotFound("Author"))?;
    Ok(Html(pages::author_detail_page(&view.author, &view.books)))
}

pub async fn create_form() -> Html<String> {
    Html(pages::author_form_page("Create Author", None, &[]))
}

pub async fn create(
    State(state): State<AppState>,
    RawForm(body): RawForm,
) -> Result<Response, WebError> {
    let submission = author_submission(&FormFields::parse(&body));
    match validate_author(&submission) {
        Ok(fields) => {
            let author_id = state.authors.create_author(&fields).await?;
            Ok(Redirect::to(&format!("/catalog/author/{author_id}")).into_response())
        }
        Err(invalid) => Ok(Html(pages::author_form_page(
            "Create Author",
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
    match state.queries.author_with_books(id).await? {
        Some(view) => {
            Ok(Html(pages::author_delete_page(&view.author, &view.books)).into_response())
        }
        None => Ok(Redirect::to("/catalog/authors").into_response()),
    }
}

pub async fn delete(
    State(state): State<AppState>,
    CatalogId(id): CatalogId,
) -> Result<Response, WebError> {
    match state.integrity.delete_author_checked(id).await? {
        DeleteOutcome::Deleted => Ok(Redirect::to("/catalog/authors").into_response()),
        DeleteOutcome::Blocked(books) => match state.authors.get_author(id).await? {
            Some(author) => Ok(Html(pages::author_delete_page(&author, &books)).into_response()),
            None => Ok(Redirect::to("/catalog/authors").into_response()),
        },
    }
}

pub async fn update_form(
    State(state): State<AppState>,
    CatalogId(id): CatalogId,
) -> Result<Html<String>, WebError> {
    let author = state
        .authors
        .get_author(id)
        .await?
        .ok_or(WebError::NotFound("Author"))?;
    let echo = AuthorSubmission::from(&author);
    Ok(Html(pages::author_form_page(
        "Update Author",
        Some(&echo),
        &[],
    )))
}

pub async fn update(
    State(state): State<AppState>,
    CatalogId(id): CatalogId,
    RawForm(body): RawForm,
) -> Result<Response, WebError> {
    let submission = author_submission(&FormFields::parse(&body));
    match validate_author(&submission) {
        Ok(fields) => {
            if !state.authors.update_author(id, &fields).await? {
                return Err(WebError::NotFound("Author"));
            }
            Ok(Redirect::to(&format!("/catalog/author/{id}")).into_response())
        }
        Err(invalid) => Ok(Html(pages::author_form_page(
            "Update Author",
            Some(&invalid.echo),
            &invalid.errors,
        ))
        .into_response()),
    }
}

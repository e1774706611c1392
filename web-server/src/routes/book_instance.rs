//! BookInstance handlers
//!
//! Deletion is unconditional: instances are leaf entities. Writes verify
//! the book reference against the store first.

use axum::extract::{RawForm, State};
use axum::response::{Html, IntoResponse, Redirect, Response};

use librarium::validation::{validate_instance, FieldError, InstanceEcho};

use crate::error::WebError;
use crate::extract::CatalogId;
use crate::forms::{instance_submission, FormFields};
use crate::pages;
use crate::state::AppState;

pub async fn list(State(state): State<AppState>) -> Result<Html<String>, WebError> {
    let instances = state.instances.list_instances_with_books().await?;
    Ok(Html(pages::instance_list_page(&instances)))
}

pub async fn detail(
    State(state): State<AppState>,
    CatalogId(id): CatalogId,
) -> Result<Html<String>, WebError> {
    let view = state
        .queries
        .instance_with_book(id)
        .await?
        .ok_or(WebError::NotFound("Book Instance"))?;
    Ok(Html(pages::instance_detail_page(&view)))
}

pub async fn create_form(State(state): State<AppState>) -> Result<Html<String>, WebError> {
    let books = state.queries.instance_form_choices().await?;
    Ok(Html(pages::instance_form_page(
        "Create BookInstance",
        &books,
        None,
        &[],
    )))
}

pub async fn create(
    State(state): State<AppState>,
    RawForm(body): RawForm,
) -> Result<Response, WebError> {
    let submission = instance_submission(&FormFields::parse(&body));
    match validate_instance(&submission) {
        Ok(fields) => {
            if !state.integrity.book_exists(fields.book_id).await? {
                let books = state.queries.instance_form_choices().await?;
                let echo = InstanceEcho::from(&fields);
                let errors = vec![FieldError::new("book", "Book does not exist.")];
                return Ok(Html(pages::instance_form_page(
                    "Create BookInstance",
                    &books,
                    Some(&echo),
                    &errors,
                ))
                .into_response());
            }
            let instance_id = state.instances.create_instance(&fields).await?;
            Ok(Redirect::to(&format!("/catalog/bookinstance/{instance_id}")).into_response())
        }
        Err(invalid) => {
            let books = state.queries.instance_form_choices().await?;
            Ok(Html(pages::instance_form_page(
                "Create BookInstance",
                &books,
                Some(&invalid.echo),
                &invalid.errors,
            ))
            .into_response())
        }
    }
}

pub async fn delete_form(
    State(state): State<AppState>,
    CatalogId(id): CatalogId,
) -> Result<Response, WebError> {
    match state.queries.instance_with_book(id).await? {
        Some(view) => Ok(Html(pages::instance_delete_page(&view)).into_response()),
        None => Ok(Redirect::to("/catalog/bookinstances").into_response()),
    }
}

pub async fn delete(
    State(state): State<AppState>,
    CatalogId(id): CatalogId,
) -> Result<Redirect, WebError> {
    state.instances.delete_instance(id).await?;
    Ok(Redirect::to("/catalog/bookinstances"))
}

pub async fn update_form(
    State(state): State<AppState>,
    CatalogId(id): CatalogId,
) -> Result<Html<String>, WebError> {
    let (instance, books) = tokio::try_join!(
        state.instances.get_instance(id),
        state.queries.instance_form_choices(),
    )?;
    let instance = instance.ok_or(WebError::NotFound("Book Instance"))?;
    let echo = InstanceEcho::from(&instance);
    Ok(Html(pages::instance_form_page(
        "Update BookInstance",
        &books,
        Some(&echo),
        &[],
    )))
}

pub async fn update(
    State(state): State<AppState>,
    CatalogId(id): CatalogId,
    RawForm(body): RawForm,
) -> Result<Response, WebError> {
    let submission = instance_submission(&FormFields::parse(&body));
    match validate_instance(&submission) {
        Ok(fields) => {
            if !state.integrity.book_exists(fields.book_id).await? {
                let books = state.queries.instance_form_choices().await?;
                let echo = InstanceEcho::from(&fields);
                let errors = vec![FieldError::new("book", "Book does not exist.")];
                return Ok(Html(pages::instance_form_page(
                    "Update BookInstance",
                    &books,
                    Some(&echo),
                    &errors,
                ))
                .into_response());
            }
            if !state.instances.update_instance(id, &fields).await? {
                return Err(WebError::NotFound("Book Instance"));
            }
            Ok(Redirect::to(&format!("/catalog/bookinstance/{id}")).into_response())
        }
        Err(invalid) => {
            let books = state.queries.instance_form_choices().await?;
            Ok(Html(pages::instance_form_page(
                "Update BookInstance",
                &books,
                Some(&invalid.echo),
                &invalid.errors,
            ))
            .into_response())
        }
    }
}

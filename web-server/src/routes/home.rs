//! Home page - catalog summary

use axum::extract::State;
use axum::response::{Html, Redirect};

use crate::error::WebError;
use crate::pages;
use crate::state::AppState;

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, WebError> {
    let summary = state.queries.catalog_summary().await?;
    Ok(Html(pages::index_page(&summary)))
}

pub async fn catalog_redirect() -> Redirect {
    Redirect::to("/")
}

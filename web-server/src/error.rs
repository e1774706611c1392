//! HTTP-facing error taxonomy
//!
//! Only two shapes reach this enum: a missing/malformed identity (404) and
//! an unexpected store failure (500). Validation failures and blocked
//! deletes never become errors - they are 200 re-renders handled inside
//! the handlers.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use once_cell::sync::OnceCell;
use thiserror::Error;
use tracing::error;

use crate::pages;

static DEV_MODE: OnceCell<bool> = OnceCell::new();

/// Whether failure detail may be rendered to the client. Driven by
/// `APP_ENV`; anything other than `production` counts as development.
pub fn dev_mode() -> bool {
    *DEV_MODE.get_or_init(|| {
        std::env::var("APP_ENV")
            .map(|env| env != "production")
            .unwrap_or(true)
    })
}

#[derive(Debug, Error)]
pub enum WebError {
    /// Identity well-formed but nothing matched. Carries the entity kind
    /// for the "Author not found." style message.
    #[error("{0} not found.")]
    NotFound(&'static str),

    /// Identity malformed. Same 404 surface as NotFound - a parse failure
    /// must never leak as a lower-level error.
    #[error("Invalid identifier: {0}")]
    InvalidId(String),

    /// Unexpected store or internal failure.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        match self {
            WebError::NotFound(_) | WebError::InvalidId(_) => {
                let body = pages::not_found_page(&message);
                (StatusCode::NOT_FOUND, Html(body)).into_response()
            }
            WebError::Internal(err) => {
                error!("unhandled failure while serving request: {err:#}");
                let detail = dev_mode().then(|| format!("{err:#}"));
                let body = pages::error_page(detail.as_deref());
                (StatusCode::INTERNAL_SERVER_ERROR, Html(body)).into_response()
            }
        }
    }
}

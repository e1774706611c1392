//! Identity-format guard
//!
//! Every identity-bearing route extracts its `:id` segment through
//! `CatalogId`, so a malformed identity short-circuits to the 404 page
//! before any handler logic runs.

use axum::async_trait;
use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use uuid::Uuid;

use crate::error::WebError;

/// A validated `:id` path segment.
#[derive(Debug, Clone, Copy)]
pub struct CatalogId(pub Uuid);

/// Parse a raw path segment as a catalog identity. Malformed input maps to
/// the uniform 404, never a parse error.
pub fn parse_catalog_id(raw: &str) -> Result<Uuid, WebError> {
    Uuid::parse_str(raw).map_err(|_| WebError::InvalidId(raw.to_string()))
}

#[async_trait]
impl<S> FromRequestParts<S> for CatalogId
where
    S: Send + Sync,
{
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| WebError::InvalidId(String::new()))?;
        parse_catalog_id(&raw).map(CatalogId)
    }
}

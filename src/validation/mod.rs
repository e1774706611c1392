//! Input validation and sanitization
//!
//! Field-level rules applied before any entity construction. Every string
//! is trimmed and HTML-escaped here, once, on the way in; the store never
//! sees raw submission text. A failed validation never touches the store -
//! the caller gets the sanitized values back together with the per-field
//! messages so the form can re-render pre-filled and annotated.

use chrono::NaiveDate;
use thiserror::Error;

pub mod forms;

pub use forms::{
    validate_author, validate_book, validate_genre, validate_instance, AuthorSubmission, BookEcho,
    BookSubmission, GenreRule, GenreSelection, GenreSubmission, InstanceEcho, InstanceSubmission,
    Invalid,
};

/// One failed field rule. `field` matches the form input name so the view
/// can annotate the right control.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Trim and HTML-escape one submitted value.
pub fn sanitize_text(input: &str) -> String {
    escape_html(input.trim())
}

/// Replace the five HTML-significant characters with entities. Stored
/// values are rendered into markup verbatim, so escaping happens before
/// persistence, not at render time.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            other => out.push(other),
        }
    }
    out
}

/// Parse an optional ISO-8601 date field. Empty input is "absent", not an
/// error; anything non-empty must parse.
pub fn parse_optional_date(raw: &str) -> Result<Option<NaiveDate>, chrono::ParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map(Some)
}

/// Letters-only check for author name parts. Digits and punctuation fail;
/// the error message callers attach keeps the classic "non-alphanumeric"
/// wording.
pub fn is_clean_name(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_alphabetic())
}

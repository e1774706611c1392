//! Entity models for the catalog
//!
//! Row structs for the four collections plus their derived properties.
//! Display name, lifespan and canonical URL are computed on read, never
//! stored, so they can not drift from the underlying fields.

use chrono::NaiveDate;

pub mod author;
pub mod book;
pub mod book_instance;
pub mod genre;

pub use author::Author;
pub use book::{Book, BookSummary, BookTitle, BookWithAuthor};
pub use book_instance::{BookInstance, InstanceStatus, InstanceWithBook, UnknownStatus};
pub use genre::Genre;

/// Medium date rendering used on detail pages, e.g. `Oct 14, 1983`.
pub(crate) fn format_medium_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// `YYYY-MM-DD` rendering used to pre-fill date inputs on update forms.
pub(crate) fn format_ymd(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

//! Book model and list/detail projections
//!
//! A Book owns its genre reference set as a stored array of identities;
//! the author is a single stored identity. Neither is a database-level
//! constraint - resolution and integrity are application concerns.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Book {
    pub book_id: Uuid,
    pub title: String,
    pub author_id: Uuid,
    pub summary: String,
    pub isbn: String,
    pub genre_ids: Vec<Uuid>,
}

impl Book {
    pub fn url(&self) -> String {
        format!("/catalog/book/{}", self.book_id)
    }
}

/// Title + summary projection used by author/genre detail pages, which do
/// not need the full document.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BookSummary {
    pub book_id: Uuid,
    pub title: String,
    pub summary: String,
}

impl BookSummary {
    pub fn url(&self) -> String {
        format!("/catalog/book/{}", self.book_id)
    }
}

/// Title-only projection for instance forms.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BookTitle {
    pub book_id: Uuid,
    pub title: String,
}

impl BookTitle {
    pub fn url(&self) -> String {
        format!("/catalog/book/{}", self.book_id)
    }
}

/// Book list row with the author reference resolved inline. The author
/// columns are optional so a dangling reference degrades to a blank name
/// instead of dropping the row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BookWithAuthor {
    pub book_id: Uuid,
    pub title: String,
    pub first_name: Option<String>,
    pub family_name: Option<String>,
}

impl BookWithAuthor {
    pub fn url(&self) -> String {
        format!("/catalog/book/{}", self.book_id)
    }

    pub fn author_name(&self) -> String {
        match (self.family_name.as_deref(), self.first_name.as_deref()) {
            (Some(family), Some(first)) if !family.is_empty() && !first.is_empty() => {
                format!("{family}, {first}")
            }
            _ => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn author_name_resolves_when_both_parts_present() {
        let row = BookWithAuthor {
            book_id: Uuid::new_v4(),
            title: "The Name of the Wind".to_string(),
            first_name: Some("Patrick".to_string()),
            family_name: Some("Rothfuss".to_string()),
        };
        assert_eq!(row.author_name(), "Rothfuss, Patrick");
    }

    #[test]
    fn author_name_is_blank_for_dangling_reference() {
        let row = BookWithAuthor {
            book_id: Uuid::new_v4(),
            title: "Orphaned".to_string(),
            first_name: None,
            family_name: None,
        };
        assert_eq!(row.author_name(), "");
    }
}

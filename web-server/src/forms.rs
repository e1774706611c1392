//! Form body decoding
//!
//! The book form posts one `genre` pair per checked box, which
//! serde-based form extraction cannot represent, so bodies are decoded
//! into a flat pair list and picked apart by field name here.

use axum::body::Bytes;
use librarium::validation::{
    AuthorSubmission, BookSubmission, GenreSelection, GenreSubmission, InstanceSubmission,
};

/// Decoded `application/x-www-form-urlencoded` pairs.
#[derive(Debug, Default)]
pub struct FormFields(Vec<(String, String)>);

impl FormFields {
    pub fn parse(body: &Bytes) -> Self {
        let pairs = url::form_urlencoded::parse(body)
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        Self(pairs)
    }

    /// First value for the field, empty string when absent.
    pub fn value(&self, field: &str) -> &str {
        self.0
            .iter()
            .find(|(k, _)| k == field)
            .map(|(_, v)| v.as_str())
            .unwrap_or("")
    }

    /// Every value submitted under the field, in submission order.
    pub fn values(&self, field: &str) -> Vec<String> {
        self.0
            .iter()
            .filter(|(k, _)| k == field)
            .map(|(_, v)| v.clone())
            .collect()
    }
}

pub fn author_submission(fields: &FormFields) -> AuthorSubmission {
    AuthorSubmission {
        first_name: fields.value("first_name").to_string(),
        family_name: fields.value("family_name").to_string(),
        date_of_birth: fields.value("date_of_birth").to_string(),
        date_of_death: fields.value("date_of_death").to_string(),
    }
}

pub fn genre_submission(fields: &FormFields) -> GenreSubmission {
    GenreSubmission {
        name: fields.value("name").to_string(),
    }
}

pub fn book_submission(fields: &FormFields) -> BookSubmission {
    BookSubmission {
        title: fields.value("title").to_string(),
        author: fields.value("author").to_string(),
        summary: fields.value("summary").to_string(),
        isbn: fields.value("isbn").to_string(),
        genre: GenreSelection::from_values(fields.values("genre")),
    }
}

pub fn instance_submission(fields: &FormFields) -> InstanceSubmission {
    InstanceSubmission {
        book: fields.value("book").to_string(),
        imprint: fields.value("imprint").to_string(),
        status: fields.value("status").to_string(),
        due_back: fields.value("due_back").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_percent_encoding_and_plus() {
        let body = Bytes::from_static(b"name=Sword+%26+Sorcery");
        let fields = FormFields::parse(&body);
        assert_eq!(fields.value("name"), "Sword & Sorcery");
    }

    #[test]
    fn missing_field_is_empty() {
        let fields = FormFields::parse(&Bytes::from_static(b"title=Dune"));
        assert_eq!(fields.value("summary"), "");
        assert!(fields.values("genre").is_empty());
    }

    #[test]
    fn repeated_keys_collect_in_order() {
        let body = Bytes::from_static(b"genre=a&title=Dune&genre=b");
        let fields = FormFields::parse(&body);
        assert_eq!(fields.values("genre"), vec!["a", "b"]);
    }

    #[test]
    fn single_genre_scalar_becomes_one() {
        let body = Bytes::from_static(b"genre=abc");
        let sub = book_submission(&FormFields::parse(&body));
        assert_eq!(sub.genre, GenreSelection::One("abc".to_string()));
    }

    #[test]
    fn no_genre_becomes_empty() {
        let sub = book_submission(&FormFields::parse(&Bytes::from_static(b"title=Dune")));
        assert_eq!(sub.genre, GenreSelection::Empty);
    }
}

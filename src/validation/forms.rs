//! Per-entity form validation
//!
//! Raw submissions come in as strings straight from the request body and
//! leave as the typed field sets the store accepts. On failure the caller
//! receives `Invalid { echo, errors }`: the sanitized values to pre-fill
//! the re-rendered form plus one message per failed field.

use uuid::Uuid;

use crate::database::{NewAuthor, NewBook, NewGenre, NewInstance};
use crate::models::{Author, Book, BookInstance, Genre, InstanceStatus};

use super::{is_clean_name, parse_optional_date, sanitize_text, FieldError};

/// A rejected submission: sanitized echo values plus per-field messages.
#[derive(Debug, Clone)]
pub struct Invalid<F> {
    pub echo: F,
    pub errors: Vec<FieldError>,
}

// ---------------------------------------------------------------------------
// Author

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorSubmission {
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: String,
    pub date_of_death: String,
}

impl From<&Author> for AuthorSubmission {
    fn from(author: &Author) -> Self {
        Self {
            first_name: author.first_name.clone(),
            family_name: author.family_name.clone(),
            date_of_birth: author.date_of_birth_ymd(),
            date_of_death: author.date_of_death_ymd(),
        }
    }
}

/// Author rules: both name parts required and letters-only; both dates
/// optional ISO-8601. Same rules on create and update.
pub fn validate_author(sub: &AuthorSubmission) -> Result<NewAuthor, Invalid<AuthorSubmission>> {
    let first_name = sanitize_text(&sub.first_name);
    let family_name = sanitize_text(&sub.family_name);
    let birth_raw = sanitize_text(&sub.date_of_birth);
    let death_raw = sanitize_text(&sub.date_of_death);

    let mut errors = Vec::new();

    if first_name.is_empty() {
        errors.push(FieldError::new("first_name", "First name must be specified."));
    } else if !is_clean_name(&first_name) {
        errors.push(FieldError::new(
            "first_name",
            "First name has non-alphanumeric characters.",
        ));
    }
    if family_name.is_empty() {
        errors.push(FieldError::new("family_name", "Family name must be specified."));
    } else if !is_clean_name(&family_name) {
        errors.push(FieldError::new(
            "family_name",
            "Family name has non-alphanumeric characters.",
        ));
    }

    let date_of_birth = match parse_optional_date(&sub.date_of_birth) {
        Ok(date) => date,
        Err(_) => {
            errors.push(FieldError::new("date_of_birth", "Invalid date of birth"));
            None
        }
    };
    let date_of_death = match parse_optional_date(&sub.date_of_death) {
        Ok(date) => date,
        Err(_) => {
            errors.push(FieldError::new("date_of_death", "Invalid date of death"));
            None
        }
    };

    if errors.is_empty() {
        Ok(NewAuthor {
            first_name,
            family_name,
            date_of_birth,
            date_of_death,
        })
    } else {
        Err(Invalid {
            echo: AuthorSubmission {
                first_name,
                family_name,
                date_of_birth: birth_raw,
                date_of_death: death_raw,
            },
            errors,
        })
    }
}

// ---------------------------------------------------------------------------
// Genre

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenreSubmission {
    pub name: String,
}

impl From<&Genre> for GenreSubmission {
    fn from(genre: &Genre) -> Self {
        Self {
            name: genre.name.clone(),
        }
    }
}

/// Genre name length rule differs between create and update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenreRule {
    Create,
    Update,
}

impl GenreRule {
    fn min_len(self) -> usize {
        match self {
            GenreRule::Create => 3,
            GenreRule::Update => 1,
        }
    }

    fn message(self) -> &'static str {
        match self {
            GenreRule::Create => "Genre name must contain at least 3 characters",
            GenreRule::Update => "Invalid genre",
        }
    }
}

pub fn validate_genre(
    sub: &GenreSubmission,
    rule: GenreRule,
) -> Result<NewGenre, Invalid<GenreSubmission>> {
    // Length is judged on what the user typed; escaping only inflates it.
    let trimmed = sub.name.trim();
    let name = sanitize_text(trimmed);
    if trimmed.chars().count() < rule.min_len() {
        return Err(Invalid {
            echo: GenreSubmission { name },
            errors: vec![FieldError::new("name", rule.message())],
        });
    }
    Ok(NewGenre { name })
}

// ---------------------------------------------------------------------------
// Book

/// How the genre field arrived on the wire: HTML checkboxes post one pair
/// per checked box, so the same field shows up zero, one or many times.
/// Collapsed to one canonical set before validation - a bare scalar and a
/// one-element list are indistinguishable downstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenreSelection {
    Empty,
    One(String),
    Many(Vec<String>),
}

impl Default for GenreSelection {
    fn default() -> Self {
        GenreSelection::Empty
    }
}

impl GenreSelection {
    pub fn from_values(mut values: Vec<String>) -> Self {
        match values.len() {
            0 => GenreSelection::Empty,
            1 => GenreSelection::One(values.remove(0)),
            _ => GenreSelection::Many(values),
        }
    }

    /// Canonical form: every submitted value, escaped, parsed as an
    /// identity, de-duplicated with order preserved. Values that are not
    /// identities are dropped - checkbox values are store-issued ids, so a
    /// mismatch is a tampered form, not a user mistake to echo back.
    pub fn canonical_ids(&self) -> Vec<Uuid> {
        let raw: Vec<&String> = match self {
            GenreSelection::Empty => Vec::new(),
            GenreSelection::One(value) => vec![value],
            GenreSelection::Many(values) => values.iter().collect(),
        };
        let mut ids = Vec::new();
        for value in raw {
            if let Ok(id) = Uuid::parse_str(sanitize_text(value).as_str()) {
                if !ids.contains(&id) {
                    ids.push(id);
                }
            }
        }
        ids
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookSubmission {
    pub title: String,
    pub author: String,
    pub summary: String,
    pub isbn: String,
    pub genre: GenreSelection,
}

/// Echo values for re-rendering the book form: sanitized text fields, the
/// author as submitted (so the select can re-mark it) and the parsed genre
/// set (so the checkboxes re-check).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookEcho {
    pub title: String,
    pub author: String,
    pub summary: String,
    pub isbn: String,
    pub genre_ids: Vec<Uuid>,
}

impl From<&Book> for BookEcho {
    fn from(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author_id.to_string(),
            summary: book.summary.clone(),
            isbn: book.isbn.clone(),
            genre_ids: book.genre_ids.clone(),
        }
    }
}

impl From<&NewBook> for BookEcho {
    fn from(fields: &NewBook) -> Self {
        Self {
            title: fields.title.clone(),
            author: fields.author_id.to_string(),
            summary: fields.summary.clone(),
            isbn: fields.isbn.clone(),
            genre_ids: fields.genre_ids.clone(),
        }
    }
}

/// Book rules: title, summary, isbn and author all required; the author
/// must at least be a well-formed identity (whether it resolves is checked
/// against the store by the caller). Genre set may be empty.
pub fn validate_book(sub: &BookSubmission) -> Result<NewBook, Invalid<BookEcho>> {
    let title = sanitize_text(&sub.title);
    let author = sanitize_text(&sub.author);
    let summary = sanitize_text(&sub.summary);
    let isbn = sanitize_text(&sub.isbn);
    let genre_ids = sub.genre.canonical_ids();

    let mut errors = Vec::new();

    if title.is_empty() {
        errors.push(FieldError::new("title", "Title must not be empty"));
    }
    if summary.is_empty() {
        errors.push(FieldError::new("summary", "Summary must not be empty"));
    }
    if isbn.is_empty() {
        errors.push(FieldError::new("isbn", "ISBN must not be empty"));
    }

    let author_id = if author.is_empty() {
        errors.push(FieldError::new("author", "Author must not be empty"));
        None
    } else {
        match Uuid::parse_str(&author) {
            Ok(id) => Some(id),
            Err(_) => {
                errors.push(FieldError::new("author", "Author does not exist."));
                None
            }
        }
    };

    match (errors.is_empty(), author_id) {
        (true, Some(author_id)) => Ok(NewBook {
            title,
            author_id,
            summary,
            isbn,
            genre_ids,
        }),
        _ => Err(Invalid {
            echo: BookEcho {
                title,
                author,
                summary,
                isbn,
                genre_ids,
            },
            errors,
        }),
    }
}

// ---------------------------------------------------------------------------
// BookInstance

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstanceSubmission {
    pub book: String,
    pub imprint: String,
    pub status: String,
    pub due_back: String,
}

/// Echo values for re-rendering the instance form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstanceEcho {
    pub book: String,
    pub imprint: String,
    pub status: String,
    pub due_back: String,
}

impl From<&BookInstance> for InstanceEcho {
    fn from(instance: &BookInstance) -> Self {
        Self {
            book: instance.book_id.to_string(),
            imprint: instance.imprint.clone(),
            status: instance.status.clone(),
            due_back: instance.due_back_ymd(),
        }
    }
}

impl From<&NewInstance> for InstanceEcho {
    fn from(fields: &NewInstance) -> Self {
        Self {
            book: fields.book_id.to_string(),
            imprint: fields.imprint.clone(),
            status: fields.status.as_str().to_string(),
            due_back: fields.due_back.map(|d| d.to_string()).unwrap_or_default(),
        }
    }
}

/// Instance rules: book reference and imprint required; status must be one
/// of the enumerated values (absent defaults to Maintenance); due date
/// optional ISO-8601.
pub fn validate_instance(sub: &InstanceSubmission) -> Result<NewInstance, Invalid<InstanceEcho>> {
    let book = sanitize_text(&sub.book);
    let imprint = sanitize_text(&sub.imprint);
    let status_raw = sanitize_text(&sub.status);
    let due_raw = sanitize_text(&sub.due_back);

    let mut errors = Vec::new();

    if imprint.is_empty() {
        errors.push(FieldError::new("imprint", "Imprint must be specified"));
    }

    let book_id = if book.is_empty() {
        errors.push(FieldError::new("book", "Book must be specified"));
        None
    } else {
        match Uuid::parse_str(&book) {
            Ok(id) => Some(id),
            Err(_) => {
                errors.push(FieldError::new("book", "Book does not exist."));
                None
            }
        }
    };

    let status = if status_raw.is_empty() {
        InstanceStatus::default()
    } else {
        match status_raw.parse::<InstanceStatus>() {
            Ok(status) => status,
            Err(_) => {
                errors.push(FieldError::new("status", "Invalid status"));
                InstanceStatus::default()
            }
        }
    };

    let due_back = match parse_optional_date(&sub.due_back) {
        Ok(date) => date,
        Err(_) => {
            errors.push(FieldError::new("due_back", "Invalid date"));
            None
        }
    };

    match (errors.is_empty(), book_id) {
        (true, Some(book_id)) => Ok(NewInstance {
            book_id,
            imprint,
            status,
            due_back,
        }),
        _ => Err(Invalid {
            echo: InstanceEcho {
                book,
                imprint,
                status: status_raw,
                due_back: due_raw,
            },
            errors,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn author_sub(first: &str, family: &str) -> AuthorSubmission {
        AuthorSubmission {
            first_name: first.to_string(),
            family_name: family.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn valid_author_passes_with_trimmed_fields() {
        let sub = AuthorSubmission {
            first_name: "  Ursula ".to_string(),
            family_name: "LeGuin".to_string(),
            date_of_birth: "1929-10-21".to_string(),
            date_of_death: String::new(),
        };
        let fields = validate_author(&sub).unwrap();
        assert_eq!(fields.first_name, "Ursula");
        assert_eq!(fields.date_of_birth, NaiveDate::from_ymd_opt(1929, 10, 21));
        assert_eq!(fields.date_of_death, None);
    }

    #[test]
    fn digit_in_name_fails_and_echoes_back() {
        let invalid = validate_author(&author_sub("John2", "Steinbeck")).unwrap_err();
        assert_eq!(invalid.echo.first_name, "John2");
        assert_eq!(invalid.errors.len(), 1);
        assert_eq!(invalid.errors[0].field, "first_name");
        assert!(invalid.errors[0].message.contains("non-alphanumeric"));
    }

    #[test]
    fn missing_names_report_both_fields() {
        let invalid = validate_author(&author_sub("", "  ")).unwrap_err();
        let fields: Vec<_> = invalid.errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["first_name", "family_name"]);
    }

    #[test]
    fn bad_date_keeps_the_submitted_text() {
        let sub = AuthorSubmission {
            first_name: "John".to_string(),
            family_name: "Steinbeck".to_string(),
            date_of_birth: "02/27/1902".to_string(),
            date_of_death: String::new(),
        };
        let invalid = validate_author(&sub).unwrap_err();
        assert_eq!(invalid.echo.date_of_birth, "02/27/1902");
        assert_eq!(invalid.errors[0].field, "date_of_birth");
    }

    #[test]
    fn genre_create_needs_three_characters() {
        let sub = GenreSubmission {
            name: "Sf".to_string(),
        };
        let invalid = validate_genre(&sub, GenreRule::Create).unwrap_err();
        assert!(invalid.errors[0].message.contains("at least 3"));
        assert!(validate_genre(&sub, GenreRule::Update).is_ok());
    }

    #[test]
    fn genre_name_is_sanitized() {
        let sub = GenreSubmission {
            name: " Sword & Sorcery ".to_string(),
        };
        let fields = validate_genre(&sub, GenreRule::Create).unwrap();
        assert_eq!(fields.name, "Sword &amp; Sorcery");
    }

    #[test]
    fn scalar_and_singleton_genre_selections_are_identical_downstream() {
        let id = Uuid::new_v4();
        let one = GenreSelection::One(id.to_string());
        let many = GenreSelection::from_values(vec![id.to_string()]);
        assert_eq!(one.canonical_ids(), many.canonical_ids());
        assert_eq!(one.canonical_ids(), vec![id]);
    }

    #[test]
    fn genre_selection_drops_duplicates_and_garbage() {
        let id = Uuid::new_v4();
        let selection = GenreSelection::Many(vec![
            id.to_string(),
            "not-an-id".to_string(),
            id.to_string(),
        ]);
        assert_eq!(selection.canonical_ids(), vec![id]);
    }

    #[test]
    fn book_with_scalar_genre_matches_book_with_list_genre() {
        let author_id = Uuid::new_v4();
        let genre_id = Uuid::new_v4();
        let base = BookSubmission {
            title: "Dune".to_string(),
            author: author_id.to_string(),
            summary: "Desert planet.".to_string(),
            isbn: "9780441172719".to_string(),
            genre: GenreSelection::One(genre_id.to_string()),
        };
        let as_list = BookSubmission {
            genre: GenreSelection::Many(vec![genre_id.to_string()]),
            ..base.clone()
        };
        assert_eq!(validate_book(&base).unwrap(), validate_book(&as_list).unwrap());
    }

    #[test]
    fn empty_book_reports_every_required_field() {
        let invalid = validate_book(&BookSubmission::default()).unwrap_err();
        let fields: Vec<_> = invalid.errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["title", "summary", "isbn", "author"]);
    }

    #[test]
    fn malformed_author_reference_is_a_field_error() {
        let sub = BookSubmission {
            title: "Dune".to_string(),
            author: "definitely-not-a-uuid".to_string(),
            summary: "Desert planet.".to_string(),
            isbn: "9780441172719".to_string(),
            genre: GenreSelection::Empty,
        };
        let invalid = validate_book(&sub).unwrap_err();
        assert_eq!(invalid.errors[0].field, "author");
        assert_eq!(invalid.echo.author, "definitely-not-a-uuid");
    }

    #[test]
    fn instance_status_defaults_to_maintenance() {
        let sub = InstanceSubmission {
            book: Uuid::new_v4().to_string(),
            imprint: "Gollancz, 2011".to_string(),
            status: String::new(),
            due_back: String::new(),
        };
        let fields = validate_instance(&sub).unwrap();
        assert_eq!(fields.status, InstanceStatus::Maintenance);
        assert_eq!(fields.due_back, None);
    }

    #[test]
    fn unknown_instance_status_is_rejected() {
        let sub = InstanceSubmission {
            book: Uuid::new_v4().to_string(),
            imprint: "Gollancz, 2011".to_string(),
            status: "Lost".to_string(),
            due_back: String::new(),
        };
        let invalid = validate_instance(&sub).unwrap_err();
        assert_eq!(invalid.errors[0].field, "status");
        assert_eq!(invalid.echo.status, "Lost");
    }

    #[test]
    fn instance_due_date_parses_when_present() {
        let sub = InstanceSubmission {
            book: Uuid::new_v4().to_string(),
            imprint: "Ace, 1990".to_string(),
            status: "Loaned".to_string(),
            due_back: "2026-09-01".to_string(),
        };
        let fields = validate_instance(&sub).unwrap();
        assert_eq!(fields.status, InstanceStatus::Loaned);
        assert_eq!(fields.due_back, NaiveDate::from_ymd_opt(2026, 9, 1));
    }
}

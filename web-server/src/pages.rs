//! Server-rendered HTML pages
//!
//! Every view is a plain string builder over a shared layout: sidebar
//! navigation plus a content pane. Entity text is escaped once by the
//! validation layer before it is stored, so values interpolate verbatim
//! here. Each view renders a fixed field set: title, entity, related
//! lists, optional errors.

use librarium::database::{BookDetail, BookFormChoices, CatalogSummary, InstanceAndBook};
use librarium::models::{
    Author, Book, BookInstance, BookSummary, BookTitle, BookWithAuthor, Genre, InstanceStatus,
    InstanceWithBook,
};
use librarium::validation::{
    AuthorSubmission, BookEcho, FieldError, GenreSubmission, InstanceEcho,
};

const CSS: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; color: #222; }
.container { display: flex; min-height: 100vh; }
.sidebar { width: 220px; padding: 20px; background: #f4f4f4; }
.sidebar ul { list-style: none; padding: 0; margin: 0; }
.sidebar li { margin: 6px 0; }
.sidebar hr { border: none; border-top: 1px solid #ddd; margin: 12px 0; }
.content { flex: 1; padding: 20px 40px; max-width: 860px; }
h1 { margin-top: 0; }
dl dt { font-weight: bold; margin-top: 8px; }
dl dd { margin-left: 0; }
ul.errors { color: #b00020; }
form div { margin: 12px 0; }
label { display: block; font-weight: bold; margin-bottom: 4px; }
input[type=text], input[type=date], select, textarea { width: 100%; max-width: 420px; padding: 6px; }
button { padding: 8px 16px; }
.status-available { color: #1b7837; }
.status-maintenance { color: #b00020; }
.status-loaned { color: #a66400; }
.status-reserved { color: #5e548e; }
.muted { color: #666; }
"#;

fn layout(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{css}</style>
</head>
<body>
    <div class="container">
        <nav class="sidebar">
            <ul>
                <li><a href="/">Home</a></li>
                <li><a href="/catalog/books">All books</a></li>
                <li><a href="/catalog/authors">All authors</a></li>
                <li><a href="/catalog/genres">All genres</a></li>
                <li><a href="/catalog/bookinstances">All book-instances</a></li>
                <hr>
                <li><a href="/catalog/author/create">Create new author</a></li>
                <li><a href="/catalog/genre/create">Create new genre</a></li>
                <li><a href="/catalog/book/create">Create new book</a></li>
                <li><a href="/catalog/bookinstance/create">Create new book-instance</a></li>
            </ul>
        </nav>
        <main class="content">
{content}
        </main>
    </div>
</body>
</html>"#,
        title = title,
        css = CSS,
        content = content,
    )
}

fn errors_block(errors: &[FieldError]) -> String {
    if errors.is_empty() {
        return String::new();
    }
    let mut items = String::new();
    for error in errors {
        items.push_str(&format!("<li>{}</li>", error.message));
    }
    format!(r#"<ul class="errors">{items}</ul>"#)
}

fn status_span(status: InstanceStatus) -> String {
    format!(
        r#"<span class="status-{}">{}</span>"#,
        status.as_str().to_lowercase(),
        status.as_str()
    )
}

// ---------------------------------------------------------------------------
// Home

pub fn index_page(summary: &CatalogSummary) -> String {
    let content = format!(
        r#"<h1>Local Library Home</h1>
<p>Welcome to the library catalog.</p>
<h2>Dynamic content</h2>
<p>The library has the following record counts:</p>
<ul>
    <li><strong>Books:</strong> {books}</li>
    <li><strong>Copies:</strong> {copies}</li>
    <li><strong>Copies available:</strong> {available}</li>
    <li><strong>Authors:</strong> {authors}</li>
    <li><strong>Genres:</strong> {genres}</li>
</ul>"#,
        books = summary.book_count,
        copies = summary.book_instance_count,
        available = summary.book_instance_available_count,
        authors = summary.author_count,
        genres = summary.genre_count,
    );
    layout("Local Library Home", &content)
}

// ---------------------------------------------------------------------------
// Author

pub fn author_list_page(authors: &[Author]) -> String {
    let mut items = String::new();
    for author in authors {
        items.push_str(&format!(
            r#"<li><a href="{url}">{name}</a> <span class="muted">{lifespan}</span></li>"#,
            url = author.url(),
            name = author.name(),
            lifespan = author.lifespan(),
        ));
    }
    if items.is_empty() {
        items.push_str("<li>There are no authors.</li>");
    }
    layout(
        "Author List",
        &format!("<h1>Author List</h1>\n<ul>{items}</ul>"),
    )
}

fn book_summary_list(books: &[BookSummary], empty_note: &str) -> String {
    if books.is_empty() {
        return format!("<p>{empty_note}</p>");
    }
    let mut items = String::new();
    for book in books {
        items.push_str(&format!(
            r#"<dt><a href="{url}">{title}</a></dt><dd>{summary}</dd>"#,
            url = book.url(),
            title = book.title,
            summary = book.summary,
        ));
    }
    format!("<dl>{items}</dl>")
}

pub fn author_detail_page(author: &Author, books: &[BookSummary]) -> String {
    let content = format!(
        r#"<h1>Author: {name}</h1>
<p class="muted">{lifespan}</p>
<h2>Books</h2>
{books}
<p><a href="{url}/update">Update author</a> | <a href="{url}/delete">Delete author</a></p>"#,
        name = author.name(),
        lifespan = author.lifespan(),
        books = book_summary_list(books, "This author has no books."),
        url = author.url(),
    );
    layout("Author Detail", &content)
}

pub fn author_form_page(
    title: &str,
    echo: Option<&AuthorSubmission>,
    errors: &[FieldError],
) -> String {
    let blank = AuthorSubmission::default();
    let values = echo.unwrap_or(&blank);
    let content = format!(
        r#"<h1>{title}</h1>
<form method="POST" action="">
    <div>
        <label for="first_name">First Name:</label>
        <input type="text" id="first_name" name="first_name" value="{first_name}" placeholder="First name (Christian)">
    </div>
    <div>
        <label for="family_name">Family Name:</label>
        <input type="text" id="family_name" name="family_name" value="{family_name}" placeholder="Family name (Surname)">
    </div>
    <div>
        <label for="date_of_birth">Date of birth:</label>
        <input type="date" id="date_of_birth" name="date_of_birth" value="{date_of_birth}">
    </div>
    <div>
        <label for="date_of_death">Date of death:</label>
        <input type="date" id="date_of_death" name="date_of_death" value="{date_of_death}">
    </div>
    <button type="submit">Submit</button>
</form>
{errors}"#,
        title = title,
        first_name = values.first_name,
        family_name = values.family_name,
        date_of_birth = values.date_of_birth,
        date_of_death = values.date_of_death,
        errors = errors_block(errors),
    );
    layout(title, &content)
}

pub fn author_delete_page(author: &Author, books: &[BookSummary]) -> String {
    let body = if books.is_empty() {
        r#"<p>Do you really want to delete this Author?</p>
<form method="POST" action="">
    <button type="submit">Delete</button>
</form>"#
            .to_string()
    } else {
        format!(
            r#"<p><strong>Delete the following books before attempting to delete this author.</strong></p>
<h2>Books</h2>
{}"#,
            book_summary_list(books, "")
        )
    };
    let content = format!(
        r#"<h1>Delete Author: {name}</h1>
<p class="muted">{lifespan}</p>
{body}"#,
        name = author.name(),
        lifespan = author.lifespan(),
        body = body,
    );
    layout("Delete Author", &content)
}

// ---------------------------------------------------------------------------
// Genre

pub fn genre_list_page(genres: &[Genre]) -> String {
    let mut items = String::new();
    for genre in genres {
        items.push_str(&format!(
            r#"<li><a href="{url}">{name}</a></li>"#,
            url = genre.url(),
            name = genre.name,
        ));
    }
    if items.is_empty() {
        items.push_str("<li>There are no genres.</li>");
    }
    layout(
        "Genre List",
        &format!("<h1>Genre List</h1>\n<ul>{items}</ul>"),
    )
}

pub fn genre_detail_page(genre: &Genre, books: &[BookSummary]) -> String {
    let content = format!(
        r#"<h1>Genre: {name}</h1>
<h2>Books</h2>
{books}
<p><a href="{url}/update">Update genre</a> | <a href="{url}/delete">Delete genre</a></p>"#,
        name = genre.name,
        books = book_summary_list(books, "This genre has no books."),
        url = genre.url(),
    );
    layout("Genre Detail", &content)
}

pub fn genre_form_page(
    title: &str,
    echo: Option<&GenreSubmission>,
    errors: &[FieldError],
) -> String {
    let blank = GenreSubmission::default();
    let values = echo.unwrap_or(&blank);
    let content = format!(
        r#"<h1>{title}</h1>
<form method="POST" action="">
    <div>
        <label for="name">Genre:</label>
        <input type="text" id="name" name="name" value="{name}" placeholder="Fantasy, Poetry etc.">
    </div>
    <button type="submit">Submit</button>
</form>
{errors}"#,
        title = title,
        name = values.name,
        errors = errors_block(errors),
    );
    layout(title, &content)
}

pub fn genre_delete_page(genre: &Genre, books: &[BookSummary]) -> String {
    let body = if books.is_empty() {
        r#"<p>Do you really want to delete this Genre?</p>
<form method="POST" action="">
    <button type="submit">Delete</button>
</form>"#
            .to_string()
    } else {
        format!(
            r#"<p><strong>Delete the following books before attempting to delete this genre.</strong></p>
<h2>Books</h2>
{}"#,
            book_summary_list(books, "")
        )
    };
    let content = format!(
        r#"<h1>Delete Genre: {name}</h1>
{body}"#,
        name = genre.name,
        body = body,
    );
    layout("Delete Genre", &content)
}

// ---------------------------------------------------------------------------
// Book

pub fn book_list_page(books: &[BookWithAuthor]) -> String {
    let mut items = String::new();
    for book in books {
        items.push_str(&format!(
            r#"<li><a href="{url}">{title}</a> <span class="muted">({author})</span></li>"#,
            url = book.url(),
            title = book.title,
            author = book.author_name(),
        ));
    }
    if items.is_empty() {
        items.push_str("<li>There are no books.</li>");
    }
    layout("Book List", &format!("<h1>Book List</h1>\n<ul>{items}</ul>"))
}

pub fn book_detail_page(detail: &BookDetail) -> String {
    let author_line = match &detail.author {
        Some(author) => format!(
            r#"<a href="{url}">{name}</a>"#,
            url = author.url(),
            name = author.name()
        ),
        None => "<span class=\"muted\">unknown</span>".to_string(),
    };
    let genre_line = if detail.genres.is_empty() {
        "<span class=\"muted\">none</span>".to_string()
    } else {
        detail
            .genres
            .iter()
            .map(|g| format!(r#"<a href="{}">{}</a>"#, g.url(), g.name))
            .collect::<Vec<_>>()
            .join(", ")
    };

    let mut copies = String::new();
    for instance in &detail.instances {
        let due = match instance.status() {
            InstanceStatus::Available => String::new(),
            _ => format!(
                r#"<dd><strong>Due back:</strong> {}</dd>"#,
                instance.due_back_formatted()
            ),
        };
        copies.push_str(&format!(
            r#"<dt>{status}</dt>
<dd><strong>Imprint:</strong> {imprint}</dd>{due}
<dd><a href="{url}">View copy</a></dd>"#,
            status = status_span(instance.status()),
            imprint = instance.imprint,
            due = due,
            url = instance.url(),
        ));
    }
    let copies = if detail.instances.is_empty() {
        "<p>There are no copies of this book in the library.</p>".to_string()
    } else {
        format!("<dl>{copies}</dl>")
    };

    let content = format!(
        r#"<h1>Title: {title}</h1>
<dl>
    <dt>Author</dt><dd>{author}</dd>
    <dt>Summary</dt><dd>{summary}</dd>
    <dt>ISBN</dt><dd>{isbn}</dd>
    <dt>Genre</dt><dd>{genres}</dd>
</dl>
<h2>Copies</h2>
{copies}
<p><a href="{url}/update">Update book</a> | <a href="{url}/delete">Delete book</a></p>"#,
        title = detail.book.title,
        author = author_line,
        summary = detail.book.summary,
        isbn = detail.book.isbn,
        genres = genre_line,
        copies = copies,
        url = detail.book.url(),
    );
    layout(&detail.book.title, &content)
}

pub fn book_form_page(
    title: &str,
    choices: &BookFormChoices,
    echo: Option<&BookEcho>,
    errors: &[FieldError],
) -> String {
    let blank = BookEcho::default();
    let values = echo.unwrap_or(&blank);

    let mut author_options = String::new();
    for author in &choices.authors {
        let selected = if values.author == author.author_id.to_string() {
            " selected"
        } else {
            ""
        };
        author_options.push_str(&format!(
            r#"<option value="{id}"{selected}>{name}</option>"#,
            id = author.author_id,
            selected = selected,
            name = author.name(),
        ));
    }

    let mut genre_boxes = String::new();
    for genre in &choices.genres {
        let checked = if values.genre_ids.contains(&genre.genre_id) {
            " checked"
        } else {
            ""
        };
        genre_boxes.push_str(&format!(
            r#"<label><input type="checkbox" name="genre" value="{id}"{checked}> {name}</label>"#,
            id = genre.genre_id,
            checked = checked,
            name = genre.name,
        ));
    }

    let content = format!(
        r#"<h1>{title}</h1>
<form method="POST" action="">
    <div>
        <label for="title">Title:</label>
        <input type="text" id="title" name="title" value="{book_title}" placeholder="Name of book">
    </div>
    <div>
        <label for="author">Author:</label>
        <select id="author" name="author">
            <option value="">--Please select an author--</option>
            {author_options}
        </select>
    </div>
    <div>
        <label for="summary">Summary:</label>
        <textarea id="summary" name="summary" placeholder="Summary">{summary}</textarea>
    </div>
    <div>
        <label for="isbn">ISBN:</label>
        <input type="text" id="isbn" name="isbn" value="{isbn}" placeholder="ISBN13">
    </div>
    <div>
        <label>Genre:</label>
        {genre_boxes}
    </div>
    <button type="submit">Submit</button>
</form>
{errors}"#,
        title = title,
        book_title = values.title,
        author_options = author_options,
        summary = values.summary,
        isbn = values.isbn,
        genre_boxes = genre_boxes,
        errors = errors_block(errors),
    );
    layout(title, &content)
}

pub fn book_delete_page(book: &Book, instances: &[BookInstance]) -> String {
    let body = if instances.is_empty() {
        r#"<p>Do you really want to delete this Book?</p>
<form method="POST" action="">
    <button type="submit">Delete</button>
</form>"#
            .to_string()
    } else {
        let mut items = String::new();
        for instance in instances {
            items.push_str(&format!(
                r#"<dt>{status}</dt><dd><strong>Imprint:</strong> {imprint}</dd>"#,
                status = status_span(instance.status()),
                imprint = instance.imprint,
            ));
        }
        format!(
            r#"<p><strong>Delete the following copies before attempting to delete this book.</strong></p>
<h2>Copies</h2>
<dl>{items}</dl>"#
        )
    };
    let content = format!(
        r#"<h1>Delete Book: {title}</h1>
{body}"#,
        title = book.title,
        body = body,
    );
    layout("Delete Book", &content)
}

// ---------------------------------------------------------------------------
// BookInstance

pub fn instance_list_page(instances: &[InstanceWithBook]) -> String {
    let mut items = String::new();
    for instance in instances {
        items.push_str(&format!(
            r#"<li><a href="{url}">{title}: {imprint}</a> - {status}</li>"#,
            url = instance.url(),
            title = instance.book_title(),
            imprint = instance.imprint,
            status = status_span(instance.status()),
        ));
    }
    if items.is_empty() {
        items.push_str("<li>There are no book copies in this library.</li>");
    }
    layout(
        "Book Instance List",
        &format!("<h1>Book Instance List</h1>\n<ul>{items}</ul>"),
    )
}

pub fn instance_detail_page(view: &InstanceAndBook) -> String {
    let instance = &view.instance;
    let title_line = match &view.book {
        Some(book) => format!(
            r#"<a href="{url}">{title}</a>"#,
            url = book.url(),
            title = book.title
        ),
        None => "<span class=\"muted\">unknown</span>".to_string(),
    };
    let due = match instance.status() {
        InstanceStatus::Available => String::new(),
        _ => format!(
            "<dt>Due back</dt><dd>{}</dd>",
            instance.due_back_formatted()
        ),
    };
    let content = format!(
        r#"<h1>ID: {id}</h1>
<dl>
    <dt>Title</dt><dd>{title}</dd>
    <dt>Imprint</dt><dd>{imprint}</dd>
    <dt>Status</dt><dd>{status}</dd>
    {due}
</dl>
<p><a href="{url}/update">Update book-instance</a> | <a href="{url}/delete">Delete book-instance</a></p>"#,
        id = instance.instance_id,
        title = title_line,
        imprint = instance.imprint,
        status = status_span(instance.status()),
        due = due,
        url = instance.url(),
    );
    layout("Book Instance Detail", &content)
}

pub fn instance_form_page(
    title: &str,
    books: &[BookTitle],
    echo: Option<&InstanceEcho>,
    errors: &[FieldError],
) -> String {
    let blank = InstanceEcho::default();
    let values = echo.unwrap_or(&blank);

    let mut book_options = String::new();
    for book in books {
        let selected = if values.book == book.book_id.to_string() {
            " selected"
        } else {
            ""
        };
        book_options.push_str(&format!(
            r#"<option value="{id}"{selected}>{title}</option>"#,
            id = book.book_id,
            selected = selected,
            title = book.title,
        ));
    }

    let mut status_options = String::new();
    for status in InstanceStatus::ALL {
        let selected = if values.status == status.as_str() {
            " selected"
        } else {
            ""
        };
        status_options.push_str(&format!(
            r#"<option value="{status}"{selected}>{status}</option>"#,
            status = status.as_str(),
            selected = selected,
        ));
    }

    let content = format!(
        r#"<h1>{title}</h1>
<form method="POST" action="">
    <div>
        <label for="book">Book:</label>
        <select id="book" name="book">
            <option value="">--Please select a book--</option>
            {book_options}
        </select>
    </div>
    <div>
        <label for="imprint">Imprint:</label>
        <input type="text" id="imprint" name="imprint" value="{imprint}" placeholder="Publisher and date information">
    </div>
    <div>
        <label for="due_back">Date when book available:</label>
        <input type="date" id="due_back" name="due_back" value="{due_back}">
    </div>
    <div>
        <label for="status">Status:</label>
        <select id="status" name="status">
            {status_options}
        </select>
    </div>
    <button type="submit">Submit</button>
</form>
{errors}"#,
        title = title,
        book_options = book_options,
        imprint = values.imprint,
        due_back = values.due_back,
        status_options = status_options,
        errors = errors_block(errors),
    );
    layout(title, &content)
}

pub fn instance_delete_page(view: &InstanceAndBook) -> String {
    let instance = &view.instance;
    let title = view
        .book
        .as_ref()
        .map(|b| b.title.as_str())
        .unwrap_or("unknown");
    let content = format!(
        r#"<h1>Delete Book Instance: {id}</h1>
<dl>
    <dt>Title</dt><dd>{title}</dd>
    <dt>Imprint</dt><dd>{imprint}</dd>
    <dt>Status</dt><dd>{status}</dd>
</dl>
<p>Do you really want to delete this copy?</p>
<form method="POST" action="">
    <button type="submit">Delete</button>
</form>"#,
        id = instance.instance_id,
        title = title,
        imprint = instance.imprint,
        status = status_span(instance.status()),
    );
    layout("Delete Book Instance", &content)
}

// ---------------------------------------------------------------------------
// Errors

pub fn not_found_page(message: &str) -> String {
    let content = format!(
        r#"<h1>Not Found</h1>
<p>{message}</p>"#
    );
    layout("Not Found", &content)
}

pub fn error_page(detail: Option<&str>) -> String {
    let detail_block = match detail {
        Some(detail) => format!(r#"<pre class="muted">{}</pre>"#, detail),
        None => String::new(),
    };
    let content = format!(
        r#"<h1>Something went wrong</h1>
<p>The server hit an unexpected error while handling the request.</p>
{detail_block}"#
    );
    layout("Error", &content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use librarium::validation::FieldError;
    use uuid::Uuid;

    #[test]
    fn index_shows_every_count() {
        let page = index_page(&CatalogSummary {
            book_count: 3,
            book_instance_count: 7,
            book_instance_available_count: 2,
            author_count: 4,
            genre_count: 5,
        });
        for needle in [
            "<strong>Books:</strong> 3",
            "<strong>Copies:</strong> 7",
            "<strong>Copies available:</strong> 2",
            "<strong>Authors:</strong> 4",
            "<strong>Genres:</strong> 5",
        ] {
            assert!(page.contains(needle), "missing {needle}");
        }
    }

    #[test]
    fn author_form_echoes_values_and_errors() {
        let echo = AuthorSubmission {
            first_name: "John2".to_string(),
            family_name: "Steinbeck".to_string(),
            ..Default::default()
        };
        let errors = vec![FieldError::new(
            "first_name",
            "First name has non-alphanumeric characters.",
        )];
        let page = author_form_page("Create Author", Some(&echo), &errors);
        assert!(page.contains(r#"value="John2""#));
        assert!(page.contains("First name has non-alphanumeric characters."));
    }

    #[test]
    fn book_form_checks_selected_genres() {
        let genre_id = Uuid::new_v4();
        let choices = BookFormChoices {
            authors: vec![],
            genres: vec![Genre {
                genre_id,
                name: "Fantasy".to_string(),
            }],
        };
        let echo = BookEcho {
            genre_ids: vec![genre_id],
            ..Default::default()
        };
        let page = book_form_page("Update Book", &choices, Some(&echo), &[]);
        assert!(page.contains(&format!(r#"value="{genre_id}" checked"#)));
    }

    #[test]
    fn delete_page_lists_blocking_dependents() {
        let author = Author {
            author_id: Uuid::new_v4(),
            first_name: "Frank".to_string(),
            family_name: "Herbert".to_string(),
            date_of_birth: None,
            date_of_death: None,
        };
        let books = vec![BookSummary {
            book_id: Uuid::new_v4(),
            title: "Dune".to_string(),
            summary: "Desert planet.".to_string(),
        }];
        let page = author_delete_page(&author, &books);
        assert!(page.contains("Delete the following books"));
        assert!(page.contains("Dune"));
        assert!(!page.contains("Do you really want to delete"));
    }

    #[test]
    fn not_found_names_the_entity_kind() {
        let page = not_found_page("Author not found.");
        assert!(page.contains("Author not found."));
    }

    #[test]
    fn error_detail_only_renders_when_given() {
        assert!(!error_page(None).contains("<pre"));
        assert!(error_page(Some("boom")).contains("boom"));
    }
}

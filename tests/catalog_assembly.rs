//! Composite query assembly: the five-count summary and the
//! author/genre/book detail joins.

mod support;

use librarium::database::{
    AuthorService, BookInstanceService, BookService, CatalogQueries, GenreService, NewAuthor,
    NewBook, NewGenre, NewInstance,
};
use librarium::models::InstanceStatus;

// One test body on purpose: the count assertions assume no other writer in
// this process between the summary call and the direct counts.
#[tokio::test]
async fn summary_counts_match_direct_counts_and_details_resolve() {
    let Some(pool) = support::test_pool().await else {
        return;
    };
    let authors = AuthorService::new(pool.clone());
    let genres = GenreService::new(pool.clone());
    let books = BookService::new(pool.clone());
    let instances = BookInstanceService::new(pool.clone());
    let queries = CatalogQueries::new(pool);

    let before = queries.catalog_summary().await.unwrap();

    let author_id = authors
        .create_author(&NewAuthor {
            first_name: "Ursula".to_string(),
            family_name: "LeGuin".to_string(),
            date_of_birth: None,
            date_of_death: None,
        })
        .await
        .unwrap();
    let genre_id = genres
        .create_genre(&NewGenre {
            name: support::unique("Anarchist SF"),
        })
        .await
        .unwrap();
    // Two books with deliberately inverted creation order to observe the
    // title sort.
    let second_title = support::unique("The Dispossessed B");
    let first_title = support::unique("The Dispossessed A");
    let second_book = books
        .create_book(&NewBook {
            title: second_title.clone(),
            author_id,
            summary: "Walls.".to_string(),
            isbn: "9780060512750".to_string(),
            genre_ids: vec![genre_id],
        })
        .await
        .unwrap();
    let first_book = books
        .create_book(&NewBook {
            title: first_title.clone(),
            author_id,
            summary: "Moons.".to_string(),
            isbn: "9780060512751".to_string(),
            genre_ids: vec![genre_id],
        })
        .await
        .unwrap();
    let available = instances
        .create_instance(&NewInstance {
            book_id: first_book,
            imprint: support::unique("Harper"),
            status: InstanceStatus::Available,
            due_back: None,
        })
        .await
        .unwrap();
    let loaned = instances
        .create_instance(&NewInstance {
            book_id: first_book,
            imprint: support::unique("Harper"),
            status: InstanceStatus::Loaned,
            due_back: None,
        })
        .await
        .unwrap();

    let after = queries.catalog_summary().await.unwrap();
    assert_eq!(after.author_count, before.author_count + 1);
    assert_eq!(after.genre_count, before.genre_count + 1);
    assert_eq!(after.book_count, before.book_count + 2);
    assert_eq!(after.book_instance_count, before.book_instance_count + 2);
    assert_eq!(
        after.book_instance_available_count,
        before.book_instance_available_count + 1
    );

    // The summary equals the independently-queried counts.
    assert_eq!(after.author_count, authors.count_authors().await.unwrap());
    assert_eq!(after.genre_count, genres.count_genres().await.unwrap());
    assert_eq!(after.book_count, books.count_books().await.unwrap());
    assert_eq!(
        after.book_instance_count,
        instances.count_instances().await.unwrap()
    );
    assert_eq!(
        after.book_instance_available_count,
        instances.count_available_instances().await.unwrap()
    );

    // Author detail: both books, title ascending.
    let author_view = queries.author_with_books(author_id).await.unwrap().unwrap();
    assert_eq!(author_view.author.name(), "LeGuin, Ursula");
    let titles: Vec<_> = author_view.books.iter().map(|b| b.title.clone()).collect();
    assert_eq!(titles, vec![first_title.clone(), second_title.clone()]);

    // Genre detail mirrors the membership query.
    let genre_view = queries.genre_with_books(genre_id).await.unwrap().unwrap();
    assert_eq!(genre_view.books.len(), 2);

    // Book detail resolves both references inline and carries the copies.
    let detail = queries.book_detail(first_book).await.unwrap().unwrap();
    assert_eq!(detail.author.as_ref().unwrap().author_id, author_id);
    assert_eq!(detail.genres.len(), 1);
    assert_eq!(detail.genres[0].genre_id, genre_id);
    assert_eq!(detail.instances.len(), 2);

    // Missing identity resolves to None, not an error.
    assert!(queries
        .book_detail(uuid::Uuid::new_v4())
        .await
        .unwrap()
        .is_none());

    for id in [available, loaned] {
        instances.delete_instance(id).await.unwrap();
    }
    for id in [first_book, second_book] {
        books.delete_book(id).await.unwrap();
    }
    genres.delete_genre(genre_id).await.unwrap();
    authors.delete_author(author_id).await.unwrap();
}

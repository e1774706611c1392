//! Dependency-guarded deletes: a delete with live dependents is a no-op
//! that returns the dependents; a delete with none removes exactly the
//! target entity.

mod support;

use librarium::database::{
    AuthorService, BookInstanceService, BookService, DeleteOutcome, NewAuthor, NewBook,
    NewInstance, RelationalIntegrity,
};
use librarium::models::InstanceStatus;

fn author_fields() -> NewAuthor {
    NewAuthor {
        first_name: "Octavia".to_string(),
        family_name: "Butler".to_string(),
        date_of_birth: None,
        date_of_death: None,
    }
}

#[tokio::test]
async fn author_delete_is_blocked_by_referencing_book() {
    let Some(pool) = support::test_pool().await else {
        return;
    };
    let authors = AuthorService::new(pool.clone());
    let books = BookService::new(pool.clone());
    let integrity = RelationalIntegrity::new(pool);

    let author_id = authors.create_author(&author_fields()).await.unwrap();
    let book_id = books
        .create_book(&NewBook {
            title: support::unique("Kindred"),
            author_id,
            summary: "Time and bondage.".to_string(),
            isbn: "9780807083697".to_string(),
            genre_ids: vec![],
        })
        .await
        .unwrap();

    assert!(!integrity.can_delete_author(author_id).await.unwrap());

    let outcome = integrity.delete_author_checked(author_id).await.unwrap();
    let DeleteOutcome::Blocked(dependents) = outcome else {
        panic!("expected blocked delete");
    };
    assert_eq!(dependents.len(), 1);
    assert_eq!(dependents[0].book_id, book_id);

    // Nothing moved: both records are still there, unchanged.
    let author = authors.get_author(author_id).await.unwrap().unwrap();
    assert_eq!(author.family_name, "Butler");
    assert!(books.get_book(book_id).await.unwrap().is_some());

    // Remove the dependent and the delete goes through.
    assert!(matches!(
        integrity.delete_book_checked(book_id).await.unwrap(),
        DeleteOutcome::Deleted
    ));
    assert!(matches!(
        integrity.delete_author_checked(author_id).await.unwrap(),
        DeleteOutcome::Deleted
    ));
    assert!(authors.get_author(author_id).await.unwrap().is_none());
}

#[tokio::test]
async fn book_delete_without_instances_removes_only_the_book() {
    let Some(pool) = support::test_pool().await else {
        return;
    };
    let authors = AuthorService::new(pool.clone());
    let books = BookService::new(pool.clone());
    let integrity = RelationalIntegrity::new(pool);

    let author_id = authors.create_author(&author_fields()).await.unwrap();
    let book_id = books
        .create_book(&NewBook {
            title: support::unique("Parable"),
            author_id,
            summary: "Seeds and change.".to_string(),
            isbn: "9780446675505".to_string(),
            genre_ids: vec![],
        })
        .await
        .unwrap();

    assert!(integrity.can_delete_book(book_id).await.unwrap());
    assert!(matches!(
        integrity.delete_book_checked(book_id).await.unwrap(),
        DeleteOutcome::Deleted
    ));
    assert!(books.get_book(book_id).await.unwrap().is_none());

    // The author was untouched by the book delete.
    assert!(authors.get_author(author_id).await.unwrap().is_some());
    authors.delete_author(author_id).await.unwrap();
}

#[tokio::test]
async fn book_delete_is_blocked_by_instances_and_instance_delete_is_unconditional() {
    let Some(pool) = support::test_pool().await else {
        return;
    };
    let authors = AuthorService::new(pool.clone());
    let books = BookService::new(pool.clone());
    let instances = BookInstanceService::new(pool.clone());
    let integrity = RelationalIntegrity::new(pool);

    let author_id = authors.create_author(&author_fields()).await.unwrap();
    let book_id = books
        .create_book(&NewBook {
            title: support::unique("Fledgling"),
            author_id,
            summary: "A late vampire novel.".to_string(),
            isbn: "9780446696166".to_string(),
            genre_ids: vec![],
        })
        .await
        .unwrap();
    let instance_id = instances
        .create_instance(&NewInstance {
            book_id,
            imprint: support::unique("Seven Stories Press"),
            status: InstanceStatus::Available,
            due_back: None,
        })
        .await
        .unwrap();

    assert!(!integrity.can_delete_book(book_id).await.unwrap());
    let outcome = integrity.delete_book_checked(book_id).await.unwrap();
    let DeleteOutcome::Blocked(dependents) = outcome else {
        panic!("expected blocked delete");
    };
    assert_eq!(dependents[0].instance_id, instance_id);
    assert!(books.get_book(book_id).await.unwrap().is_some());

    // Leaf delete needs no guard.
    assert!(instances.delete_instance(instance_id).await.unwrap());
    assert!(matches!(
        integrity.delete_book_checked(book_id).await.unwrap(),
        DeleteOutcome::Deleted
    ));
    authors.delete_author(author_id).await.unwrap();
}

//! Genre duplicate-check behavior: a create whose name matches an existing
//! genre case-insensitively must resolve to the existing record, never
//! insert a second one.

mod support;

use librarium::database::{GenreCreated, GenreService, NewGenre, RelationalIntegrity};

#[tokio::test]
async fn case_insensitive_duplicate_resolves_to_existing_genre() {
    let Some(pool) = support::test_pool().await else {
        return;
    };
    let integrity = RelationalIntegrity::new(pool.clone());
    let genres = GenreService::new(pool);

    let name = support::unique("Weird Fiction");
    let first = integrity
        .create_genre_deduplicated(&NewGenre { name: name.clone() })
        .await
        .unwrap();
    let GenreCreated::Inserted(first_id) = first else {
        panic!("fresh name should insert, got {first:?}");
    };

    let shouted = name.to_uppercase();
    let second = integrity
        .create_genre_deduplicated(&NewGenre {
            name: shouted.clone(),
        })
        .await
        .unwrap();
    assert_eq!(second, GenreCreated::Existing(first_id));

    // The first-submitted casing is what stayed on record.
    let found = genres.find_genre_by_name(&shouted).await.unwrap().unwrap();
    assert_eq!(found.genre_id, first_id);
    assert_eq!(found.name, name);

    genres.delete_genre(first_id).await.unwrap();
}

#[tokio::test]
async fn distinct_names_insert_independently() {
    let Some(pool) = support::test_pool().await else {
        return;
    };
    let integrity = RelationalIntegrity::new(pool.clone());
    let genres = GenreService::new(pool);

    let first = integrity
        .create_genre_deduplicated(&NewGenre {
            name: support::unique("Gothic"),
        })
        .await
        .unwrap();
    let second = integrity
        .create_genre_deduplicated(&NewGenre {
            name: support::unique("Pastoral"),
        })
        .await
        .unwrap();

    assert!(matches!(first, GenreCreated::Inserted(_)));
    assert!(matches!(second, GenreCreated::Inserted(_)));
    assert_ne!(first.genre_id(), second.genre_id());

    genres.delete_genre(first.genre_id()).await.unwrap();
    genres.delete_genre(second.genre_id()).await.unwrap();
}

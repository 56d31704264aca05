use friendgraph::{
    db,
    error::SocialError,
    profiles::{store as profiles, NewProfile},
    search::{search_by_email, search_by_name},
};
use sqlx::SqlitePool;

async fn register_many(db_pool: &SqlitePool, count: usize) {
    for n in 0..count {
        profiles::create(db_pool, &NewProfile {
            name: format!("Member {n:02}"),
            email: format!("member{n}@x.com"),
            gender: None,
        })
        .await
        .unwrap();
    }
}

#[tokio::test]
async fn last_page_holds_the_remainder() {
    let db_pool = db::in_memory().await.unwrap();
    register_many(&db_pool, 25).await;

    let first = search_by_name(&db_pool, "member", 1, 10).await.unwrap();
    assert_eq!(first.items.len(), 10);
    assert_eq!(first.total_pages, 3);
    assert_eq!(first.total, 25);

    let third = search_by_name(&db_pool, "member", 3, 10).await.unwrap();
    assert_eq!(third.items.len(), 5);
    assert_eq!(third.page, 3);
    assert_eq!(third.items[0].name, "Member 20");

    let err = search_by_name(&db_pool, "member", 4, 10).await.unwrap_err();
    assert!(matches!(err, SocialError::InvalidPage));

    let err = search_by_name(&db_pool, "member", 0, 10).await.unwrap_err();
    assert!(matches!(err, SocialError::InvalidPage));
}

#[tokio::test]
async fn names_match_case_insensitively_in_name_order() {
    let db_pool = db::in_memory().await.unwrap();
    for (name, email) in [("Zoe Ann", "zoe@x.com"), ("anna bell", "anna@x.com"), ("Bob", "bob@x.com"), ("Joanne", "jo@x.com")] {
        profiles::create(&db_pool, &NewProfile {
            name: name.to_owned(),
            email: email.to_owned(),
            gender: None,
        })
        .await
        .unwrap();
    }

    let found = search_by_name(&db_pool, "ANN", 1, 10).await.unwrap();
    let names: Vec<_> = found.items.iter().map(|summary| summary.name.as_str()).collect();

    // plain byte order, as SQLite sorts TEXT
    assert_eq!(names, ["Joanne", "Zoe Ann", "anna bell"]);
}

#[tokio::test]
async fn no_matches_is_one_empty_page() {
    let db_pool = db::in_memory().await.unwrap();
    register_many(&db_pool, 3).await;

    let found = search_by_name(&db_pool, "nobody", 1, 10).await.unwrap();
    assert!(found.items.is_empty());
    assert_eq!(found.total_pages, 1);

    let err = search_by_name(&db_pool, "nobody", 2, 10).await.unwrap_err();
    assert!(matches!(err, SocialError::InvalidPage));
}

#[tokio::test]
async fn wildcards_in_the_query_are_literal() {
    let db_pool = db::in_memory().await.unwrap();
    register_many(&db_pool, 3).await;

    let found = search_by_name(&db_pool, "%", 1, 10).await.unwrap();
    assert!(found.items.is_empty());
}

#[tokio::test]
async fn email_lookup_is_exact_and_case_insensitive() {
    let db_pool = db::in_memory().await.unwrap();
    register_many(&db_pool, 2).await;

    let found = search_by_email(&db_pool, "MEMBER1@x.com").await.unwrap();
    assert_eq!(found.name, "Member 01");

    let err = search_by_email(&db_pool, "member1@x").await.unwrap_err();
    assert!(matches!(err, SocialError::ProfileNotFound));
}

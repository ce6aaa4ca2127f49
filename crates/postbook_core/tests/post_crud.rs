use postbook_core::db::open_db_in_memory;
use postbook_core::{
    NewPost, PostRepository, PostValidationError, RepoError, SqlitePostRepository,
};
use rusqlite::Connection;

#[test]
fn insert_then_list_returns_supplied_fields() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePostRepository::new(&conn);

    let created = repo
        .insert_post(&NewPost::new(7, "First post", "hello there"))
        .unwrap();

    let listed = repo.list_posts().unwrap();
    assert_eq!(listed, vec![created.clone()]);
    assert_eq!(created.user_id, 7);
    assert_eq!(created.title, "First post");
    assert_eq!(created.body, "hello there");
}

#[test]
fn ids_are_strictly_increasing() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePostRepository::new(&conn);

    let ids: Vec<_> = (0..5)
        .map(|n| {
            repo.insert_post(&NewPost::new(n, format!("title {n}"), "body"))
                .unwrap()
                .id
        })
        .collect();

    assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn ids_are_not_reused_after_deleting_the_newest_post() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePostRepository::new(&conn);

    repo.insert_post(&NewPost::new(1, "a", "a")).unwrap();
    let newest = repo.insert_post(&NewPost::new(1, "b", "b")).unwrap();
    assert!(repo.delete_post(newest.id).unwrap());

    let next = repo.insert_post(&NewPost::new(1, "c", "c")).unwrap();
    assert!(next.id > newest.id);
}

#[test]
fn delete_reports_presence() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePostRepository::new(&conn);

    let kept = repo.insert_post(&NewPost::new(1, "keep", "me")).unwrap();
    let gone = repo.insert_post(&NewPost::new(2, "drop", "me")).unwrap();

    assert!(repo.delete_post(gone.id).unwrap());
    assert!(!repo.delete_post(gone.id).unwrap());
    assert!(!repo.delete_post(9_999).unwrap());

    assert_eq!(repo.list_posts().unwrap(), vec![kept]);
}

#[test]
fn blank_fields_are_rejected_without_writing() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePostRepository::new(&conn);

    let err = repo.insert_post(&NewPost::new(1, "", "body")).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(PostValidationError::EmptyTitle)
    ));

    let err = repo.insert_post(&NewPost::new(1, "title", "  ")).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(PostValidationError::EmptyBody)
    ));

    assert!(repo.list_posts().unwrap().is_empty());
}

#[test]
fn list_is_stable_across_calls() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePostRepository::new(&conn);
    for n in 0..4 {
        repo.insert_post(&NewPost::new(n, format!("t{n}"), "b"))
            .unwrap();
    }

    let first = repo.list_posts().unwrap();
    let second = repo.list_posts().unwrap();
    assert_eq!(first, second);
    assert!(first.windows(2).all(|pair| pair[0].id < pair[1].id));
}

#[test]
fn null_columns_from_external_writers_are_reported() {
    let conn = open_db_in_memory().unwrap();
    // Simulate a legacy table that lacks NOT NULL constraints.
    conn.execute_batch(
        "DROP TABLE posts;
         CREATE TABLE posts (id INTEGER PRIMARY KEY, user_id INTEGER, title TEXT, body TEXT);
         INSERT INTO posts (user_id, title, body) VALUES (1, NULL, 'orphan');",
    )
    .unwrap();
    let repo = SqlitePostRepository::new(&conn);

    let err = repo.list_posts().unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(message) if message.contains("title")));
}

#[test]
fn wrongly_typed_columns_are_reported_as_invalid_data() {
    let conn = open_db_in_memory().unwrap();
    // Older writers stored the raw form text for user_id.
    conn.execute_batch(
        "DROP TABLE posts;
         CREATE TABLE posts (id INTEGER PRIMARY KEY, user_id INTEGER, title TEXT, body TEXT);
         INSERT INTO posts (user_id, title, body) VALUES ('abc', 'typed', 'row');",
    )
    .unwrap();
    let repo = SqlitePostRepository::new(&conn);

    let err = repo.list_posts().unwrap_err();
    assert!(
        matches!(&err, RepoError::InvalidData(message) if message.contains("post 1") && message.contains("user_id")),
        "unexpected error: {err}"
    );

    let err = repo.search_posts_by_title("typ").unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
    assert!(repo.search_posts_by_title("zzz").unwrap().is_empty());
}

#[test]
fn missing_table_surfaces_as_db_error() {
    let conn = Connection::open_in_memory().unwrap();
    let repo = SqlitePostRepository::new(&conn);

    let err = repo.list_posts().unwrap_err();
    assert!(matches!(err, RepoError::Db(_)));
}

#[test]
fn post_serializes_with_plain_field_names() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePostRepository::new(&conn);
    let post = repo.insert_post(&NewPost::new(3, "json", "body")).unwrap();

    let value = serde_json::to_value(&post).unwrap();
    assert_eq!(value["id"], post.id);
    assert_eq!(value["user_id"], 3);
    assert_eq!(value["title"], "json");
    assert_eq!(value["body"], "body");
}

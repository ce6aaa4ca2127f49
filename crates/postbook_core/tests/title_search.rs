use postbook_core::db::open_db_in_memory;
use postbook_core::{matches, NewPost, PostRepository, SqlitePostRepository};

#[test]
fn search_is_case_insensitive_and_unanchored() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePostRepository::new(&conn);
    let post = repo
        .insert_post(&NewPost::new(1, "Hello World", "greeting"))
        .unwrap();

    for fragment in ["hello", "HELLO", "lo wo", "World"] {
        let hits = repo.search_posts_by_title(fragment).unwrap();
        assert_eq!(hits, vec![post.clone()], "fragment {fragment:?}");
    }
    assert!(repo.search_posts_by_title("xyz").unwrap().is_empty());
}

#[test]
fn empty_fragment_equals_full_listing() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePostRepository::new(&conn);
    repo.insert_post(&NewPost::new(1, "one", "b")).unwrap();
    repo.insert_post(&NewPost::new(2, "two", "b")).unwrap();

    assert_eq!(
        repo.search_posts_by_title("").unwrap(),
        repo.list_posts().unwrap()
    );
}

#[test]
fn alpha_beta_scenario() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePostRepository::new(&conn);
    let alpha = repo.insert_post(&NewPost::new(1, "Alpha", "first")).unwrap();
    let beta = repo.insert_post(&NewPost::new(2, "beta", "second")).unwrap();

    assert_eq!(
        repo.search_posts_by_title("a").unwrap(),
        vec![alpha.clone(), beta]
    );
    assert_eq!(repo.search_posts_by_title("Alp").unwrap(), vec![alpha]);
}

#[test]
fn search_only_looks_at_titles() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePostRepository::new(&conn);
    repo.insert_post(&NewPost::new(1, "plain", "needle in body"))
        .unwrap();

    assert!(repo.search_posts_by_title("needle").unwrap().is_empty());
}

#[test]
fn like_wildcards_are_matched_literally() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePostRepository::new(&conn);
    let percent = repo
        .insert_post(&NewPost::new(1, "50% off", "sale"))
        .unwrap();
    repo.insert_post(&NewPost::new(1, "500 items", "stock"))
        .unwrap();
    let underscore = repo
        .insert_post(&NewPost::new(1, "snake_case", "naming"))
        .unwrap();
    repo.insert_post(&NewPost::new(1, "snakeXcase", "naming"))
        .unwrap();

    assert_eq!(repo.search_posts_by_title("0%").unwrap(), vec![percent]);
    assert_eq!(repo.search_posts_by_title("e_c").unwrap(), vec![underscore]);
}

#[test]
fn store_filter_agrees_with_pure_matcher() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePostRepository::new(&conn);
    let titles = [
        "Hello World",
        "ПРИВЕТ мир",
        "ΟΔΟΣ",
        "Straße",
        "STRASSE",
        "tab\tseparated",
        "emoji 🎉 party",
    ];
    for (n, title) in titles.iter().enumerate() {
        repo.insert_post(&NewPost::new(n as i64, *title, "body"))
            .unwrap();
    }
    let all = repo.list_posts().unwrap();

    let fragments = [
        "", "o", "WORLD", "привет", "οδοσ", "ss", "ß", "\t", "🎉", "y 🎉 p", "missing",
    ];
    for fragment in fragments {
        let expected: Vec<_> = all
            .iter()
            .filter(|post| matches(&post.title, fragment))
            .cloned()
            .collect();
        assert_eq!(
            repo.search_posts_by_title(fragment).unwrap(),
            expected,
            "fragment {fragment:?}"
        );
    }
}

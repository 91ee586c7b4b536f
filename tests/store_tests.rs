//! Persistence tests against a throwaway database file.

use codesnap::error::Error;
use codesnap::models::{Language, SnippetStore};
use tempfile::TempDir;

fn test_store() -> (TempDir, SnippetStore) {
    let dir = TempDir::new().unwrap();
    let store = SnippetStore::open(dir.path().join("snippets.db")).unwrap();
    (dir, store)
}

#[test]
fn add_then_get_round_trips_all_fields() {
    let (_dir, store) = test_store();
    let id = store
        .add("Hello", Language::Python, "greeting", "print('hi')")
        .unwrap();

    let snippet = store.get(id).unwrap();
    assert_eq!(snippet.id, id);
    assert_eq!(snippet.title, "Hello");
    assert_eq!(snippet.language, Language::Python);
    assert_eq!(snippet.tags, "greeting");
    assert_eq!(snippet.code, "print('hi')");
    assert!(!snippet.is_favorite);
    assert!(snippet.created_at.timestamp() > 0);
}

#[test]
fn update_overwrites_mutable_fields() {
    let (_dir, store) = test_store();
    let id = store
        .add("Hello", Language::Python, "greeting", "print('hi')")
        .unwrap();
    let created = store.get(id).unwrap().created_at;

    store
        .update(id, "Hello", Language::Python, "greeting,demo", "print('hello')")
        .unwrap();

    let snippet = store.get(id).unwrap();
    assert_eq!(snippet.tags, "greeting,demo");
    assert_eq!(snippet.code, "print('hello')");
    // The creation timestamp is written exactly once.
    assert_eq!(snippet.created_at, created);
}

#[test]
fn update_of_missing_id_is_not_found() {
    let (_dir, store) = test_store();
    let err = store
        .update(42, "Ghost", Language::Text, "", "")
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(42)));
}

#[test]
fn delete_then_get_is_not_found() {
    let (_dir, store) = test_store();
    let id = store.add("Gone", Language::Text, "", "x").unwrap();
    store.delete(id).unwrap();
    assert!(matches!(store.get(id), Err(Error::NotFound(_))));
    // Deleting again is not an error.
    store.delete(id).unwrap();
}

#[test]
fn listing_is_ordered_by_title() {
    let (_dir, store) = test_store();
    store.add("Bravo", Language::Sql, "", "x").unwrap();
    store.add("Alpha", Language::Python, "", "x").unwrap();
    store.add("Charlie", Language::Bash, "", "x").unwrap();

    let titles: Vec<String> = store
        .list_all()
        .unwrap()
        .into_iter()
        .map(|s| s.title)
        .collect();
    assert_eq!(titles, ["Alpha", "Bravo", "Charlie"]);
}

#[test]
fn empty_search_equals_list_all() {
    let (_dir, store) = test_store();
    store.add("Alpha", Language::Python, "", "x").unwrap();
    store.add("Bravo", Language::Sql, "", "x").unwrap();

    let all = store.list_all().unwrap();
    let searched = store.search("", false).unwrap();
    assert_eq!(all, searched);
}

#[test]
fn search_matches_title_tags_and_language() {
    let (_dir, store) = test_store();
    store
        .add("List helpers", Language::Python, "utils", "x")
        .unwrap();
    store
        .add("Join query", Language::Sql, "reporting", "x")
        .unwrap();

    let by_title = store.search("helpers", false).unwrap();
    assert_eq!(by_title.len(), 1);
    assert_eq!(by_title[0].title, "List helpers");

    let by_tag = store.search("reporting", false).unwrap();
    assert_eq!(by_tag.len(), 1);
    assert_eq!(by_tag[0].title, "Join query");

    let by_language = store.search("sql", false).unwrap();
    assert_eq!(by_language.len(), 1);
    assert_eq!(by_language[0].language, Language::Sql);
}

#[test]
fn favorites_search_is_a_subset_of_the_plain_search() {
    let (_dir, store) = test_store();
    let a = store.add("Alpha", Language::Python, "demo", "x").unwrap();
    store.add("Bravo", Language::Python, "demo", "x").unwrap();
    store.toggle_favorite(a).unwrap();

    let plain = store.search("demo", false).unwrap();
    let favorites = store.search("demo", true).unwrap();
    assert_eq!(plain.len(), 2);
    assert_eq!(favorites.len(), 1);
    assert!(favorites.iter().all(|s| s.is_favorite));
    assert!(
        favorites
            .iter()
            .all(|f| plain.iter().any(|p| p.id == f.id))
    );
}

#[test]
fn double_toggle_restores_the_favorite_flag() {
    let (_dir, store) = test_store();
    let id = store.add("Flip", Language::Text, "", "x").unwrap();

    assert!(store.toggle_favorite(id).unwrap());
    assert!(store.get(id).unwrap().is_favorite);
    assert!(!store.toggle_favorite(id).unwrap());
    assert!(!store.get(id).unwrap().is_favorite);
}

#[test]
fn toggle_favorite_of_missing_id_is_not_found() {
    let (_dir, store) = test_store();
    assert!(matches!(store.toggle_favorite(7), Err(Error::NotFound(7))));
}

#[test]
fn favorites_listing_only_contains_favorites_in_title_order() {
    let (_dir, store) = test_store();
    let b = store.add("Bravo", Language::Sql, "", "x").unwrap();
    let a = store.add("Alpha", Language::Python, "", "x").unwrap();
    store.add("Charlie", Language::Bash, "", "x").unwrap();
    store.toggle_favorite(a).unwrap();
    store.toggle_favorite(b).unwrap();

    let favorites = store.list_favorites().unwrap();
    let titles: Vec<&str> = favorites.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, ["Alpha", "Bravo"]);
}

#[test]
fn reopening_keeps_existing_rows() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("snippets.db");
    let id = {
        let store = SnippetStore::open(&path).unwrap();
        store.add("Keep me", Language::Python, "", "x").unwrap()
    };

    let store = SnippetStore::open(&path).unwrap();
    assert_eq!(store.get(id).unwrap().title, "Keep me");
}

#[test]
fn opening_a_pre_favorites_database_adds_the_column() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("snippets.db");
    {
        let conn = rusqlite::Connection::open(&path).unwrap();
        conn.execute(
            "CREATE TABLE snippets (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                language TEXT NOT NULL,
                tags TEXT,
                code TEXT NOT NULL,
                created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
            )",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO snippets (title, language, tags, code)
             VALUES ('Legacy', 'python', NULL, 'x')",
            [],
        )
        .unwrap();
    }

    let store = SnippetStore::open(&path).unwrap();
    let listing = store.list_all().unwrap();
    assert_eq!(listing.len(), 1);
    assert_eq!(listing[0].title, "Legacy");
    assert!(!listing[0].is_favorite);
    // NULL tags read back as an empty string.
    assert_eq!(listing[0].tags, "");

    let id = listing[0].id;
    assert!(store.toggle_favorite(id).unwrap());
    assert!(store.get(id).unwrap().is_favorite);
}

#[test]
fn unknown_language_names_fall_back_to_text() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("snippets.db");
    let store = SnippetStore::open(&path).unwrap();
    let id = store.add("Odd", Language::Python, "", "x").unwrap();
    {
        let conn = rusqlite::Connection::open(&path).unwrap();
        conn.execute("UPDATE snippets SET language = 'fortran'", [])
            .unwrap();
    }
    assert_eq!(store.get(id).unwrap().language, Language::Text);
}

//! Session lifecycle tests: dirty tracking, the unsaved-changes guard and
//! save/delete semantics.

use codesnap::error::Error;
use codesnap::models::{Language, SnippetStore};
use codesnap::session::{EditorSession, GuardVerdict};
use tempfile::TempDir;

fn test_store() -> (TempDir, SnippetStore) {
    let dir = TempDir::new().unwrap();
    let store = SnippetStore::open(dir.path().join("snippets.db")).unwrap();
    (dir, store)
}

#[test]
fn fresh_session_passes_the_guard() {
    let session = EditorSession::new();
    assert!(!session.is_dirty());
    assert_eq!(session.guard(), GuardVerdict::Proceed);
}

#[test]
fn editing_makes_the_guard_demand_a_decision() {
    let mut session = EditorSession::new();
    session.code.push('x');
    session.mark_dirty();
    assert_eq!(session.guard(), GuardVerdict::NeedsDecision);
}

#[test]
fn save_of_a_new_snippet_adopts_the_id_and_clears_dirty() {
    let (_dir, store) = test_store();
    let mut session = EditorSession::new();
    session.title = "Hello".into();
    session.language = Language::Python;
    session.tags = "greeting".into();
    session.code = "print('hi')".into();
    session.mark_dirty();

    let id = session.save(&store).unwrap();
    assert_eq!(session.loaded_id, Some(id));
    assert!(!session.is_dirty());
    assert_eq!(store.get(id).unwrap().title, "Hello");
}

#[test]
fn save_of_a_loaded_snippet_updates_in_place() {
    let (_dir, store) = test_store();
    let id = store
        .add("Hello", Language::Python, "greeting", "print('hi')")
        .unwrap();

    let mut session = EditorSession::new();
    session.load(&store, id).unwrap();
    session.tags = "greeting,demo".into();
    session.mark_dirty();

    assert_eq!(session.save(&store).unwrap(), id);
    assert_eq!(store.get(id).unwrap().tags, "greeting,demo");
    assert_eq!(store.list_all().unwrap().len(), 1);
}

#[test]
fn save_trims_title_and_tags() {
    let (_dir, store) = test_store();
    let mut session = EditorSession::new();
    session.title = "  Hello  ".into();
    session.tags = " a,b ".into();
    session.code = "x".into();
    session.mark_dirty();

    let id = session.save(&store).unwrap();
    let snippet = store.get(id).unwrap();
    assert_eq!(snippet.title, "Hello");
    assert_eq!(snippet.tags, "a,b");
}

#[test]
fn save_with_blank_title_fails_and_stays_dirty() {
    let (_dir, store) = test_store();
    let mut session = EditorSession::new();
    session.title = "   ".into();
    session.code = "x".into();
    session.mark_dirty();

    assert!(matches!(session.save(&store), Err(Error::Validation(_))));
    assert!(session.is_dirty());
    assert!(store.list_all().unwrap().is_empty());
}

#[test]
fn load_replaces_fields_and_clears_dirty() {
    let (_dir, store) = test_store();
    let id = store
        .add("Hello", Language::Python, "greeting", "print('hi')")
        .unwrap();

    let mut session = EditorSession::new();
    session.code = "unsaved".into();
    session.mark_dirty();
    session.load(&store, id).unwrap();

    assert_eq!(session.loaded_id, Some(id));
    assert_eq!(session.title, "Hello");
    assert_eq!(session.code, "print('hi')");
    assert!(!session.is_dirty());
}

#[test]
fn load_of_a_missing_id_leaves_the_session_untouched_fields_aside() {
    let (_dir, store) = test_store();
    let mut session = EditorSession::new();
    assert!(matches!(session.load(&store, 9), Err(Error::NotFound(9))));
    assert!(session.loaded_id.is_none());
}

#[test]
fn start_new_resets_everything() {
    let (_dir, store) = test_store();
    let id = store.add("Hello", Language::Sql, "t", "x").unwrap();
    let mut session = EditorSession::new();
    session.load(&store, id).unwrap();
    session.code.push('!');
    session.mark_dirty();

    session.start_new();
    assert_eq!(session, EditorSession::new());
}

#[test]
fn delete_removes_the_row_and_resets_the_session() {
    let (_dir, store) = test_store();
    let id = store.add("Gone", Language::Text, "", "x").unwrap();
    let mut session = EditorSession::new();
    session.load(&store, id).unwrap();
    // Deleting a dirty session is deliberate; there is nothing left to save.
    session.code.push('!');
    session.mark_dirty();

    session.delete(&store).unwrap();
    assert!(matches!(store.get(id), Err(Error::NotFound(_))));
    assert_eq!(session, EditorSession::new());
}

#[test]
fn delete_without_a_loaded_snippet_is_a_no_op() {
    let (_dir, store) = test_store();
    let mut session = EditorSession::new();
    session.code = "draft".into();
    session.mark_dirty();

    session.delete(&store).unwrap();
    assert_eq!(session.code, "draft");
    assert!(session.is_dirty());
}

#[test]
fn toggle_favorite_does_not_touch_the_dirty_flag() {
    let (_dir, store) = test_store();
    let id = store.add("Fav", Language::Python, "", "x").unwrap();
    let mut session = EditorSession::new();
    session.load(&store, id).unwrap();

    assert!(session.toggle_favorite(&store).unwrap());
    assert!(!session.is_dirty());

    session.code.push('!');
    session.mark_dirty();
    assert!(!session.toggle_favorite(&store).unwrap());
    assert!(session.is_dirty());
}

#[test]
fn toggle_favorite_requires_a_loaded_snippet() {
    let (_dir, store) = test_store();
    let session = EditorSession::new();
    assert!(matches!(
        session.toggle_favorite(&store),
        Err(Error::Validation(_))
    ));
}

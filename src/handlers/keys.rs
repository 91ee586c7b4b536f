//! Keyboard input handling.
//!
//! Dispatch order matters: an open prompt captures everything, then search
//! mode, then the global control shortcuts, then the focused pane. Returns
//! true when the application should quit.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, ExportField, Focus, Prompt};
use crate::collab::export::{EXPORT_THEMES, MAX_FONT_SIZE, MIN_FONT_SIZE};
use crate::session::{GuardChoice, NavAction};

pub fn handle_key_events(key: KeyEvent, app: &mut App) -> bool {
    if app.prompt.is_some() {
        handle_prompt_keys(key, app);
        return app.should_quit;
    }
    if app.search_active {
        handle_search_keys(key, app);
        return app.should_quit;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('s') => app.save_snippet(),
            KeyCode::Char('n') => app.request_nav(NavAction::New),
            KeyCode::Char('d') => app.request_delete(),
            KeyCode::Char('f') => app.toggle_favorite(),
            KeyCode::Char('p') => app.prettify(),
            KeyCode::Char('y') => app.copy_code(),
            KeyCode::Char('e') => app.open_export_dialog(),
            KeyCode::Char('o') => app.toggle_favorites_filter(),
            KeyCode::Char('q') | KeyCode::Char('c') => app.request_nav(NavAction::Quit),
            _ => {}
        }
        return app.should_quit;
    }

    match key.code {
        KeyCode::Tab => app.focus = app.focus.next(),
        KeyCode::BackTab => app.focus = app.focus.previous(),
        _ => match app.focus {
            Focus::List => handle_list_keys(key, app),
            Focus::Language => handle_language_keys(key, app),
            Focus::Title | Focus::Tags => handle_text_field_keys(key, app),
            Focus::Code => handle_code_keys(key, app),
        },
    }
    app.should_quit
}

fn handle_list_keys(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Enter => app.load_selected(),
        KeyCode::Char('/') => {
            app.clear_messages();
            app.search_active = true;
        }
        KeyCode::Char('n') => app.request_nav(NavAction::New),
        KeyCode::Char('o') => app.toggle_favorites_filter(),
        KeyCode::Char('?') => app.prompt = Some(Prompt::Help),
        KeyCode::Char('q') => app.request_nav(NavAction::Quit),
        _ => {}
    }
}

fn handle_language_keys(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Left => app.cycle_language(false),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Right => app.cycle_language(true),
        _ => {}
    }
}

fn handle_text_field_keys(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Char(c) => app.field_insert(c),
        KeyCode::Backspace => app.field_backspace(),
        KeyCode::Enter => app.focus = app.focus.next(),
        KeyCode::Esc => app.focus = Focus::List,
        _ => {}
    }
}

fn handle_code_keys(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Char(c) => app.field_insert(c),
        KeyCode::Backspace => app.field_backspace(),
        KeyCode::Enter => app.code_newline(),
        KeyCode::Up => app.move_cursor_up(),
        KeyCode::Down => app.move_cursor_down(),
        KeyCode::Left => app.move_cursor_left(),
        KeyCode::Right => app.move_cursor_right(),
        KeyCode::Esc => app.focus = Focus::List,
        _ => {}
    }
}

/// Live search: every keystroke re-derives the listing, exactly like the
/// list and filter operations.
fn handle_search_keys(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Esc => {
            app.search_active = false;
            app.set_search_query(String::new());
        }
        KeyCode::Enter => app.search_active = false,
        KeyCode::Backspace => {
            let mut query = app.filter.query.clone();
            query.pop();
            app.set_search_query(query);
        }
        KeyCode::Char(c) => {
            let mut query = app.filter.query.clone();
            query.push(c);
            app.set_search_query(query);
        }
        _ => {}
    }
}

fn handle_prompt_keys(key: KeyEvent, app: &mut App) {
    match app.prompt {
        Some(Prompt::UnsavedChanges { .. }) => match key.code {
            KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Enter => {
                app.resolve_unsaved(GuardChoice::Save)
            }
            KeyCode::Char('d') | KeyCode::Char('D') => app.resolve_unsaved(GuardChoice::Discard),
            KeyCode::Char('c') | KeyCode::Char('C') | KeyCode::Esc => {
                app.resolve_unsaved(GuardChoice::Cancel)
            }
            _ => {}
        },
        Some(Prompt::ConfirmDelete) => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => app.confirm_delete(),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.prompt = None,
            _ => {}
        },
        Some(Prompt::Help) => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Enter) {
                app.prompt = None;
            }
        }
        Some(Prompt::Export(_)) => handle_export_dialog_keys(key, app),
        None => {}
    }
}

fn handle_export_dialog_keys(key: KeyEvent, app: &mut App) {
    if key.code == KeyCode::Esc {
        app.prompt = None;
        return;
    }
    if key.code == KeyCode::Enter {
        app.run_export();
        return;
    }

    let Some(Prompt::Export(dialog)) = &mut app.prompt else {
        return;
    };
    match key.code {
        KeyCode::Tab | KeyCode::Down => {
            dialog.field = match dialog.field {
                ExportField::Theme => ExportField::FontSize,
                ExportField::FontSize => ExportField::LineNumbers,
                ExportField::LineNumbers => ExportField::Path,
                ExportField::Path => ExportField::Theme,
            };
        }
        KeyCode::BackTab | KeyCode::Up => {
            dialog.field = match dialog.field {
                ExportField::Theme => ExportField::Path,
                ExportField::FontSize => ExportField::Theme,
                ExportField::LineNumbers => ExportField::FontSize,
                ExportField::Path => ExportField::LineNumbers,
            };
        }
        KeyCode::Left => match dialog.field {
            ExportField::Theme => {
                dialog.theme_index =
                    (dialog.theme_index + EXPORT_THEMES.len() - 1) % EXPORT_THEMES.len();
            }
            ExportField::FontSize => {
                dialog.font_size = dialog.font_size.saturating_sub(1).max(MIN_FONT_SIZE);
            }
            ExportField::LineNumbers => dialog.line_numbers = !dialog.line_numbers,
            ExportField::Path => {}
        },
        KeyCode::Right => match dialog.field {
            ExportField::Theme => {
                dialog.theme_index = (dialog.theme_index + 1) % EXPORT_THEMES.len();
            }
            ExportField::FontSize => {
                dialog.font_size = (dialog.font_size + 1).min(MAX_FONT_SIZE);
            }
            ExportField::LineNumbers => dialog.line_numbers = !dialog.line_numbers,
            ExportField::Path => {}
        },
        KeyCode::Char(' ') if dialog.field == ExportField::LineNumbers => {
            dialog.line_numbers = !dialog.line_numbers;
        }
        KeyCode::Char(c) if dialog.field == ExportField::Path => dialog.path.push(c),
        KeyCode::Backspace if dialog.field == ExportField::Path => {
            dialog.path.pop();
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExportPrefs;
    use crate::models::SnippetStore;
    use tempfile::TempDir;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn test_app() -> (TempDir, App) {
        let dir = TempDir::new().unwrap();
        let store = SnippetStore::open(dir.path().join("snippets.db")).unwrap();
        let app = App::with_store(store, ExportPrefs::default());
        (dir, app)
    }

    #[test]
    fn quit_is_immediate_when_clean() {
        let (_dir, mut app) = test_app();
        assert!(handle_key_events(ctrl('q'), &mut app));
    }

    #[test]
    fn quit_prompts_when_dirty() {
        let (_dir, mut app) = test_app();
        app.focus = Focus::Title;
        handle_key_events(press(KeyCode::Char('H')), &mut app);
        assert!(!handle_key_events(ctrl('q'), &mut app));
        assert!(matches!(app.prompt, Some(Prompt::UnsavedChanges { .. })));
        // Cancel: still running, edits intact.
        assert!(!handle_key_events(press(KeyCode::Esc), &mut app));
        assert_eq!(app.session.title, "H");
        assert!(app.session.is_dirty());
    }

    #[test]
    fn search_keystrokes_refresh_the_listing_live() {
        let (_dir, mut app) = test_app();
        app.store
            .add("Hello", crate::models::Language::Python, "greeting", "x")
            .unwrap();
        app.refresh_listing();
        handle_key_events(press(KeyCode::Char('/')), &mut app);
        assert!(app.search_active);
        handle_key_events(press(KeyCode::Char('z')), &mut app);
        assert!(app.listing.is_empty());
        handle_key_events(press(KeyCode::Backspace), &mut app);
        assert_eq!(app.listing.len(), 1);
    }
}

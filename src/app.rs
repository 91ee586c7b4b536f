//! Central application state.
//!
//! `App` owns the store, the editing session and the derived listing, and
//! funnels every UI action through the session's dirty guard before it can
//! replace the in-memory snippet. All collaborator failures end up as
//! status messages here; nothing propagates out of an action.

use std::path::PathBuf;

use tracing::{error, info};

use crate::collab::clipboard::copy_to_clipboard;
use crate::collab::export::{
    EXPORT_THEMES, ExportRequest, ImageExporter, MAX_FONT_SIZE, MIN_FONT_SIZE, SiliconExporter,
};
use crate::collab::format::{ExternalFormatter, FormatOutcome, Formatter};
use crate::config::{Config, ExportPrefs};
use crate::error::Result;
use crate::models::{Language, SnippetStore, SnippetSummary};
use crate::projection::ListingFilter;
use crate::session::{EditorSession, GuardChoice, GuardVerdict, NavAction};

/// Which pane receives plain keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    List,
    Title,
    Language,
    Tags,
    Code,
}

impl Focus {
    pub fn next(self) -> Focus {
        match self {
            Focus::List => Focus::Title,
            Focus::Title => Focus::Language,
            Focus::Language => Focus::Tags,
            Focus::Tags => Focus::Code,
            Focus::Code => Focus::List,
        }
    }

    pub fn previous(self) -> Focus {
        match self {
            Focus::List => Focus::Code,
            Focus::Title => Focus::List,
            Focus::Language => Focus::Title,
            Focus::Tags => Focus::Language,
            Focus::Code => Focus::Tags,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportField {
    Theme,
    FontSize,
    LineNumbers,
    Path,
}

#[derive(Debug, Clone)]
pub struct ExportDialog {
    pub theme_index: usize,
    pub font_size: u32,
    pub line_numbers: bool,
    pub path: String,
    pub field: ExportField,
}

/// Modal state rendered on top of the main layout.
#[derive(Debug, Clone)]
pub enum Prompt {
    /// The dirty guard: the pending navigation waits for Save / Discard /
    /// Cancel.
    UnsavedChanges { action: NavAction },
    ConfirmDelete,
    Export(ExportDialog),
    Help,
}

pub struct App {
    pub store: SnippetStore,
    pub session: EditorSession,
    pub filter: ListingFilter,
    pub listing: Vec<SnippetSummary>,
    pub selected: usize,
    pub focus: Focus,
    pub search_active: bool,
    pub prompt: Option<Prompt>,
    pub success_message: Option<String>,
    pub error_message: Option<String>,
    pub cursor_line: usize,
    pub cursor_col: usize,
    pub should_quit: bool,
    export_prefs: ExportPrefs,
    formatter: Box<dyn Formatter>,
    exporter: Box<dyn ImageExporter>,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let store = SnippetStore::open(config.database_path())?;
        Ok(Self::with_store(store, config.export))
    }

    /// Build an app around an already opened store. Collaborators default to
    /// the external subprocess implementations and can be swapped afterwards.
    pub fn with_store(store: SnippetStore, export_prefs: ExportPrefs) -> Self {
        let mut app = Self {
            store,
            session: EditorSession::new(),
            filter: ListingFilter::default(),
            listing: Vec::new(),
            selected: 0,
            focus: Focus::List,
            search_active: false,
            prompt: None,
            success_message: None,
            error_message: None,
            cursor_line: 0,
            cursor_col: 0,
            should_quit: false,
            export_prefs,
            formatter: Box::new(ExternalFormatter),
            exporter: Box::new(SiliconExporter),
        };
        app.refresh_listing();
        app
    }

    // --- Messages ---------------------------------------------------------

    pub fn set_success_message(&mut self, message: impl Into<String>) {
        self.success_message = Some(message.into());
        self.error_message = None;
    }

    pub fn set_error_message(&mut self, message: impl Into<String>) {
        self.error_message = Some(message.into());
        self.success_message = None;
    }

    pub fn clear_messages(&mut self) {
        self.success_message = None;
        self.error_message = None;
    }

    // --- Listing / projection --------------------------------------------

    /// Re-derive the listing from the store. On failure the previous listing
    /// stays visible and the error is reported.
    pub fn refresh_listing(&mut self) {
        match self.filter.fetch(&self.store) {
            Ok(listing) => {
                self.listing = listing;
                if self.listing.is_empty() {
                    self.selected = 0;
                } else {
                    self.selected = self.selected.min(self.listing.len() - 1);
                }
            }
            Err(err) => {
                error!("listing refresh failed: {err}");
                self.set_error_message(err.to_string());
            }
        }
    }

    pub fn selected_summary(&self) -> Option<&SnippetSummary> {
        self.listing.get(self.selected)
    }

    /// Favorite marker for the editor pane, derived from the listing.
    pub fn is_loaded_favorite(&self) -> bool {
        self.session.loaded_id.is_some_and(|id| {
            self.listing
                .iter()
                .any(|summary| summary.id == id && summary.is_favorite)
        })
    }

    pub fn select_next(&mut self) {
        if !self.listing.is_empty() {
            self.selected = (self.selected + 1) % self.listing.len();
        }
    }

    pub fn select_previous(&mut self) {
        if !self.listing.is_empty() {
            self.selected = (self.selected + self.listing.len() - 1) % self.listing.len();
        }
    }

    /// Load the highlighted snippet into the editor, subject to the guard.
    pub fn load_selected(&mut self) {
        if let Some(summary) = self.selected_summary() {
            self.request_nav(NavAction::Load(summary.id));
        }
    }

    pub fn toggle_favorites_filter(&mut self) {
        self.filter.favorites_only = !self.filter.favorites_only;
        self.refresh_listing();
    }

    pub fn set_search_query(&mut self, query: String) {
        self.filter.query = query;
        self.refresh_listing();
    }

    // --- Navigation guard -------------------------------------------------

    pub fn request_nav(&mut self, action: NavAction) {
        match self.session.guard() {
            GuardVerdict::Proceed => self.apply_nav(action),
            GuardVerdict::NeedsDecision => {
                self.prompt = Some(Prompt::UnsavedChanges { action });
            }
        }
    }

    fn apply_nav(&mut self, action: NavAction) {
        match action {
            NavAction::Load(id) => match self.session.load(&self.store, id) {
                Ok(()) => {
                    self.reset_cursor();
                    self.clear_messages();
                }
                Err(err) => {
                    self.set_error_message(err.to_string());
                    self.refresh_listing();
                }
            },
            NavAction::New => {
                self.session.start_new();
                self.reset_cursor();
                self.focus = Focus::Title;
                self.clear_messages();
            }
            NavAction::Quit => {
                self.should_quit = true;
            }
        }
    }

    /// Resolve the unsaved-changes prompt. Save persists first and aborts
    /// the navigation when saving fails (e.g. missing title); Discard
    /// proceeds without persisting; Cancel leaves the dirty session as-is.
    pub fn resolve_unsaved(&mut self, choice: GuardChoice) {
        let Some(Prompt::UnsavedChanges { action }) = self.prompt.take() else {
            return;
        };
        match choice {
            GuardChoice::Save => match self.session.save(&self.store) {
                Ok(id) => {
                    info!("saved snippet {id} before navigating");
                    self.refresh_listing();
                    self.apply_nav(action);
                }
                Err(err) => self.set_error_message(err.to_string()),
            },
            GuardChoice::Discard => self.apply_nav(action),
            GuardChoice::Cancel => {}
        }
    }

    // --- Actions ----------------------------------------------------------

    pub fn save_snippet(&mut self) {
        match self.session.save(&self.store) {
            Ok(id) => {
                info!("saved snippet {id}");
                let title = self.session.title.trim().to_string();
                self.refresh_listing();
                self.set_success_message(format!("Snippet '{title}' saved!"));
            }
            Err(err) => self.set_error_message(err.to_string()),
        }
    }

    pub fn request_delete(&mut self) {
        if self.session.loaded_id.is_some() {
            self.prompt = Some(Prompt::ConfirmDelete);
        }
    }

    pub fn confirm_delete(&mut self) {
        self.prompt = None;
        let title = self.session.title.trim().to_string();
        match self.session.delete(&self.store) {
            Ok(()) => {
                self.reset_cursor();
                self.refresh_listing();
                self.set_success_message(format!("Snippet '{title}' deleted."));
            }
            Err(err) => self.set_error_message(err.to_string()),
        }
    }

    pub fn toggle_favorite(&mut self) {
        match self.session.toggle_favorite(&self.store) {
            Ok(now_favorite) => {
                self.refresh_listing();
                self.set_success_message(if now_favorite {
                    "Added to favorites."
                } else {
                    "Removed from favorites."
                });
            }
            Err(err) => self.set_error_message(err.to_string()),
        }
    }

    /// Run the external prettifier. A successful reformat counts as an edit;
    /// on any failure the buffer is left untouched.
    pub fn prettify(&mut self) {
        if self.session.code.trim().is_empty() {
            self.set_success_message("Nothing to prettify.");
            return;
        }
        match self.formatter.format(self.session.language, &self.session.code) {
            Ok(FormatOutcome::Formatted(code)) => {
                self.session.code = code;
                self.session.mark_dirty();
                self.clamp_cursor();
                self.set_success_message("Code prettified successfully!");
            }
            Ok(FormatOutcome::Unchanged) => {
                self.set_success_message("Code is already formatted.");
            }
            Ok(FormatOutcome::Unsupported) => {
                self.set_success_message(format!(
                    "No prettifier available for '{}'.",
                    self.session.language
                ));
            }
            Err(err) => self.set_error_message(err.to_string()),
        }
    }

    pub fn copy_code(&mut self) {
        if self.session.code.is_empty() {
            self.set_success_message("Nothing to copy.");
            return;
        }
        match copy_to_clipboard(&self.session.code) {
            Ok(()) => self.set_success_message("Code copied to clipboard!"),
            Err(err) => self.set_error_message(err.to_string()),
        }
    }

    pub fn open_export_dialog(&mut self) {
        if self.session.code.trim().is_empty() {
            self.set_error_message("There's no code to export as an image.");
            return;
        }
        let theme_index = EXPORT_THEMES
            .iter()
            .position(|theme| *theme == self.export_prefs.theme)
            .unwrap_or(0);
        self.prompt = Some(Prompt::Export(ExportDialog {
            theme_index,
            font_size: self
                .export_prefs
                .font_size
                .clamp(MIN_FONT_SIZE, MAX_FONT_SIZE),
            line_numbers: self.export_prefs.line_numbers,
            path: "code_snippet.png".to_string(),
            field: ExportField::Theme,
        }));
    }

    /// Render and write the image. The dialog stays open on failure so the
    /// destination can be corrected.
    pub fn run_export(&mut self) {
        let Some(Prompt::Export(dialog)) = self.prompt.clone() else {
            return;
        };
        let destination = dialog.path.trim();
        if destination.is_empty() {
            self.set_error_message("Please provide a destination path.");
            return;
        }
        let request = ExportRequest {
            code: self.session.code.clone(),
            language: self.session.language,
            theme: EXPORT_THEMES[dialog.theme_index].to_string(),
            font: self.export_prefs.font.clone(),
            font_size: dialog.font_size,
            line_numbers: dialog.line_numbers,
        };
        let destination = PathBuf::from(destination);
        match self.exporter.export(&request, &destination) {
            Ok(()) => {
                self.prompt = None;
                self.set_success_message(format!("Image saved to {}", destination.display()));
            }
            Err(err) => self.set_error_message(err.to_string()),
        }
    }

    // --- Field editing ----------------------------------------------------

    pub fn field_insert(&mut self, c: char) {
        match self.focus {
            Focus::Title => self.session.title.push(c),
            Focus::Tags => self.session.tags.push(c),
            Focus::Code => self.code_insert(c),
            Focus::List | Focus::Language => return,
        }
        self.session.mark_dirty();
    }

    pub fn field_backspace(&mut self) {
        let edited = match self.focus {
            Focus::Title => self.session.title.pop().is_some(),
            Focus::Tags => self.session.tags.pop().is_some(),
            Focus::Code => self.code_backspace(),
            Focus::List | Focus::Language => false,
        };
        if edited {
            self.session.mark_dirty();
        }
    }

    pub fn cycle_language(&mut self, forward: bool) {
        let languages = Language::ALL;
        let current = languages
            .iter()
            .position(|l| *l == self.session.language)
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % languages.len()
        } else {
            (current + languages.len() - 1) % languages.len()
        };
        self.session.language = languages[next];
        self.session.mark_dirty();
    }

    // --- Code cursor ------------------------------------------------------

    fn reset_cursor(&mut self) {
        self.cursor_line = 0;
        self.cursor_col = 0;
    }

    fn current_line_len(&self) -> usize {
        self.session
            .code
            .split('\n')
            .nth(self.cursor_line)
            .map(|line| line.chars().count())
            .unwrap_or(0)
    }

    fn line_count(&self) -> usize {
        self.session.code.split('\n').count()
    }

    pub fn clamp_cursor(&mut self) {
        self.cursor_line = self.cursor_line.min(self.line_count().saturating_sub(1));
        self.cursor_col = self.cursor_col.min(self.current_line_len());
    }

    fn cursor_byte_offset(&self) -> usize {
        let code = &self.session.code;
        let mut offset = 0;
        for (index, line) in code.split('\n').enumerate() {
            if index == self.cursor_line {
                let col_bytes = line
                    .char_indices()
                    .nth(self.cursor_col)
                    .map(|(byte, _)| byte)
                    .unwrap_or(line.len());
                return offset + col_bytes;
            }
            offset += line.len() + 1;
        }
        code.len()
    }

    pub fn code_insert(&mut self, c: char) {
        let offset = self.cursor_byte_offset();
        self.session.code.insert(offset, c);
        if c == '\n' {
            self.cursor_line += 1;
            self.cursor_col = 0;
        } else {
            self.cursor_col += 1;
        }
    }

    pub fn code_newline(&mut self) {
        self.code_insert('\n');
        self.session.mark_dirty();
    }

    fn code_backspace(&mut self) -> bool {
        let offset = self.cursor_byte_offset();
        if offset == 0 {
            return false;
        }
        let removed_at = self.session.code[..offset]
            .char_indices()
            .next_back()
            .map(|(byte, _)| byte)
            .unwrap_or(0);
        let removed = self.session.code.remove(removed_at);
        if removed == '\n' {
            self.cursor_line -= 1;
            self.cursor_col = self.current_line_len();
        } else {
            self.cursor_col -= 1;
        }
        true
    }

    pub fn move_cursor_up(&mut self) {
        self.cursor_line = self.cursor_line.saturating_sub(1);
        self.clamp_cursor();
    }

    pub fn move_cursor_down(&mut self) {
        if self.cursor_line + 1 < self.line_count() {
            self.cursor_line += 1;
        }
        self.clamp_cursor();
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor_col > 0 {
            self.cursor_col -= 1;
        } else if self.cursor_line > 0 {
            self.cursor_line -= 1;
            self.cursor_col = self.current_line_len();
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_col < self.current_line_len() {
            self.cursor_col += 1;
        } else if self.cursor_line + 1 < self.line_count() {
            self.cursor_line += 1;
            self.cursor_col = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_app() -> (TempDir, App) {
        let dir = TempDir::new().unwrap();
        let store = SnippetStore::open(dir.path().join("snippets.db")).unwrap();
        let app = App::with_store(store, ExportPrefs::default());
        (dir, app)
    }

    #[test]
    fn editing_a_field_marks_the_session_dirty() {
        let (_dir, mut app) = test_app();
        app.focus = Focus::Title;
        app.field_insert('H');
        assert!(app.session.is_dirty());
    }

    #[test]
    fn dirty_session_turns_navigation_into_a_prompt() {
        let (_dir, mut app) = test_app();
        app.focus = Focus::Code;
        app.field_insert('x');
        app.request_nav(NavAction::Quit);
        assert!(matches!(
            app.prompt,
            Some(Prompt::UnsavedChanges {
                action: NavAction::Quit
            })
        ));
        assert!(!app.should_quit);
    }

    #[test]
    fn cancel_keeps_edits_and_dirty_state() {
        let (_dir, mut app) = test_app();
        app.focus = Focus::Code;
        app.field_insert('x');
        app.request_nav(NavAction::New);
        app.resolve_unsaved(GuardChoice::Cancel);
        assert_eq!(app.session.code, "x");
        assert!(app.session.is_dirty());
        assert!(app.prompt.is_none());
    }

    #[test]
    fn discard_proceeds_without_persisting() {
        let (_dir, mut app) = test_app();
        app.focus = Focus::Code;
        app.field_insert('x');
        app.request_nav(NavAction::New);
        app.resolve_unsaved(GuardChoice::Discard);
        assert_eq!(app.session.code, "");
        assert!(!app.session.is_dirty());
        assert!(app.listing.is_empty());
    }

    #[test]
    fn discard_loads_the_requested_snippet_clean() {
        let (_dir, mut app) = test_app();
        let id = app
            .store
            .add("Hello", crate::models::Language::Python, "greeting", "print('hi')")
            .unwrap();
        app.refresh_listing();
        app.focus = Focus::Code;
        app.field_insert('x');
        app.request_nav(NavAction::Load(id));
        app.resolve_unsaved(GuardChoice::Discard);
        assert_eq!(app.session.loaded_id, Some(id));
        assert_eq!(app.session.title, "Hello");
        assert!(!app.session.is_dirty());
    }

    #[test]
    fn save_choice_with_empty_title_aborts_the_navigation() {
        let (_dir, mut app) = test_app();
        app.focus = Focus::Code;
        app.field_insert('x');
        app.request_nav(NavAction::Quit);
        app.resolve_unsaved(GuardChoice::Save);
        assert!(!app.should_quit);
        assert!(app.session.is_dirty());
        assert!(app.error_message.is_some());
    }

    #[test]
    fn code_cursor_insert_and_backspace_round_trip() {
        let (_dir, mut app) = test_app();
        app.focus = Focus::Code;
        for c in "ab\ncd".chars() {
            app.field_insert(c);
        }
        assert_eq!(app.session.code, "ab\ncd");
        assert_eq!((app.cursor_line, app.cursor_col), (1, 2));
        app.field_backspace();
        app.field_backspace();
        app.field_backspace();
        assert_eq!(app.session.code, "ab");
        assert_eq!((app.cursor_line, app.cursor_col), (0, 2));
    }

    #[test]
    fn export_dialog_requires_code() {
        let (_dir, mut app) = test_app();
        app.open_export_dialog();
        assert!(app.prompt.is_none());
        assert!(app.error_message.is_some());
    }
}

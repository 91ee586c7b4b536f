//! In-memory editing session and the unsaved-changes guard.
//!
//! The session is an explicit value object rather than ambient UI state, so
//! the save/discard/cancel contract is testable without a terminal.

use crate::error::{Error, Result};
use crate::models::{Language, SnippetStore};

/// A navigation that would replace the in-memory snippet and therefore has
/// to pass the dirty guard first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    Load(i64),
    New,
    Quit,
}

/// What the guard says about a requested navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardVerdict {
    /// No unsaved edits; the action proceeds immediately.
    Proceed,
    /// Unsaved edits present; the UI must offer Save / Discard / Cancel.
    NeedsDecision,
}

/// The user's answer to the unsaved-changes prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardChoice {
    Save,
    Discard,
    Cancel,
}

/// One editing session per open window: the currently loaded snippet (if
/// any), its editable fields and the dirty flag.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorSession {
    pub loaded_id: Option<i64>,
    pub title: String,
    pub language: Language,
    pub tags: String,
    pub code: String,
    dirty: bool,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorSession {
    pub fn new() -> Self {
        Self {
            loaded_id: None,
            title: String::new(),
            language: Language::default(),
            tags: String::new(),
            code: String::new(),
            dirty: false,
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Called after any edit to title, language, tags or code.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Consult the dirty state before a navigation that would replace the
    /// in-memory snippet.
    pub fn guard(&self) -> GuardVerdict {
        if self.dirty {
            GuardVerdict::NeedsDecision
        } else {
            GuardVerdict::Proceed
        }
    }

    /// Fetch a snippet from the store and make it the current one. Callers
    /// are expected to have passed the guard.
    pub fn load(&mut self, store: &SnippetStore, id: i64) -> Result<()> {
        let snippet = store.get(id)?;
        self.loaded_id = Some(snippet.id);
        self.title = snippet.title;
        self.language = snippet.language;
        self.tags = snippet.tags;
        self.code = snippet.code;
        self.dirty = false;
        Ok(())
    }

    /// Clear the session for a fresh, unsaved snippet. Callers are expected
    /// to have passed the guard.
    pub fn start_new(&mut self) {
        *self = Self::new();
    }

    /// Persist the current edits: update when a snippet is loaded, otherwise
    /// add and adopt the returned id. An empty title is a validation error
    /// and leaves the session dirty.
    pub fn save(&mut self, store: &SnippetStore) -> Result<i64> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(Error::Validation("please provide a title".into()));
        }
        let tags = self.tags.trim().to_string();
        let id = match self.loaded_id {
            Some(id) => {
                store.update(id, &title, self.language, &tags, &self.code)?;
                id
            }
            None => {
                let id = store.add(&title, self.language, &tags, &self.code)?;
                self.loaded_id = Some(id);
                id
            }
        };
        self.dirty = false;
        Ok(id)
    }

    /// Delete the loaded snippet and reset to a fresh session. The guard is
    /// bypassed on purpose: the record no longer exists to save. A no-op
    /// when nothing is loaded.
    pub fn delete(&mut self, store: &SnippetStore) -> Result<()> {
        let Some(id) = self.loaded_id else {
            return Ok(());
        };
        store.delete(id)?;
        self.start_new();
        Ok(())
    }

    /// Flip the favorite flag of the loaded snippet. Favorite status is not
    /// an editor field, so the dirty state is untouched.
    pub fn toggle_favorite(&self, store: &SnippetStore) -> Result<bool> {
        let Some(id) = self.loaded_id else {
            return Err(Error::Validation("no snippet loaded".into()));
        };
        store.toggle_favorite(id)
    }
}

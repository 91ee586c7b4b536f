//! The ordered, filterable listing the UI renders.
//!
//! Re-derived from the store after every mutation; nothing is cached across
//! calls, so the result always reflects the latest committed state.

use crate::error::Result;
use crate::models::{SnippetStore, SnippetSummary};

#[derive(Debug, Clone, Default)]
pub struct ListingFilter {
    pub query: String,
    pub favorites_only: bool,
}

impl ListingFilter {
    /// Derive the listing: a non-empty query searches (optionally within
    /// favorites), otherwise the favorites flag picks the plain listing.
    /// Always ordered by title ascending.
    pub fn fetch(&self, store: &SnippetStore) -> Result<Vec<SnippetSummary>> {
        let query = self.query.trim();
        if !query.is_empty() {
            store.search(query, self.favorites_only)
        } else if self.favorites_only {
            store.list_favorites()
        } else {
            store.list_all()
        }
    }
}

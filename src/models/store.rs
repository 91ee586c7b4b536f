//! SQLite-backed snippet store.
//!
//! Every operation opens a connection, performs its statement(s) and drops
//! the connection. There is no in-memory caching and no transaction spanning
//! multiple operations; the model assumes exactly one active editor per
//! store.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Row, params};
use tracing::info;

use crate::error::{Error, Result};
use crate::models::{Language, Snippet, SnippetSummary};

const SUMMARY_COLUMNS: &str = "id, title, language, tags, is_favorite";

#[derive(Debug, Clone)]
pub struct SnippetStore {
    path: PathBuf,
}

impl SnippetStore {
    /// Open the store at `path`, creating the database file and its parent
    /// directory on first run and applying the additive schema migration.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let store = Self { path };
        store.migrate()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> Result<Connection> {
        Ok(Connection::open(&self.path)?)
    }

    /// Ensure the table exists and add columns introduced by later versions.
    /// Forward-only and idempotent; a pre-favorites database gains the
    /// `is_favorite` column with a default of 0.
    fn migrate(&self) -> Result<()> {
        let conn = self.connect()?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS snippets (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                language TEXT NOT NULL,
                tags TEXT,
                code TEXT NOT NULL,
                created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
            )",
            [],
        )?;

        let mut has_favorite = false;
        {
            let mut stmt = conn.prepare("PRAGMA table_info(snippets)")?;
            let mut rows = stmt.query([])?;
            while let Some(row) = rows.next()? {
                let column: String = row.get(1)?;
                if column == "is_favorite" {
                    has_favorite = true;
                }
            }
        }
        if !has_favorite {
            info!("upgrading database: adding is_favorite column");
            conn.execute(
                "ALTER TABLE snippets ADD COLUMN is_favorite INTEGER DEFAULT 0",
                [],
            )?;
        }
        Ok(())
    }

    /// Insert a new snippet and return its id. New snippets are never
    /// favorites and get their creation timestamp exactly once.
    pub fn add(&self, title: &str, language: Language, tags: &str, code: &str) -> Result<i64> {
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO snippets (title, language, tags, code, is_favorite, created_at)
             VALUES (?1, ?2, ?3, ?4, 0, ?5)",
            params![title, language.as_str(), tags, code, Utc::now().to_rfc3339()],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Overwrite all mutable fields of the snippet matching `id`.
    ///
    /// Reports `NotFound` when the id does not exist instead of silently
    /// succeeding with zero rows affected.
    pub fn update(
        &self,
        id: i64,
        title: &str,
        language: Language,
        tags: &str,
        code: &str,
    ) -> Result<()> {
        let conn = self.connect()?;
        let affected = conn.execute(
            "UPDATE snippets SET title = ?1, language = ?2, tags = ?3, code = ?4 WHERE id = ?5",
            params![title, language.as_str(), tags, code, id],
        )?;
        if affected == 0 {
            return Err(Error::NotFound(id));
        }
        Ok(())
    }

    /// Remove the snippet; absent ids are not an error.
    pub fn delete(&self, id: i64) -> Result<()> {
        let conn = self.connect()?;
        conn.execute("DELETE FROM snippets WHERE id = ?1", [id])?;
        Ok(())
    }

    pub fn get(&self, id: i64) -> Result<Snippet> {
        let conn = self.connect()?;
        conn.query_row(
            "SELECT id, title, language, tags, code, is_favorite, created_at
             FROM snippets WHERE id = ?1",
            [id],
            |row| {
                let language: String = row.get(2)?;
                let tags: Option<String> = row.get(3)?;
                let created_at: String = row.get(6)?;
                Ok(Snippet {
                    id: row.get(0)?,
                    title: row.get(1)?,
                    language: Language::from_name(&language),
                    tags: tags.unwrap_or_default(),
                    code: row.get(4)?,
                    is_favorite: row.get(5)?,
                    created_at: parse_timestamp(&created_at),
                })
            },
        )
        .optional()?
        .ok_or(Error::NotFound(id))
    }

    pub fn list_all(&self) -> Result<Vec<SnippetSummary>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {SUMMARY_COLUMNS} FROM snippets ORDER BY title ASC"
        ))?;
        let summaries = stmt
            .query_map([], summary_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(summaries)
    }

    pub fn list_favorites(&self) -> Result<Vec<SnippetSummary>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {SUMMARY_COLUMNS} FROM snippets WHERE is_favorite = 1 ORDER BY title ASC"
        ))?;
        let summaries = stmt
            .query_map([], summary_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(summaries)
    }

    /// Case-insensitive substring match of `query` against title, tags or
    /// language, optionally restricted to favorites. Same ordering as the
    /// list operations.
    pub fn search(&self, query: &str, favorites_only: bool) -> Result<Vec<SnippetSummary>> {
        let conn = self.connect()?;
        let pattern = format!("%{query}%");
        let sql = if favorites_only {
            format!(
                "SELECT {SUMMARY_COLUMNS} FROM snippets
                 WHERE (title LIKE ?1 OR tags LIKE ?1 OR language LIKE ?1) AND is_favorite = 1
                 ORDER BY title ASC"
            )
        } else {
            format!(
                "SELECT {SUMMARY_COLUMNS} FROM snippets
                 WHERE (title LIKE ?1 OR tags LIKE ?1 OR language LIKE ?1)
                 ORDER BY title ASC"
            )
        };
        let mut stmt = conn.prepare(&sql)?;
        let summaries = stmt
            .query_map([&pattern], summary_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(summaries)
    }

    /// Flip the favorite flag and return the new value. A crash between the
    /// read and the write can leave the flip unobserved but never corrupts
    /// other rows.
    pub fn toggle_favorite(&self, id: i64) -> Result<bool> {
        let conn = self.connect()?;
        let current: Option<bool> = conn
            .query_row(
                "SELECT is_favorite FROM snippets WHERE id = ?1",
                [id],
                |row| row.get(0),
            )
            .optional()?;
        let Some(current) = current else {
            return Err(Error::NotFound(id));
        };
        let flipped = !current;
        conn.execute(
            "UPDATE snippets SET is_favorite = ?1 WHERE id = ?2",
            params![flipped, id],
        )?;
        Ok(flipped)
    }
}

fn summary_from_row(row: &Row<'_>) -> rusqlite::Result<SnippetSummary> {
    let language: String = row.get(2)?;
    let tags: Option<String> = row.get(3)?;
    Ok(SnippetSummary {
        id: row.get(0)?,
        title: row.get(1)?,
        language: Language::from_name(&language),
        tags: tags.unwrap_or_default(),
        is_favorite: row.get(4)?,
    })
}

/// Lenient timestamp parse: rows written by this version are RFC 3339, rows
/// written by older versions carry SQLite's `CURRENT_TIMESTAMP` format.
fn parse_timestamp(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").map(|dt| dt.and_utc())
        })
        .unwrap_or_else(|_| Utc::now())
}

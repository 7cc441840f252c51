//! SQLite persistence for decks, flashcards, review history, and study stats.
//!
//! All access goes through an explicitly constructed [`Database`] handle;
//! there is no process-wide connection. The handle is single-threaded by
//! design: callers that share one across threads must serialize access
//! themselves so every review keeps the read-latest-then-append invariant.

mod cards;
mod reviews;
mod schema;
mod stats;

pub use stats::{DailyStats, StudySummary};

use std::path::Path;

use rusqlite::Connection;

use crate::error::Result;
use crate::models::{CardId, ReviewRecord};
use crate::scheduler::ReviewStore;

/// Handle to one DoroLexus database file (or an in-memory database).
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens the database at `path`, creating the file, its parent
    /// directory, and the schema as needed.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        let db = Self::from_connection(conn)?;
        tracing::info!(path = %path.display(), "database opened");
        Ok(db)
    }

    /// Opens a fresh in-memory database. Used by tests and previews.
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.pragma_update(None, "foreign_keys", true)?;
        schema::create_tables(&conn)?;
        Ok(Self { conn })
    }

    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }
}

impl ReviewStore for Database {
    fn fetch_latest_review(&self, card_id: CardId) -> Result<Option<ReviewRecord>> {
        self.latest_review(card_id)
    }

    fn append_review(&self, record: &ReviewRecord) -> Result<()> {
        self.insert_review(record)
    }

    fn fetch_all_cards(&self, deck_name: Option<&str>) -> Result<Vec<CardId>> {
        self.card_ids(deck_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_creates_file_and_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("cards.db");

        let db = Database::open(&path).unwrap();
        assert!(path.exists());
        assert!(db.deck_names().unwrap().is_empty());
    }

    #[test]
    fn test_reopen_keeps_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cards.db");

        {
            let db = Database::open(&path).unwrap();
            db.create_deck("Spanish", "").unwrap();
        }

        let db = Database::open(&path).unwrap();
        assert_eq!(db.deck_names().unwrap(), vec!["Spanish".to_string()]);
    }
}

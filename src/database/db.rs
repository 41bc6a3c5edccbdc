//! Database operations for the flashcard application
//!
//! The whole collection is persisted as one JSON document under a fixed key
//! of an SQLite key-value table. The application talks to storage only
//! through the [`Repository`] trait, so it never reaches for a global store.

use crate::error::Result;
use crate::export::json::{export_collection, import_collection};
use crate::models::Collection;
use log::{debug, warn};
use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;

pub const STORAGE_KEY: &str = "spaced-repetition-app-data";

/// Loads and stores the card collection.
pub trait Repository {
    /// Returns the stored collection, or an empty one if nothing was saved yet.
    fn load(&self) -> Result<Collection>;

    fn save(&self, collection: &Collection) -> Result<()>;
}

/// Repository backed by an `app_state (key, value)` table.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Opens (or creates) the database file and its table.
    pub fn open(path: &Path) -> Result<Self> {
        debug!("Opening database at '{}'", path.display());
        Self::init(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS app_state (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            (),
        )?;
        Ok(Self { conn })
    }

    fn read_value(&self) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM app_state WHERE key = ?1",
                params![STORAGE_KEY],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write_value(&self, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO app_state (key, value) VALUES (?1, ?2)",
            params![STORAGE_KEY, value],
        )?;
        Ok(())
    }
}

impl Repository for SqliteRepository {
    fn load(&self) -> Result<Collection> {
        match self.read_value()? {
            Some(json) => import_collection(&json),
            None => Ok(Collection::default()),
        }
    }

    fn save(&self, collection: &Collection) -> Result<()> {
        self.write_value(&export_collection(collection)?)?;
        debug!(
            "Saved {} decks, {} cards, {} reviews",
            collection.decks.len(),
            collection.cards.len(),
            collection.review_history.len()
        );
        Ok(())
    }
}

/// Loads the collection, falling back to an empty one if the stored data
/// cannot be read or decoded.
pub fn load_or_default(repository: &impl Repository) -> Collection {
    repository.load().unwrap_or_else(|e| {
        warn!("Failed to load stored collection, starting empty: {}", e);
        Collection::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Quality;
    use tempfile::tempdir;

    fn sample_collection() -> Collection {
        let mut collection = Collection::default();
        let deck_id = collection.add_deck("Polish Vocabulary", "", 1).id.clone();
        let card_id = collection.add_card(&deck_id, "proszę", "please", 2).unwrap().id.clone();
        collection.review_card(&card_id, Quality::Perfect, 3).unwrap();
        collection
    }

    #[test]
    fn test_load_empty_database() {
        let repository = SqliteRepository::open_in_memory().unwrap();
        assert_eq!(repository.load().unwrap(), Collection::default());
    }

    #[test]
    fn test_save_then_load() {
        let repository = SqliteRepository::open_in_memory().unwrap();
        let collection = sample_collection();

        repository.save(&collection).unwrap();
        assert_eq!(repository.load().unwrap(), collection);

        // Saving again replaces the stored document.
        let mut changed = collection.clone();
        changed.add_deck("Second", "", 4);
        repository.save(&changed).unwrap();
        assert_eq!(repository.load().unwrap().decks.len(), 2);
    }

    #[test]
    fn test_save_then_load_keeps_inexact_ease_factor() {
        let repository = SqliteRepository::open_in_memory().unwrap();
        let mut collection = Collection::default();
        let deck_id = collection.add_deck("Deck", "", 0).id.clone();
        let card_id = collection.add_card(&deck_id, "a", "b", 0).unwrap().id.clone();
        collection.review_card(&card_id, Quality::Perfect, 1).unwrap();
        collection
            .review_card(&card_id, Quality::CompleteBlackout, 2)
            .unwrap();

        // Several save/load cycles must not drift the stored value.
        let mut loaded = collection.clone();
        for _ in 0..3 {
            repository.save(&loaded).unwrap();
            loaded = repository.load().unwrap();
        }

        assert_eq!(loaded, collection);
    }

    #[test]
    fn test_persists_across_connections() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("flashcards.sqlite3");
        let collection = sample_collection();

        SqliteRepository::open(&path).unwrap().save(&collection).unwrap();
        let reopened = SqliteRepository::open(&path).unwrap();

        assert_eq!(reopened.load().unwrap(), collection);
    }

    #[test]
    fn test_malformed_data_falls_back_to_default() {
        let repository = SqliteRepository::open_in_memory().unwrap();
        repository.write_value(r#"{ "decks": [] }"#).unwrap();

        assert!(repository.load().is_err());
        assert_eq!(load_or_default(&repository), Collection::default());

        repository.write_value("not json").unwrap();
        assert_eq!(load_or_default(&repository), Collection::default());
    }
}

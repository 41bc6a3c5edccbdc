//! JSON import/export module for the whole collection.
//! The backup format is `{ "decks": [...], "cards": [...], "reviewHistory": [...] }`
//! with camelCase keys and epoch-millisecond timestamps.

use crate::error::{Error, Result};
use crate::models::Collection;
use log::{info, warn};
use serde_json::Value;
use std::fs;
use std::path::Path;

const REQUIRED_ARRAYS: [&str; 3] = ["decks", "cards", "reviewHistory"];

/// Serializes the collection as pretty-printed JSON.
pub fn export_collection(collection: &Collection) -> Result<String> {
    Ok(serde_json::to_string_pretty(collection)?)
}

/// Parses a backup produced by [`export_collection`].
///
/// The three top-level collections must be present and be arrays before the
/// records themselves are decoded. Nothing is mutated here, so a failed import
/// leaves the caller's state as it was.
pub fn import_collection(json: &str) -> Result<Collection> {
    let value: Value = serde_json::from_str(json)?;

    for key in REQUIRED_ARRAYS {
        if !value.get(key).is_some_and(Value::is_array) {
            warn!("Rejecting import: '{}' is missing or not an array", key);
            return Err(Error::InvalidImport(format!(
                "'{key}' must be present and an array"
            )));
        }
    }

    Ok(serde_json::from_value(value)?)
}

/// Exports the collection to a JSON file at the specified path.
pub fn export_to_path(collection: &Collection, path: &Path) -> Result<()> {
    fs::write(path, export_collection(collection)?)?;
    info!(
        "Exported {} decks and {} cards to '{}'",
        collection.decks.len(),
        collection.cards.len(),
        path.display()
    );
    Ok(())
}

/// Imports a collection from a JSON file.
pub fn import_from_path(path: &Path) -> Result<Collection> {
    let contents = fs::read_to_string(path)?;
    let collection = import_collection(&contents)?;
    info!(
        "Imported {} decks and {} cards from '{}'",
        collection.decks.len(),
        collection.cards.len(),
        path.display()
    );
    Ok(collection)
}

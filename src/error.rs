//! Error type shared by the collection, persistence and import/export layers.
//!
//! The scheduler itself never fails; everything that can go wrong lives
//! around it.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid import data: {0}")]
    InvalidImport(String),

    #[error("deck not found: {0}")]
    DeckNotFound(String),

    #[error("card not found: {0}")]
    CardNotFound(String),
}

pub type Result<T> = std::result::Result<T, Error>;
